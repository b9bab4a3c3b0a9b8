use crate::errors::{RunnerError, RunnerResult};
use crate::game::ai::Behavior;
use crate::game::draw::OpponentDraw;
use crate::game::session::GameSession;
use crate::game::state::{MatchState, MatchVerdict, RoundReport, SelectOutcome};
use std::time::Instant;
use tokio::sync::watch;

/// Final result of a match played to completion.
#[derive(Debug, Clone)]
pub struct MatchSummary {
    pub state: MatchState,
    pub verdict: MatchVerdict,
    pub rounds: Vec<RoundReport>,
}

/// Plays rounds until the match completes. Each round stays on display for
/// the configured dwell before it is applied to the decks and score.
///
/// Setting `shutdown` to `true` (during a dwell or between rounds) stops the
/// match with `RunnerError::Cancelled`. A round on display at that moment is
/// never applied.
pub async fn play_match<B, D, F>(
    session: &mut GameSession,
    chooser: &mut B,
    draw: &mut D,
    shutdown: &mut watch::Receiver<bool>,
    mut on_reveal: F,
) -> RunnerResult<MatchSummary>
where
    B: Behavior + ?Sized,
    D: OpponentDraw + ?Sized,
    F: FnMut(&GameSession, &RoundReport),
{
    let mut rounds = Vec::new();

    while !session.is_complete() {
        let round = session.match_state().round;
        if *shutdown.borrow() {
            return Err(RunnerError::Cancelled { round });
        }

        let index = chooser
            .choose_card(session)
            .ok_or_else(|| RunnerError::NoChoice(format!("no card picked for round {}", round)))?;

        let report = match session.select(index, draw, Instant::now())? {
            SelectOutcome::Resolved(report) => report,
            SelectOutcome::Ignored => return Err(RunnerError::ChartNotLoaded),
        };
        on_reveal(session, &report);

        tokio::select! {
            biased;
            _ = shutdown_requested(shutdown) => {
                tracing::info!(round, "match cancelled while round was on display");
                return Err(RunnerError::Cancelled { round });
            }
            _ = tokio::time::sleep(session.rules().dwell()) => {}
        }

        session.finish_round();
        rounds.push(report);
    }

    let state = *session.match_state();
    let verdict = state
        .verdict()
        .ok_or(RunnerError::MissingVerdict {
            round: state.completed_rounds(),
        })?;
    Ok(MatchSummary {
        state,
        verdict,
        rounds,
    })
}

/// Resolves once the flag reads `true`. A dropped sender can never cancel, so
/// that case just waits forever.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchRules;
    use crate::game::ai::ScoringPick;
    use crate::game::draw::ScriptedDraw;
    use crate::game::effectiveness::TypeChart;
    use crate::game::state::GamePhase;
    use crate::game::tests::common::{sample_chart, sample_decks};
    use std::time::Duration;

    /// Always plays the first remaining card.
    struct FirstCard;

    impl Behavior for FirstCard {
        fn choose_card(&mut self, session: &GameSession) -> Option<usize> {
            (!session.user_deck().is_empty()).then_some(0)
        }
    }

    fn session(chart: TypeChart) -> GameSession {
        let (user, opponent) = sample_decks();
        GameSession::new(user, opponent, chart, MatchRules::default()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_match_plays_six_rounds_with_dwell() {
        let mut session = session(sample_chart());
        let mut draw = ScriptedDraw::first_card(6);
        let (_tx, mut rx) = watch::channel(false);
        let mut reveals = 0;

        let started = tokio::time::Instant::now();
        let summary = play_match(&mut session, &mut FirstCard, &mut draw, &mut rx, |s, report| {
            reveals += 1;
            assert_eq!(s.phase(), GamePhase::RoundDisplay);
            assert_eq!(report.round, reveals);
        })
        .await
        .unwrap();

        assert_eq!(summary.rounds.len(), 6);
        assert_eq!(reveals, 6);
        assert!(started.elapsed() >= Duration::from_millis(6 * 2000));
        assert!(session.user_deck().is_empty());
        assert!(session.opponent_deck().is_empty());
        assert_eq!(
            summary.state.user_score + summary.state.opponent_score + summary.state.draws,
            6
        );
        assert_eq!(Some(summary.verdict), session.verdict());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_during_dwell_discards_pending_round() {
        let mut session = session(sample_chart());
        let mut draw = ScriptedDraw::first_card(6);
        let (tx, mut rx) = watch::channel(false);

        let result = play_match(&mut session, &mut ScoringPick::new(), &mut draw, &mut rx, |_, report| {
            if report.round == 2 {
                let _ = tx.send(true);
            }
        })
        .await;

        assert!(matches!(result, Err(RunnerError::Cancelled { round: 2 })));
        // Round 1 was applied; round 2 never was.
        assert_eq!(session.user_deck().len(), 5);
        assert_eq!(session.opponent_deck().len(), 5);
        assert_eq!(session.match_state().round, 2);
    }

    /// Never picks anything.
    struct NoPick;

    impl Behavior for NoPick {
        fn choose_card(&mut self, _session: &GameSession) -> Option<usize> {
            None
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_chooser_failure_and_missing_verdict_are_distinct_errors() {
        let mut session = session(sample_chart());
        let mut draw = ScriptedDraw::first_card(6);
        let (_tx, mut rx) = watch::channel(false);

        let result = play_match(&mut session, &mut NoPick, &mut draw, &mut rx, |_, _| {}).await;
        assert!(matches!(result, Err(RunnerError::NoChoice(_))));
        assert_eq!(session.match_state().round, 1);

        let missing = RunnerError::MissingVerdict { round: 6 };
        assert_eq!(missing.to_string(), "match ended after round 6 without a verdict");
        assert!(!matches!(missing, RunnerError::NoChoice(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_chart_stops_the_runner() {
        let mut session = session(TypeChart::Pending);
        let mut draw = ScriptedDraw::first_card(6);
        let (_tx, mut rx) = watch::channel(false);

        let result = play_match(&mut session, &mut FirstCard, &mut draw, &mut rx, |_, _| {}).await;

        assert!(matches!(result, Err(RunnerError::ChartNotLoaded)));
        assert_eq!(session.user_deck().len(), 6);
        assert_eq!(session.match_state().round, 1);
    }
}
