//! Where the opponent's card comes from.

use rand::Rng;

/// Picks which remaining opponent card competes in a round.
pub trait OpponentDraw {
    /// Returns an index in `0..len`. Never called with `len == 0`.
    fn draw_index(&mut self, len: usize) -> usize;
}

/// Any `rand` generator draws uniformly.
impl<R: Rng + ?Sized> OpponentDraw for R {
    fn draw_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Replays a fixed sequence of draws in tests.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ScriptedDraw {
    indices: Vec<usize>,
    position: usize,
}

#[cfg(test)]
impl ScriptedDraw {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            position: 0,
        }
    }

    /// Always draws the first remaining card.
    pub fn first_card(rounds: usize) -> Self {
        Self::new(vec![0; rounds])
    }

    pub fn remaining(&self) -> usize {
        self.indices.len() - self.position
    }
}

#[cfg(test)]
impl OpponentDraw for ScriptedDraw {
    fn draw_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let Some(&index) = self.indices.get(self.position) else {
            panic!(
                "ScriptedDraw exhausted after {} draws; need another index for a deck of {}",
                self.position, len
            );
        };
        self.position += 1;
        // Scripts written for a full deck still work as the deck shrinks.
        index % len
    }
}
