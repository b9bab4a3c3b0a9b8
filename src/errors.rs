use thiserror::Error;

/// Main error type for the Pokemon card game
#[derive(Debug, Error)]
pub enum AppError {
    /// Error talking to PokeAPI
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    /// Error while dealing a new match
    #[error("Setup error: {0}")]
    Setup(#[from] SetupError),
    /// Error related to an invalid game action or session state
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
    /// Error while running a match to completion
    #[error("Runner error: {0}")]
    Runner(#[from] RunnerError),
    /// Error loading configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors from the PokeAPI data access layer
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connection, timeout)
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    /// The response body was not the JSON shape we expected
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// Client construction failed
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Errors while dealing decks for a new match
#[derive(Debug, Error)]
pub enum SetupError {
    /// The roster has fewer names than both decks need
    #[error("roster has {available} Pokemon but {needed} are needed to deal both decks")]
    RosterTooSmall { available: usize, needed: usize },
    /// A fetch failed; no partial decks are kept
    #[error(transparent)]
    Api(#[from] ApiError),
    /// A detail fetch task panicked or was cancelled
    #[error("detail fetch task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Errors related to game session actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A deck does not hold exactly the configured number of cards
    #[error("{side} deck has {actual} cards, expected {expected}")]
    InvalidDeck {
        side: &'static str,
        actual: usize,
        expected: usize,
    },
    /// A round is still on display; only one round may be in flight
    #[error("a round is already in progress")]
    RoundInFlight,
    /// All rounds have been played
    #[error("the match is already complete")]
    MatchComplete,
    /// Card index is out of bounds for the remaining deck
    #[error("invalid card selection {index}: {remaining} cards remain")]
    InvalidSelection { index: usize, remaining: usize },
}

/// Errors from driving a match with a timer
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The session was torn down while a round was on display
    #[error("match cancelled during round {round}")]
    Cancelled { round: u32 },
    /// The chooser could not produce a card
    #[error("no card chosen: {0}")]
    NoChoice(String),
    /// The category table never arrived, so selections are ignored
    #[error("type chart is not loaded; selections are being ignored")]
    ChartNotLoaded,
    /// The session reported complete but had no verdict to give
    #[error("match ended after round {round} without a verdict")]
    MissingVerdict { round: u32 },
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors loading the RON configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid value for {name}: {value}")]
    InvalidOverride { name: &'static str, value: String },
}

/// Type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Type alias for Results using ApiError
pub type ApiResult<T> = Result<T, ApiError>;

/// Type alias for Results using SetupError
pub type SetupResult<T> = Result<T, SetupError>;

/// Type alias for Results using SessionError
pub type SessionResult<T> = Result<T, SessionError>;

/// Type alias for Results using RunnerError
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
