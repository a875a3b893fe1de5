use std::path::PathBuf;

/// Errors raised while preparing or driving calls against the Video Game DB.
///
/// Everything except [`HarnessError::Http`] during a scenario is a set-up
/// failure: the caller is expected to abort the run.
#[derive(thiserror::Error, Debug)]
pub enum HarnessError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Fixture file {0} contains no game records")]
    EmptyFixture(PathBuf),
    #[error("Authentication rejected with HTTP {status}: {body}")]
    AuthenticationRejected { status: u16, body: String },
    #[error("Failed to obtain authentication token")]
    MissingToken,
    #[error("Invalid game id: {0}")]
    InvalidGameId(String),
    #[error("No attribute named '{0}' is defined")]
    MissingVariable(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
