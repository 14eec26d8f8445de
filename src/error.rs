/// A run that could not complete.
///
/// Carries the last step the run reported so the failure can be placed.
#[derive(Debug, thiserror::Error)]
#[error("{status}: {cause:#}")]
pub struct RunFailure {
    pub status: String,
    pub cause: anyhow::Error,
}

impl RunFailure {
    pub fn new(status: impl Into<String>, cause: anyhow::Error) -> Self {
        Self {
            status: status.into(),
            cause,
        }
    }
}
