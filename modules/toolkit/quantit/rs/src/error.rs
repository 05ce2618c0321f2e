use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Alignment(#[from] editscope_alignment_rs::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No candidate references were provided")]
    NoReferences,
}

impl Error {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
