use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("incomplete landmark set: expected at least {expected} points, found {found}")]
    IncompleteLandmarks { expected: usize, found: usize },

    #[error("unknown face shape: {0:?}")]
    UnknownFaceShape(String),
}

pub type Result<T> = std::result::Result<T, Error>;
