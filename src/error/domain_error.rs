use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("The room does not exist. RoomCode: '{0}'.")]
    RoomDoesNotExist(String),
    #[error("The secret word cannot be empty.")]
    EmptySecretWord,
    #[error("A guess must be exactly one letter. Letter: '{0}'.")]
    InvalidLetter(String),
}
