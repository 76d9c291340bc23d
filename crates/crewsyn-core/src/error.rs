use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SynergyError {
    #[error("invalid attribute value: {0}")]
    InvalidAttribute(String),

    #[error("duo matching requires at least 2 members, got {0}")]
    InsufficientMembers(usize),
}
