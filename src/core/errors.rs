use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum SplitchatError {
    #[error("Email is required")]
    MissingEmail,
    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),
    #[error("User {0} not found")]
    UserNotFound(String),
    #[error("Group {0} not found")]
    GroupNotFound(String),
    #[error("User {0} is already a group member")]
    AlreadyGroupMember(String),
    #[error("User {0} is not a group member")]
    NotGroupMember(String),
    #[error("User {0} is not group owner")]
    NotGroupOwner(String),
    #[error("Invalid owner count: {0}")]
    InvalidOwnerCount(usize),
    #[error("Owner cannot remove themselves")]
    OwnerCannotRemoveSelf,
    #[error("Cannot remove last group member")]
    CannotRemoveLastMember,
    #[error("Cannot send a message to yourself")]
    CannotMessageSelf,
    #[error("Split bill description is required")]
    MissingDescription,
    #[error("Split bill amount must be a positive number")]
    InvalidAmount,
    #[error("Split bill has no participants")]
    NoParticipants,
    #[error("Invalid split participant: {0}")]
    InvalidParticipant(String),
    #[error("Participant amounts {actual} do not sum to bill total {expected}")]
    AmountMismatch { expected: f64, actual: f64 },
    #[error("Participant {0} not found on split bill")]
    ParticipantNotFound(String),
    #[error("Split bill {0} not found")]
    SplitBillNotFound(String),
    #[error("User {0} not authorized to update split bill")]
    UnauthorizedBillUpdate(String),
    #[error("Mentioned user @{0} is not a group member")]
    UnknownMention(String),
    #[error("No spending data available")]
    NoSpendingData,
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Logging error: {0}")]
    LoggingError(String),
    #[error("Cache error: {0}")]
    CacheError(String),
}
