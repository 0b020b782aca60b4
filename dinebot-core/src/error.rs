use thiserror::Error;

#[derive(Error, Debug)]
pub enum DinebotError {
    #[error("Assistant backend error: {0}")]
    Backend(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("Input is disabled while a response is in flight")]
    InputLocked,

    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("A rating is required before submitting")]
    RatingMissing,

    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,

    #[error("A comment is required for ratings of 2 stars or below")]
    CommentRequired,

    #[error("No feedback form is open")]
    NoActiveFeedback,

    #[error("Feedback submission is already in flight")]
    SubmissionInFlight,

    #[error("No order is awaiting confirmation")]
    NoPendingOrder,

    #[error("Order confirmation is already in flight")]
    ConfirmationInFlight,
}

pub type Result<T> = std::result::Result<T, DinebotError>;
