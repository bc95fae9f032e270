/// Non-fatal errors raised by state-engine operations.
///
/// Every variant is shown to the user in the single message slot and the
/// event loop carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("Input cannot be empty.")]
    EmptyInput,
    #[error("Invalid date format. Use YYYY-MM-DD.")]
    InvalidDateFormat,
    #[error("Context name already exists.")]
    NameCollision(String),
    #[error("Cannot delete the only context.")]
    PreconditionFailed,
    #[error("Duplication is not allowed!")]
    DuplicateBinding(String),
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("Nothing to redo")]
    NothingToRedo,
    #[error("No tasks matching '{0}'")]
    NoMatches(String),
}
