use thiserror::Error;

/// Result of an operation that can be refused for an ordinary, caller-facing
/// reason. Storage faults travel separately as `anyhow::Error`.
pub type Outcome<T> = Result<T, Rejection>;

/// Non-fatal refusals. Every variant is a normal return value, never a fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// A user with the requested name already exists.
    #[error("User already exists!")]
    DuplicateUser,

    /// The presented token does not resolve to any user.
    #[error("Unknown token!")]
    UnknownToken,

    /// The token resolves, but the account is not activated.
    #[error("User not activated!")]
    UserNotActivated,

    /// Required request fields were absent, in declaration order.
    #[error("Missing argument(s): {}", .0.join(", "))]
    MissingArgument(Vec<&'static str>),

    /// Fields were present but held a value of the wrong JSON type.
    #[error("Invalid argument(s): {}", .0.join(", "))]
    InvalidArgument(Vec<String>),
}
