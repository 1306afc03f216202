use thiserror::Error;

/// Closed error taxonomy for authentication operations.
///
/// The first three variants are raised by local validation before any
/// network call; the provider-originated variants are mapped from the
/// identity API's error codes in `rest`.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please fill in all fields")]
    EmptyFields,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("This email is already registered")]
    EmailAlreadyInUse,

    #[error("Incorrect password")]
    WrongPassword,

    #[error("No account found with this email")]
    UserNotFound,

    #[error("This account has been disabled")]
    AccountDisabled,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Too many attempts, try again later")]
    TooManyRequests,

    #[error("{0}")]
    Unknown(String),

    /// Credential persistence failure. Never produced by the sign-in and
    /// sign-up flows themselves, only by the token store.
    #[error("token store error: {0}")]
    TokenStore(String),
}
