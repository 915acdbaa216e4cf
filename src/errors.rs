use std::fmt;

/// Application-specific error types.
///
/// The taxonomy mirrors what the user can actually observe: the network
/// failed, the server answered with a non-2xx status, the payload could not
/// be decoded, or the input was rejected before any call was made. An empty
/// result set is deliberately not an error.
#[derive(Debug, Clone)]
pub enum AppError {
    /// The request never completed (connect failure, timeout, DNS).
    Network(String),
    /// The backend answered with a non-2xx status.
    Server {
        /// HTTP status code.
        status: u16,
        /// Error text captured from the response body.
        message: String,
    },
    /// The response body could not be parsed.
    Decode(String),
    /// Invalid input rejected client-side (e.g., radius out of bounds).
    BadRequest(String),
    /// Internal invariant violation.
    Internal(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            AppError::Decode(msg) => write!(f, "Decode error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Converts the error into the notification text shown to the user.
    ///
    /// Logs the full error at a severity matching the variant; the returned
    /// string is intentionally short and free of internals. Nothing here is
    /// retried and nothing is fatal to the process.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(msg) => {
                tracing::error!("Network error: {}", msg);
                "Could not reach the server. Please try again.".to_string()
            }
            AppError::Server { status, message } => {
                tracing::error!("Server returned {}: {}", status, message);
                format!("The server reported an error ({}). Please try again.", status)
            }
            AppError::Decode(msg) => {
                tracing::error!("Failed to decode response: {}", msg);
                "The server sent an unexpected response.".to_string()
            }
            AppError::BadRequest(msg) => {
                tracing::warn!("Rejected input: {}", msg);
                msg.clone()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Something went wrong. Please try again.".to_string()
            }
            AppError::WithContext { source, context } => {
                tracing::error!("Error with context: {} -> {}", context, source);
                source.user_message()
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    ///
    /// Body-decode failures map to `Decode`; everything else (connect,
    /// timeout, redirect loops) is a network failure.
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}
