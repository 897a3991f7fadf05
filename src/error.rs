use std::path::PathBuf;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for one generation run.
///
/// `Discovery`, `Load` and `Scan` are recoverable: the offending app, file or
/// function is skipped and the run continues. `Output` is fatal.
#[derive(Debug)]
pub enum Error {
    Discovery { app: String, message: String },
    Load { file: PathBuf, message: String },
    Scan { module: String, function: String, message: String },
    Output { message: String },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Discovery { app, message } => {
                write!(f, "Error processing app '{}': {}", app, message)
            }
            Error::Load { file, message } => {
                write!(f, "Error loading file {}: {}", file.display(), message)
            }
            Error::Scan {
                module,
                function,
                message,
            } => write!(
                f,
                "Error processing function {} in module {}: {}",
                function, module, message
            ),
            Error::Output { message } => write!(f, "Output error: {}", message),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Output {
            message: format!("JSON serialization failed: {}", err),
        }
    }
}
