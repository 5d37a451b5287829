use thiserror::Error;

/// The main error type for the `fibre_proxy` library.
#[derive(Debug, Error)]
pub enum Error {
  #[error("The alias '{alias}' has already been added and cannot be modified")]
  DuplicateAlias { alias: String },

  #[error("{operation} is not supported on {proxy}; concrete proxies must override it")]
  UnsupportedOperation {
    operation: &'static str,
    proxy: &'static str,
  },

  #[error("No container has been configured for static proxies")]
  ContainerNotConfigured,

  #[error("The container has no service registered under key '{key}'")]
  KeyNotFound { key: String },

  #[error("The service under key '{key}' is not a {expected}")]
  TypeMismatch { key: String, expected: &'static str },

  #[error("Container failure: {0}")]
  Container(String),

  #[error("The symbol '{name}' is already defined")]
  SymbolExists { name: String },

  #[error("The symbol '{name}' could not be resolved")]
  SymbolNotFound { name: String },

  #[error("Cannot alias '{alias}': target '{target}' could not be resolved")]
  UnresolvableTarget { alias: String, target: String },

  #[error("{proxy} has no forwarded method '{method}'")]
  UnknownMethod { proxy: &'static str, method: String },

  #[error("{method} expects {expected} argument(s), got {actual}")]
  ArgumentCount {
    method: String,
    expected: usize,
    actual: usize,
  },

  #[error("Argument {index} of {method} is not a {expected}")]
  ArgumentType {
    method: String,
    index: usize,
    expected: &'static str,
  },

  #[error("Return value is not a {expected}")]
  ReturnType { expected: &'static str },

  #[error("Configuration file not found: {0}")]
  ConfigNotFound(String),

  #[error("Failed to read configuration file: {0}")]
  ConfigRead(#[from] std::io::Error),

  #[error("Failed to parse configuration: {0}")]
  ConfigParse(String),
}

/// A specialized `Result` type for `fibre_proxy` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(feature = "ioc")]
impl From<fibre_ioc::ContainerError> for Error {
  fn from(err: fibre_ioc::ContainerError) -> Self {
    match err {
      fibre_ioc::ContainerError::NotFound { key } => Error::KeyNotFound { key },
      fibre_ioc::ContainerError::TypeMismatch { key, expected } => {
        Error::TypeMismatch { key, expected }
      }
      other => Error::Container(other.to_string()),
    }
  }
}
