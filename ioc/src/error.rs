use thiserror::Error;

/// Errors returned when resolving a service from a [`Container`](crate::Container).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
  #[error("no service registered under key '{key}'")]
  NotFound { key: String },

  #[error("service '{key}' is not of the requested type {expected}")]
  TypeMismatch { key: String, expected: &'static str },

  #[error("circular dependency detected while resolving service '{key}'")]
  CircularDependency { key: String },
}
