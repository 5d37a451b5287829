//! Core, non-public data structures for the IoC container.

use crate::error::ContainerError;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::Arc;

/// A type-erased, shareable service instance as stored in the container.
pub type SharedInstance = Arc<dyn Any + Send + Sync>;

pub(crate) type Factory = Box<dyn Fn() -> SharedInstance + Send + Sync>;

thread_local! {
  // Keys currently being resolved on this thread. A key showing up twice
  // means a factory asked for itself, directly or through other services.
  static RESOLVING_STACK: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
}

/// An RAII guard to detect circular dependencies.
///
/// Entering adds the key to the thread-local resolution stack and fails if the
/// key is already there. Dropping the guard removes the key again.
pub(crate) struct ResolutionGuard {
  key: String,
}

impl ResolutionGuard {
  pub(crate) fn enter(key: &str) -> Result<Self, ContainerError> {
    RESOLVING_STACK.with(|stack| {
      // `insert` returns `false` if the value was already present.
      if !stack.borrow_mut().insert(key.to_owned()) {
        return Err(ContainerError::CircularDependency {
          key: key.to_owned(),
        });
      }
      Ok(Self {
        key: key.to_owned(),
      })
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&self.key);
    });
  }
}

pub(crate) enum Provider {
  Singleton {
    cell: once_cell::sync::OnceCell<SharedInstance>,
    factory: Option<Factory>,
  },
  Transient {
    factory: Factory,
  },
}

impl Provider {
  pub(crate) fn ready(instance: SharedInstance) -> Self {
    Provider::Singleton {
      cell: once_cell::sync::OnceCell::with_value(instance),
      factory: None,
    }
  }

  pub(crate) fn lazy(factory: Factory) -> Self {
    Provider::Singleton {
      cell: once_cell::sync::OnceCell::new(),
      factory: Some(factory),
    }
  }

  pub(crate) fn instance(&self) -> Option<SharedInstance> {
    match self {
      Provider::Singleton { cell, factory } => match cell.get() {
        Some(instance) => Some(instance.clone()),
        None => factory
          .as_ref()
          .map(|factory| cell.get_or_init(factory).clone()),
      },
      Provider::Transient { factory } => Some(factory()),
    }
  }
}
