//! The main `Container` struct and its associated methods.

use crate::core::{Provider, ResolutionGuard, SharedInstance};
use crate::error::ContainerError;
use dashmap::DashMap;
use std::any::Any;
use std::sync::Arc;

/// The Inversion of Control (IoC) container.
///
/// Services are registered under string keys. The container is thread-safe
/// and allows registration and resolution at any point of the application's
/// lifecycle. Registering a key twice replaces the earlier provider.
#[derive(Default)]
pub struct Container {
  providers: DashMap<String, Provider>,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- Registration ---

  /// Registers an already constructed value.
  pub fn add_instance<T: Any + Send + Sync>(&self, key: &str, instance: T) {
    self.add_shared(key, Arc::new(instance));
  }

  /// Registers a value that is already behind an `Arc`, keeping the caller's handle
  /// pointing at the same instance the container hands out.
  pub fn add_shared<T: Any + Send + Sync>(&self, key: &str, instance: Arc<T>) {
    self
      .providers
      .insert(key.to_owned(), Provider::ready(instance));
  }

  /// Registers a factory that is run once, on first resolution.
  pub fn add_singleton<T: Any + Send + Sync>(
    &self,
    key: &str,
    factory: impl Fn() -> T + Send + Sync + 'static,
  ) {
    let provider = Provider::lazy(Box::new(move || Arc::new(factory()) as SharedInstance));
    self.providers.insert(key.to_owned(), provider);
  }

  /// Registers a factory that is run on every resolution.
  pub fn add_transient<T: Any + Send + Sync>(
    &self,
    key: &str,
    factory: impl Fn() -> T + Send + Sync + 'static,
  ) {
    let provider = Provider::Transient {
      factory: Box::new(move || Arc::new(factory()) as SharedInstance),
    };
    self.providers.insert(key.to_owned(), provider);
  }

  /// Removes a registration, returning whether one existed.
  pub fn remove(&self, key: &str) -> bool {
    self.providers.remove(key).is_some()
  }

  // --- Inspection ---

  pub fn contains(&self, key: &str) -> bool {
    self.providers.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.providers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.providers.is_empty()
  }

  /// Returns the registered keys in no particular order.
  pub fn keys(&self) -> Vec<String> {
    self.providers.iter().map(|entry| entry.key().clone()).collect()
  }

  // --- Resolution ---

  /// Resolves a service without knowing its concrete type.
  pub fn get_any(&self, key: &str) -> Result<SharedInstance, ContainerError> {
    // Fails on a circular dependency; cleans the stack up again when `get_any` returns.
    let _guard = ResolutionGuard::enter(key)?;

    let provider = self
      .providers
      .get(key)
      .ok_or_else(|| ContainerError::NotFound {
        key: key.to_owned(),
      })?;

    provider.value().instance().ok_or_else(|| ContainerError::NotFound {
      key: key.to_owned(),
    })
  }

  /// Resolves a service and downcasts it to `T`.
  pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>, ContainerError> {
    self
      .get_any(key)?
      .downcast::<T>()
      .map_err(|_| ContainerError::TypeMismatch {
        key: key.to_owned(),
        expected: std::any::type_name::<T>(),
      })
  }
}
