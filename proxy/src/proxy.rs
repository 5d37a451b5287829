//! Static proxies: stable handles whose calls land on an instance fetched
//! from the container at call time.

use crate::container::ServiceContainer;
use crate::error::{Error, Result};
use parking_lot::RwLock;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// The container slot shared by every proxy built from clones of one binding.
///
/// Replacing the container through any clone is visible to all of them on
/// their next call.
#[derive(Clone, Default)]
pub struct ProxyBinding {
  slot: Arc<RwLock<Option<Arc<dyn ServiceContainer>>>>,
}

impl ProxyBinding {
  pub fn new() -> Self {
    Self::default()
  }

  /// Replaces the container, returning the previous one.
  pub fn set_container(
    &self,
    container: Arc<dyn ServiceContainer>,
  ) -> Option<Arc<dyn ServiceContainer>> {
    tracing::debug!("Binding container into static proxies");
    self.slot.write().replace(container)
  }

  pub fn clear(&self) -> Option<Arc<dyn ServiceContainer>> {
    self.slot.write().take()
  }

  pub fn is_configured(&self) -> bool {
    self.slot.read().is_some()
  }

  /// The current container, or [`Error::ContainerNotConfigured`].
  pub fn container(&self) -> Result<Arc<dyn ServiceContainer>> {
    self.slot.read().clone().ok_or(Error::ContainerNotConfigured)
  }

  /// Fetches the instance under `key` and downcasts it to `T`.
  pub fn resolve<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>> {
    self
      .container()?
      .get(key)?
      .downcast::<T>()
      .map_err(|_| Error::TypeMismatch {
        key: key.to_owned(),
        expected: type_name::<T>(),
      })
  }
}

impl fmt::Debug for ProxyBinding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ProxyBinding")
      .field("configured", &self.is_configured())
      .finish()
  }
}

/// A proxy forwarding to the container instance named by its identifier.
///
/// Implementors supply the target type, the binding they read the container
/// from, and override [`instance_identifier`](Self::instance_identifier).
/// Nothing is cached: each call fetches the instance again, so swapping the
/// container or the instance inside it takes effect on the next call.
pub trait StaticProxy {
  type Target: Any + Send + Sync;

  fn binding(&self) -> &ProxyBinding;

  /// The container key this proxy forwards to.
  ///
  /// The provided implementation only defines the contract and always fails
  /// with [`Error::UnsupportedOperation`].
  fn instance_identifier(&self) -> Result<&str> {
    Err(Error::UnsupportedOperation {
      operation: "instance_identifier",
      proxy: type_name::<Self>(),
    })
  }

  /// The live instance behind the proxy.
  fn instance(&self) -> Result<Arc<Self::Target>> {
    let key = self.instance_identifier()?;
    tracing::trace!(proxy = type_name::<Self>(), key, "Fetching proxied instance");
    self.binding().resolve::<Self::Target>(key)
  }

  /// Runs `call` against the live instance and returns its result.
  fn forward<R>(&self, call: impl FnOnce(&Self::Target) -> R) -> Result<R> {
    let instance = self.instance()?;
    Ok(call(&*instance))
  }
}

/// The bare proxy base, with no identifier of its own.
#[derive(Debug, Clone, Default)]
pub struct BaseProxy {
  binding: ProxyBinding,
}

impl BaseProxy {
  pub fn new(binding: ProxyBinding) -> Self {
    Self { binding }
  }
}

impl StaticProxy for BaseProxy {
  type Target = ();

  fn binding(&self) -> &ProxyBinding {
    &self.binding
  }
}
