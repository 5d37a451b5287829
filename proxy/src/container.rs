//! The boundary between static proxies and whatever holds the real instances.

use crate::error::Result;
use std::any::Any;
use std::sync::Arc;

/// A key → instance lookup service.
///
/// Proxies never construct instances themselves; every forwarded call asks the
/// container for the instance registered under the proxy's identifier.
pub trait ServiceContainer: Send + Sync {
  /// Returns the instance registered under `key`, or [`KeyNotFound`](crate::Error::KeyNotFound).
  fn get(&self, key: &str) -> Result<Arc<dyn Any + Send + Sync>>;

  fn has(&self, key: &str) -> bool {
    self.get(key).is_ok()
  }
}

#[cfg(feature = "ioc")]
impl ServiceContainer for fibre_ioc::Container {
  fn get(&self, key: &str) -> Result<Arc<dyn Any + Send + Sync>> {
    self.get_any(key).map_err(Into::into)
  }

  fn has(&self, key: &str) -> bool {
    self.contains(key)
  }
}
