//! The proxy manager ties the alias registry, the symbol table, the container
//! and the proxy binding together. It is what clients interact with at runtime.

use crate::config::ProxyConfig;
use crate::container::ServiceContainer;
use crate::dispatch::{Args, Dispatch, Value};
use crate::error::Result;
use crate::proxy::ProxyBinding;
use crate::registry::AliasRegistry;
use crate::scope::ResolutionScope;
use crate::symbols::SymbolTable;
use parking_lot::RwLock;
use std::sync::Arc;

pub struct ProxyManager {
  container: RwLock<Arc<dyn ServiceContainer>>,
  registry: Arc<AliasRegistry>,
  symbols: Arc<SymbolTable>,
  binding: ProxyBinding,
}

impl ProxyManager {
  /// Creates a manager with a fresh registry and a fresh binding.
  pub fn new(container: Arc<dyn ServiceContainer>, symbols: Arc<SymbolTable>) -> Self {
    Self {
      container: RwLock::new(container),
      registry: Arc::new(AliasRegistry::new()),
      symbols,
      binding: ProxyBinding::new(),
    }
  }

  /// Uses `registry` instead of a fresh one.
  pub fn with_registry(mut self, registry: Arc<AliasRegistry>) -> Self {
    self.registry = registry;
    self
  }

  /// Binds the container into `binding` instead of a fresh one, so proxies
  /// created elsewhere share it.
  ///
  /// Call this before [`declare_proxy`](Self::declare_proxy): proxies built
  /// from the previous binding keep reading the previous slot. A container
  /// already bound into the previous slot is bound into `binding` too.
  pub fn with_binding(mut self, binding: ProxyBinding) -> Self {
    if self.binding.is_configured() {
      binding.set_container(self.container.read().clone());
    }
    self.binding = binding;
    self
  }

  /// Enables static proxies: installs the registry into the symbol table and
  /// binds the container into the proxies.
  ///
  /// Already enabled managers return `true` without touching anything. If the
  /// registry cannot be installed the container is left unbound and `false`
  /// is returned.
  pub fn enable(&self, scope: ResolutionScope) -> bool {
    if self.registry.is_registered() {
      return true;
    }

    if self.registry.register(&self.symbols, scope) {
      self.binding.set_container(self.container.read().clone());
      tracing::debug!("Static proxies enabled");
    }

    self.registry.is_registered()
  }

  pub fn is_enabled(&self) -> bool {
    self.registry.is_registered()
  }

  /// Adds an alias for the proxy symbol named `proxy`.
  pub fn add_proxy(&self, alias: &str, proxy: &str) -> Result<&Self> {
    self.registry.add_alias(alias, proxy)?;
    Ok(self)
  }

  /// Defines a proxy symbol in the symbol table under `name`.
  pub fn declare_proxy(&self, name: &str, proxy: impl Dispatch + 'static) -> Result<&Self> {
    self.symbols.declare(name, proxy)?;
    Ok(self)
  }

  /// Replaces the container and rebinds it right away, enabled or not.
  pub fn set_container(&self, container: Arc<dyn ServiceContainer>) -> &Self {
    *self.container.write() = container.clone();
    self.binding.set_container(container);
    self
  }

  /// Adds every configured alias, then enables with the configured scope.
  pub fn apply_config(&self, config: &ProxyConfig) -> Result<bool> {
    for (alias, proxy) in &config.aliases {
      self.add_proxy(alias, proxy)?;
    }
    Ok(self.enable(config.scope.clone()))
  }

  /// Calls `method` on the symbol `name` resolves to.
  pub fn call(&self, name: &str, method: &str, args: Args) -> Result<Value> {
    self.symbols.call(name, method, args)
  }

  pub fn container(&self) -> Arc<dyn ServiceContainer> {
    self.container.read().clone()
  }

  pub fn binding(&self) -> &ProxyBinding {
    &self.binding
  }

  pub fn registry(&self) -> &Arc<AliasRegistry> {
    &self.registry
  }

  pub fn symbols(&self) -> &Arc<SymbolTable> {
    &self.symbols
  }
}
