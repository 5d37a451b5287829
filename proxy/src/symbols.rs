//! The symbol table static proxies are looked up in.
//!
//! A [`SymbolTable`] binds names to dispatchable symbols. When a name is not
//! bound yet, the table walks its ordered list of [`Resolver`]s, giving each a
//! chance to bind it, and stops at the first one that does. This is the hook
//! the alias registry plugs itself into.

use crate::dispatch::{Args, Dispatch, Value};
use crate::error::{Error, Result};
use crate::scope::canonical_name;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A bound symbol. Aliases share the `Arc` of the symbol they point at.
pub type Symbol = Arc<dyn Dispatch>;

/// A hook consulted when a name is referenced but not bound.
///
/// Resolvers share the table with unrelated lookups, so a name a resolver does
/// not know about must be ignored rather than reported as an error.
pub trait Resolver: Send + Sync {
  fn resolve(&self, name: &str, symbols: &SymbolTable) -> Result<()>;
}

impl<F> Resolver for F
where
  F: Fn(&str, &SymbolTable) -> Result<()> + Send + Sync,
{
  fn resolve(&self, name: &str, symbols: &SymbolTable) -> Result<()> {
    self(name, symbols)
  }
}

#[derive(Default)]
pub struct SymbolTable {
  symbols: DashMap<String, Symbol>,
  resolvers: RwLock<Vec<Arc<dyn Resolver>>>,
  sealed: AtomicBool,
}

impl SymbolTable {
  pub fn new() -> Self {
    Self::default()
  }

  // --- Definition ---

  /// Defines a concrete symbol under `name`.
  pub fn declare(&self, name: &str, symbol: impl Dispatch + 'static) -> Result<()> {
    self.bind(canonical_name(name), Arc::new(symbol))
  }

  /// Binds `alias` to whatever `target` resolves to.
  ///
  /// Resolving the target may run resolvers. Fails if the target cannot be
  /// resolved or if `alias` is already bound.
  pub fn define_alias(&self, alias: &str, target: &str) -> Result<()> {
    let alias = canonical_name(alias);
    if self.symbols.contains_key(alias) {
      return Err(Error::SymbolExists {
        name: alias.to_owned(),
      });
    }

    let symbol = self
      .resolve(target)?
      .ok_or_else(|| Error::UnresolvableTarget {
        alias: alias.to_owned(),
        target: target.to_owned(),
      })?;

    tracing::trace!(%alias, %target, "Defining symbol alias");
    self.bind(alias, symbol)
  }

  fn bind(&self, name: &str, symbol: Symbol) -> Result<()> {
    match self.symbols.entry(name.to_owned()) {
      Entry::Occupied(_) => Err(Error::SymbolExists {
        name: name.to_owned(),
      }),
      Entry::Vacant(slot) => {
        slot.insert(symbol);
        Ok(())
      }
    }
  }

  // --- Lookup ---

  /// Looks a name up without consulting any resolver.
  pub fn lookup(&self, name: &str) -> Option<Symbol> {
    self
      .symbols
      .get(canonical_name(name))
      .map(|entry| entry.value().clone())
  }

  /// Looks a name up, running the resolvers in order if it is not bound yet.
  ///
  /// Returns `Ok(None)` when no resolver binds the name. Resolver errors are
  /// propagated unchanged.
  pub fn resolve(&self, name: &str) -> Result<Option<Symbol>> {
    let name = canonical_name(name);
    if let Some(symbol) = self.lookup(name) {
      return Ok(Some(symbol));
    }

    // Snapshot so resolvers can re-enter the table without holding the lock.
    let resolvers = self.resolvers.read().clone();
    for resolver in resolvers {
      resolver.resolve(name, self)?;
      if let Some(symbol) = self.lookup(name) {
        return Ok(Some(symbol));
      }
    }

    tracing::trace!(symbol = name, "Symbol left unresolved");
    Ok(None)
  }

  /// Like [`resolve`](Self::resolve), but an unresolved name is an error.
  pub fn get(&self, name: &str) -> Result<Symbol> {
    self.resolve(name)?.ok_or_else(|| Error::SymbolNotFound {
      name: canonical_name(name).to_owned(),
    })
  }

  /// Resolves `name` and invokes `method` on it.
  pub fn call(&self, name: &str, method: &str, args: Args) -> Result<Value> {
    self.get(name)?.invoke(method, args)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.symbols.contains_key(canonical_name(name))
  }

  pub fn len(&self) -> usize {
    self.symbols.len()
  }

  pub fn is_empty(&self) -> bool {
    self.symbols.is_empty()
  }

  // --- Resolvers ---

  /// Installs a resolver, at the front of the list when `prepend` is set.
  ///
  /// Installing the same resolver instance again leaves the list unchanged and
  /// still reports success. Returns `false` once the table has been sealed.
  pub fn register_resolver(&self, resolver: Arc<dyn Resolver>, prepend: bool) -> bool {
    if self.sealed.load(Ordering::Acquire) {
      tracing::warn!("Symbol table is sealed, refusing to install resolver");
      return false;
    }

    let mut resolvers = self.resolvers.write();
    if resolvers.iter().any(|existing| Arc::ptr_eq(existing, &resolver)) {
      return true;
    }
    if prepend {
      resolvers.insert(0, resolver);
    } else {
      resolvers.push(resolver);
    }
    true
  }

  /// Removes a previously installed resolver, returning whether it was present.
  pub fn unregister_resolver(&self, resolver: &Arc<dyn Resolver>) -> bool {
    let mut resolvers = self.resolvers.write();
    let before = resolvers.len();
    resolvers.retain(|existing| !Arc::ptr_eq(existing, resolver));
    resolvers.len() != before
  }

  pub fn resolver_count(&self) -> usize {
    self.resolvers.read().len()
  }

  /// Whether `resolver` is installed and at which position.
  pub fn resolver_position(&self, resolver: &Arc<dyn Resolver>) -> Option<usize> {
    self
      .resolvers
      .read()
      .iter()
      .position(|existing| Arc::ptr_eq(existing, resolver))
  }

  /// Closes the table to new resolvers. Already installed ones keep running.
  pub fn seal(&self) {
    self.sealed.store(true, Ordering::Release);
  }

  pub fn is_sealed(&self) -> bool {
    self.sealed.load(Ordering::Acquire)
  }
}
