//! The alias registry: short names bound lazily, the first time they are referenced.

use crate::error::{Error, Result};
use crate::scope::{split_name, ResolutionScope};
use crate::symbols::{Resolver, SymbolTable};
use parking_lot::{Condvar, Mutex, RwLock};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread::{self, ThreadId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Activation {
  /// The alias is being defined right now by the given thread, possibly
  /// further up its call stack.
  Pending(ThreadId),
  Active,
}

/// Maps short aliases to fully-qualified targets and binds them on demand.
///
/// Once [`register`](Self::register)ed with a [`SymbolTable`], the registry
/// sits first in the table's resolver list. Referencing an unbound name whose
/// last segment is a known alias binds that alias into the namespace picked by
/// the [`ResolutionScope`], exactly once per namespace.
#[derive(Debug, Default)]
pub struct AliasRegistry {
  aliases: RwLock<HashMap<String, String>>,
  activations: Mutex<HashMap<String, Activation>>,
  settled: Condvar,
  scope: Mutex<Option<ResolutionScope>>,
}

impl AliasRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds a registry that already knows `aliases`. Later pairs win over
  /// earlier ones with the same alias.
  pub fn with_aliases<I, A, T>(aliases: I) -> Self
  where
    I: IntoIterator<Item = (A, T)>,
    A: Into<String>,
    T: Into<String>,
  {
    let aliases = aliases
      .into_iter()
      .map(|(alias, target)| (alias.into(), target.into()))
      .collect();
    Self {
      aliases: RwLock::new(aliases),
      ..Self::default()
    }
  }

  /// Adds an alias for `target`. An alias can only be added once.
  pub fn add_alias(&self, alias: &str, target: &str) -> Result<&Self> {
    match self.aliases.write().entry(alias.to_owned()) {
      Entry::Occupied(_) => {
        return Err(Error::DuplicateAlias {
          alias: alias.to_owned(),
        })
      }
      Entry::Vacant(slot) => {
        slot.insert(target.to_owned());
      }
    }
    tracing::debug!(%alias, %target, "Added alias");
    Ok(self)
  }

  pub fn target_of(&self, alias: &str) -> Option<String> {
    self.aliases.read().get(alias).cloned()
  }

  /// All known aliases and their targets, sorted by alias.
  pub fn aliases(&self) -> Vec<(String, String)> {
    let mut aliases: Vec<_> = self
      .aliases
      .read()
      .iter()
      .map(|(alias, target)| (alias.clone(), target.clone()))
      .collect();
    aliases.sort();
    aliases
  }

  pub fn is_registered(&self) -> bool {
    self.scope.lock().is_some()
  }

  /// The scope aliases are bound into; `None` until registered.
  pub fn scope(&self) -> Option<ResolutionScope> {
    self.scope.lock().clone()
  }

  /// Whether the alias behind `scoped_key` (namespace + alias) has been bound.
  pub fn is_activated(&self, scoped_key: &str) -> bool {
    self.activations.lock().get(scoped_key) == Some(&Activation::Active)
  }

  /// Installs the registry as the first resolver of `symbols`.
  ///
  /// Does nothing and returns `true` if already registered; the scope given
  /// the first time sticks. Returns `false` if the table refused the resolver.
  pub fn register(self: &Arc<Self>, symbols: &SymbolTable, scope: ResolutionScope) -> bool {
    let mut current = self.scope.lock();
    if current.is_some() {
      return true;
    }

    let scope = scope.normalized();
    if !symbols.register_resolver(self.clone(), true) {
      tracing::warn!(?scope, "Alias registry could not be installed");
      return false;
    }

    tracing::debug!(?scope, "Alias registry installed");
    *current = Some(scope);
    true
  }

  /// Binds the alias named by `name`, if there is one.
  ///
  /// Names whose last segment is not a known alias are ignored. The alias is
  /// bound at most once per namespace. Re-entrant references made by the
  /// thread defining the binding do nothing; other threads wait until it is
  /// settled. A scoped name that is already bound is left as it is.
  pub fn load(&self, name: &str, symbols: &SymbolTable) -> Result<()> {
    let (caller, alias) = split_name(name);
    let Some(target) = self.target_of(alias) else {
      return Ok(());
    };

    let scope = self.scope().unwrap_or_default();
    let scoped_key = format!("{}{}", scope.namespace_for(caller), alias);
    let me = thread::current().id();

    let mut activations = self.activations.lock();
    loop {
      match activations.get(&scoped_key).copied() {
        Some(Activation::Active) => return Ok(()),
        Some(Activation::Pending(owner)) if owner == me => return Ok(()),
        Some(Activation::Pending(_)) => self.settled.wait(&mut activations),
        None => break,
      }
    }
    if symbols.contains(&scoped_key) {
      tracing::trace!(%scoped_key, "Alias name already bound, leaving it alone");
      return Ok(());
    }
    activations.insert(scoped_key.clone(), Activation::Pending(me));
    drop(activations);

    tracing::trace!(reference = name, %scoped_key, %target, "Activating alias");
    let outcome = match symbols.define_alias(&scoped_key, &target) {
      // Declared directly while the target was being resolved.
      Err(Error::SymbolExists { .. }) if symbols.contains(&scoped_key) => Ok(false),
      other => other.map(|()| true),
    };

    let mut activations = self.activations.lock();
    let result = match outcome {
      Ok(true) => {
        activations.insert(scoped_key, Activation::Active);
        Ok(())
      }
      Ok(false) => {
        activations.remove(&scoped_key);
        Ok(())
      }
      Err(err) => {
        // Let a later reference try again.
        activations.remove(&scoped_key);
        Err(err)
      }
    };
    drop(activations);
    self.settled.notify_all();
    result
  }
}

impl Resolver for AliasRegistry {
  fn resolve(&self, name: &str, symbols: &SymbolTable) -> Result<()> {
    self.load(name, symbols)
  }
}
