//! Namespaced names and the policy deciding where an alias is bound.

use serde::Deserialize;

/// Separator between namespace segments, e.g. `app::proxies::Queue`.
pub const SEPARATOR: &str = "::";

/// Where an alias gets bound when it is first referenced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionScope {
  /// Always bind into the root namespace.
  #[default]
  Global,
  /// Bind into whichever namespace the reference occurred in.
  Caller,
  /// Always bind into the given namespace.
  Fixed(String),
}

impl ResolutionScope {
  /// Builds a `Fixed` scope with a canonical namespace.
  pub fn fixed(namespace: impl AsRef<str>) -> Self {
    Self::Fixed(namespace.as_ref().to_owned()).normalized()
  }

  /// Canonicalises a `Fixed` namespace so it ends in exactly one separator.
  /// A namespace that is empty after trimming collapses to `Global`.
  pub fn normalized(self) -> Self {
    match self {
      Self::Fixed(namespace) => {
        let namespace = canonical_namespace(&namespace);
        if namespace.is_empty() {
          Self::Global
        } else {
          Self::Fixed(namespace)
        }
      }
      other => other,
    }
  }

  /// The namespace an alias referenced from `caller` is bound into.
  pub fn namespace_for<'a>(&'a self, caller: &'a str) -> &'a str {
    match self {
      Self::Global => "",
      Self::Caller => caller,
      Self::Fixed(namespace) => namespace,
    }
  }
}

/// Strips a leading root separator: `::Queue` and `Queue` are the same name.
pub fn canonical_name(name: &str) -> &str {
  name.trim_start_matches(SEPARATOR)
}

/// Splits a name into its namespace (separator included) and its short name.
pub fn split_name(name: &str) -> (&str, &str) {
  let name = canonical_name(name);
  match name.rfind(SEPARATOR) {
    Some(pos) => name.split_at(pos + SEPARATOR.len()),
    None => ("", name),
  }
}

fn canonical_namespace(namespace: &str) -> String {
  let trimmed = namespace
    .trim_start_matches(SEPARATOR)
    .trim_end_matches(SEPARATOR);
  if trimmed.is_empty() {
    String::new()
  } else {
    format!("{trimmed}{SEPARATOR}")
  }
}
