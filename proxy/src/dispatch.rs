//! Untyped method dispatch, used when a call is made by name through an alias.

use crate::error::{Error, Result};
use std::any::{type_name, Any};

/// Arguments of a dispatched call, in declaration order.
pub type Args = Vec<Box<dyn Any + Send>>;

/// The return value of a dispatched call.
pub type Value = Box<dyn Any + Send>;

/// A symbol that can receive calls by method name.
///
/// Proxies declared with [`static_proxy!`](crate::static_proxy) implement this by
/// matching the method name and downcasting each argument to its declared type.
pub trait Dispatch: Send + Sync {
  fn invoke(&self, method: &str, args: Args) -> Result<Value>;
}

/// Unwraps a dispatched return value.
pub fn downcast_value<T: Any>(value: Value) -> Result<T> {
  value
    .downcast::<T>()
    .map(|boxed| *boxed)
    .map_err(|_| Error::ReturnType {
      expected: type_name::<T>(),
    })
}

/// Reads the arguments of one dispatched call in declaration order.
#[doc(hidden)]
pub struct ArgReader<'a> {
  method: &'a str,
  args: std::vec::IntoIter<Box<dyn Any + Send>>,
  index: usize,
  total: usize,
}

impl<'a> ArgReader<'a> {
  /// Fails unless `args` holds exactly `expected` values.
  pub fn new(method: &'a str, args: Args, expected: usize) -> Result<Self> {
    if args.len() != expected {
      return Err(Error::ArgumentCount {
        method: method.to_owned(),
        expected,
        actual: args.len(),
      });
    }
    Ok(Self {
      method,
      total: args.len(),
      args: args.into_iter(),
      index: 0,
    })
  }

  /// Takes the next argument and downcasts it to `T`.
  pub fn take<T: Any>(&mut self) -> Result<T> {
    let index = self.index;
    let arg = self.args.next().ok_or_else(|| Error::ArgumentCount {
      method: self.method.to_owned(),
      expected: index + 1,
      actual: self.total,
    })?;
    self.index += 1;
    arg
      .downcast::<T>()
      .map(|boxed| *boxed)
      .map_err(|_| Error::ArgumentType {
        method: self.method.to_owned(),
        index,
        expected: type_name::<T>(),
      })
  }
}

/// Builds an [`Args`] vector from a list of values.
///
/// ```
/// let args = fibre_proxy::args!["foo".to_string(), 3_u32];
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
  () => {
    $crate::Args::new()
  };
  ($($value:expr),+ $(,)?) => {
    ::std::vec![$(::std::boxed::Box::new($value) as ::std::boxed::Box<dyn ::std::any::Any + ::std::marker::Send>),+]
  };
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reader_checks_arity_and_types() {
    let err = ArgReader::new("push", crate::args![1_u8], 2).err().unwrap();
    assert!(matches!(
      err,
      Error::ArgumentCount {
        expected: 2,
        actual: 1,
        ..
      }
    ));

    let mut reader = ArgReader::new("push", crate::args!["foo".to_string(), 1_u8], 2).unwrap();
    assert_eq!(reader.take::<String>().unwrap(), "foo");

    let err = reader.take::<String>().unwrap_err();
    assert!(matches!(err, Error::ArgumentType { index: 1, .. }));
  }

  #[test]
  fn downcast_value_checks_type() {
    let value: Value = Box::new(Some(5_i32));
    assert_eq!(downcast_value::<Option<i32>>(value).unwrap(), Some(5));

    let value: Value = Box::new(5_i32);
    assert!(matches!(
      downcast_value::<String>(value),
      Err(Error::ReturnType { .. })
    ));
  }
}
