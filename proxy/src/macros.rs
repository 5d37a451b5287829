//! Public macros for declaring static proxies.

/// Declares a static proxy for a service type.
///
/// The generated struct holds a [`ProxyBinding`](crate::ProxyBinding) and
/// gets:
///
/// - one typed method per declared method, forwarding to the live instance
///   and returning `Result<R>`;
/// - a [`StaticProxy`](crate::StaticProxy) impl whose identifier is the
///   given key;
/// - a [`Dispatch`](crate::Dispatch) impl routing `"instance"` and every
///   declared method by name, so the proxy can be called through an alias.
///
/// Declared methods must take `&self` and return owned, `Send` values.
///
/// # Examples
///
/// ```
/// use fibre_proxy::{static_proxy, ProxyBinding};
/// use std::sync::atomic::{AtomicU64, Ordering};
///
/// #[derive(Default)]
/// pub struct Counter(AtomicU64);
///
/// impl Counter {
///     pub fn bump(&self, by: u64) -> u64 {
///         self.0.fetch_add(by, Ordering::SeqCst) + by
///     }
/// }
///
/// static_proxy! {
///     pub struct CounterProxy for Counter => "counter" {
///         fn bump(&self, by: u64) -> u64;
///     }
/// }
///
/// let proxy = CounterProxy::new(ProxyBinding::new());
/// assert!(proxy.bump(1).is_err()); // no container bound yet
/// ```
#[macro_export]
macro_rules! static_proxy {
  (
    $(#[$meta:meta])*
    $vis:vis struct $name:ident for $target:ty => $key:literal {
      $(
        $(#[$method_meta:meta])*
        fn $method:ident(&self $(, $arg:ident : $arg_ty:ty)*) $(-> $ret:ty)?;
      )*
    }
  ) => {
    $(#[$meta])*
    #[derive(Debug, Clone)]
    $vis struct $name {
      binding: $crate::ProxyBinding,
    }

    impl $name {
      /// The container key this proxy forwards to.
      pub const IDENTIFIER: &'static str = $key;

      pub fn new(binding: $crate::ProxyBinding) -> Self {
        Self { binding }
      }

      $(
        $(#[$method_meta])*
        pub fn $method(&self $(, $arg: $arg_ty)*) -> $crate::Result<$crate::__proxy_return!($($ret)?)> {
          $crate::StaticProxy::forward(self, |target| target.$method($($arg),*))
        }
      )*
    }

    impl $crate::StaticProxy for $name {
      type Target = $target;

      fn binding(&self) -> &$crate::ProxyBinding {
        &self.binding
      }

      fn instance_identifier(&self) -> $crate::Result<&str> {
        Ok(Self::IDENTIFIER)
      }
    }

    impl $crate::Dispatch for $name {
      fn invoke(&self, method: &str, args: $crate::Args) -> $crate::Result<$crate::Value> {
        match method {
          "instance" => {
            $crate::dispatch::ArgReader::new(method, args, 0)?;
            let instance = $crate::StaticProxy::instance(self)?;
            Ok(::std::boxed::Box::new(instance))
          }
          $(
            stringify!($method) => {
              #[allow(unused_mut, unused_variables)]
              let mut reader =
                $crate::dispatch::ArgReader::new(method, args, $crate::__proxy_count!($($arg)*))?;
              $(
                let $arg: $arg_ty = reader.take()?;
              )*
              let value = self.$method($($arg),*)?;
              Ok(::std::boxed::Box::new(value))
            }
          )*
          _ => Err($crate::Error::UnknownMethod {
            proxy: stringify!($name),
            method: method.to_owned(),
          }),
        }
      }
    }
  };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __proxy_return {
  () => { () };
  ($ret:ty) => { $ret };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __proxy_count {
  () => { 0usize };
  ($head:ident $($tail:ident)*) => { 1usize + $crate::__proxy_count!($($tail)*) };
}
