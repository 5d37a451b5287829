//! # Fibre Proxy
//!
//! Static proxies over an IoC container: short, stable names whose calls are
//! forwarded to a service instance looked up in the container at call time.
//!
//! ## Core Concepts
//!
//! - **Symbol table**: names bound to dispatchable symbols, with an ordered
//!   list of resolvers consulted when a name is not bound yet.
//! - **Alias registry**: maps short aliases to proxy symbols and binds an
//!   alias the first time it is referenced, into the namespace chosen by the
//!   [`ResolutionScope`].
//! - **Static proxies**: declared with [`static_proxy!`], they fetch their
//!   instance from the container behind a shared [`ProxyBinding`] on every
//!   call.
//! - **Manager**: [`ProxyManager`] owns the container, the registry and the
//!   binding and switches everything on with `enable`.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_ioc::Container;
//! use fibre_proxy::{args, downcast_value, static_proxy, ProxyManager, ResolutionScope, SymbolTable};
//! use parking_lot::Mutex;
//! use std::collections::VecDeque;
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! pub struct WorkQueue(Mutex<VecDeque<String>>);
//!
//! impl WorkQueue {
//!     pub fn enqueue(&self, item: String) {
//!         self.0.lock().push_back(item);
//!     }
//!     pub fn dequeue(&self) -> Option<String> {
//!         self.0.lock().pop_front()
//!     }
//! }
//!
//! static_proxy! {
//!     pub struct QueueProxy for WorkQueue => "queue" {
//!         fn enqueue(&self, item: String);
//!         fn dequeue(&self) -> Option<String>;
//!     }
//! }
//!
//! let container = Arc::new(Container::new());
//! container.add_instance("queue", WorkQueue::default());
//!
//! let manager = ProxyManager::new(container, Arc::new(SymbolTable::new()));
//! manager.declare_proxy("app::proxies::QueueProxy", QueueProxy::new(manager.binding().clone())).unwrap();
//! manager.add_proxy("Queue", "app::proxies::QueueProxy").unwrap();
//! assert!(manager.enable(ResolutionScope::Global));
//!
//! manager.call("Queue", "enqueue", args!["foo".to_string()]).unwrap();
//! let next = manager.call("Queue", "dequeue", args![]).unwrap();
//! assert_eq!(downcast_value::<Option<String>>(next).unwrap(), Some("foo".to_string()));
//! ```

mod config;
mod container;
pub mod dispatch;
mod error;
mod macros;
mod manager;
mod proxy;
mod registry;
mod scope;
mod symbols;

pub use config::{find_config_file, find_config_file_in, ProxyConfig};
pub use container::ServiceContainer;
pub use dispatch::{downcast_value, Args, Dispatch, Value};
pub use error::{Error, Result};
pub use manager::ProxyManager;
pub use proxy::{BaseProxy, ProxyBinding, StaticProxy};
pub use registry::AliasRegistry;
pub use scope::{canonical_name, split_name, ResolutionScope, SEPARATOR};
pub use symbols::{Resolver, Symbol, SymbolTable};
