//! # Fibre IoC
//!
//! A flexible, thread-safe Inversion of Control (IoC) container for Rust.
//!
//! Services are registered under string keys and may be added at any point
//! during the application's lifecycle. The container hands out shared,
//! type-erased instances which callers downcast to the type they expect.
//!
//! ## Core Concepts
//!
//! - **Container**: The central registry for all your services.
//! - **Providers**: A key is backed by a ready instance, a lazy singleton
//!   factory or a transient factory.
//! - **Resolution**: `get::<T>(key)` returns `Result<Arc<T>, ContainerError>`,
//!   failing when the key is missing, holds another type, or its factory
//!   depends on itself.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_ioc::Container;
//!
//! struct Greeter {
//!     message: String,
//! }
//!
//! let container = Container::new();
//! container.add_instance("greeting_message", String::from("Hello, World!"));
//!
//! // Factories may resolve other services from the same container.
//! let handle = std::sync::Arc::new(container);
//! let inner = handle.clone();
//! handle.add_singleton("greeter", move || Greeter {
//!     message: (*inner.get::<String>("greeting_message").unwrap()).clone(),
//! });
//!
//! let greeter = handle.get::<Greeter>("greeter").unwrap();
//! assert_eq!(greeter.message, "Hello, World!");
//! ```

mod container;
mod core;
mod error;

pub use crate::core::SharedInstance;
pub use container::Container;
pub use error::ContainerError;
