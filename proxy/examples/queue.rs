use fibre_ioc::Container;
use fibre_proxy::{
  args, downcast_value, static_proxy, ProxyManager, ResolutionScope, SymbolTable,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Default)]
pub struct WorkQueue(Mutex<VecDeque<String>>);

impl WorkQueue {
  pub fn enqueue(&self, item: String) {
    self.0.lock().push_back(item);
  }

  pub fn dequeue(&self) -> Option<String> {
    self.0.lock().pop_front()
  }
}

static_proxy! {
  pub struct QueueProxy for WorkQueue => "queue" {
    fn enqueue(&self, item: String);
    fn dequeue(&self) -> Option<String>;
  }
}

fn main() -> fibre_proxy::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")))
    .init();

  // --- Registration ---
  let container = Arc::new(Container::new());
  container.add_singleton("queue", WorkQueue::default);

  let manager = ProxyManager::new(container, Arc::new(SymbolTable::new()));
  manager
    .declare_proxy("app::proxies::QueueProxy", QueueProxy::new(manager.binding().clone()))?
    .add_proxy("Queue", "app::proxies::QueueProxy")?;

  if !manager.enable(ResolutionScope::Global) {
    println!("Static proxies could not be enabled.");
    return Ok(());
  }

  // --- Use ---
  // `Queue` is bound the first time it is referenced.
  manager.call("Queue", "enqueue", args!["first job".to_string()])?;
  manager.call("Queue", "enqueue", args!["second job".to_string()])?;

  // Under the global scope only the bare alias is bound.
  let scoped = manager.call("billing::Queue", "dequeue", args![]);
  println!("billing::Queue resolved: {}", scoped.is_ok());

  let next = downcast_value::<Option<String>>(manager.call("Queue", "dequeue", args![])?)?;
  println!("Dequeued through the alias: {:?}", next);

  // The typed proxy reaches the same instance.
  let proxy = QueueProxy::new(manager.binding().clone());
  println!("Dequeued through the proxy: {:?}", proxy.dequeue()?);

  Ok(())
}
