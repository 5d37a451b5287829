use fibre_ioc::Container;
use fibre_proxy::{
  args, downcast_value, static_proxy, BaseProxy, Dispatch, Error, ProxyBinding, ServiceContainer,
  StaticProxy,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

// --- Test Fixtures ---

#[derive(Debug, Default)]
pub struct WorkQueue {
  items: Mutex<VecDeque<String>>,
}

impl WorkQueue {
  pub fn enqueue(&self, item: String) {
    self.items.lock().push_back(item);
  }

  pub fn dequeue(&self) -> Option<String> {
    self.items.lock().pop_front()
  }

  pub fn is_empty(&self) -> bool {
    self.items.lock().is_empty()
  }

  pub fn len(&self) -> usize {
    self.items.lock().len()
  }
}

static_proxy! {
  /// Forwards to the work queue registered under "queue".
  pub struct QueueProxy for WorkQueue => "queue" {
    fn enqueue(&self, item: String);
    fn dequeue(&self) -> Option<String>;
    fn is_empty(&self) -> bool;
    fn len(&self) -> usize;
  }
}

fn container_with_queue() -> (Arc<Container>, Arc<WorkQueue>) {
  let queue = Arc::new(WorkQueue::default());
  let container = Arc::new(Container::new());
  container.add_shared("queue", queue.clone());
  (container, queue)
}

// --- Tests ---

#[test]
fn test_error_when_using_base_proxy_directly() {
  let base = BaseProxy::new(ProxyBinding::new());

  let err = base.instance_identifier().unwrap_err();

  assert!(matches!(
    err,
    Error::UnsupportedOperation {
      operation: "instance_identifier",
      ..
    }
  ));
  // Forwarding through the base fails the same way, before the container is consulted.
  assert!(matches!(
    base.instance(),
    Err(Error::UnsupportedOperation { .. })
  ));
}

#[test]
fn test_error_when_container_not_set() {
  let proxy = QueueProxy::new(ProxyBinding::new());

  assert!(matches!(proxy.instance(), Err(Error::ContainerNotConfigured)));
  assert!(matches!(
    proxy.enqueue("foo".to_string()),
    Err(Error::ContainerNotConfigured)
  ));
}

#[test]
fn test_can_set_and_use_container() {
  let (container, queue) = container_with_queue();
  let binding = ProxyBinding::new();
  let proxy = QueueProxy::new(binding.clone());

  binding.set_container(container);

  assert!(proxy.is_empty().unwrap());
  proxy.enqueue("foo".to_string()).unwrap();
  assert_eq!(queue.len(), 1);
  assert_eq!(proxy.instance_identifier().unwrap(), "queue");
  assert!(Arc::ptr_eq(&proxy.instance().unwrap(), &queue));
}

#[test]
fn test_binding_is_shared_between_proxies() {
  let binding = ProxyBinding::new();
  let first = QueueProxy::new(binding.clone());
  let second = QueueProxy::new(binding.clone());
  let (container, _queue) = container_with_queue();

  // Setting through a third clone reaches both proxies.
  binding.clone().set_container(container);

  first.enqueue("a".to_string()).unwrap();
  assert_eq!(second.dequeue().unwrap().as_deref(), Some("a"));
}

#[test]
fn test_swapping_the_container_takes_effect_on_next_call() {
  let binding = ProxyBinding::new();
  let proxy = QueueProxy::new(binding.clone());

  let (first, first_queue) = container_with_queue();
  let (second, second_queue) = container_with_queue();

  binding.set_container(first);
  proxy.enqueue("one".to_string()).unwrap();

  let previous = binding.set_container(second);
  assert!(previous.is_some());
  proxy.enqueue("two".to_string()).unwrap();

  assert_eq!(first_queue.dequeue().as_deref(), Some("one"));
  assert_eq!(second_queue.dequeue().as_deref(), Some("two"));
}

#[test]
fn test_replacing_the_instance_takes_effect_on_next_call() {
  let (container, old_queue) = container_with_queue();
  let binding = ProxyBinding::new();
  binding.set_container(container.clone());
  let proxy = QueueProxy::new(binding);

  proxy.enqueue("old".to_string()).unwrap();
  container.add_instance("queue", WorkQueue::default());
  proxy.enqueue("new".to_string()).unwrap();

  assert_eq!(old_queue.len(), 1);
  assert_eq!(proxy.dequeue().unwrap().as_deref(), Some("new"));
}

#[test]
fn test_missing_key_surfaces_from_container() {
  let binding = ProxyBinding::new();
  binding.set_container(Arc::new(Container::new()));
  let proxy = QueueProxy::new(binding);

  let err = proxy.instance().unwrap_err();

  assert!(matches!(err, Error::KeyNotFound { ref key } if key == "queue"));
}

#[test]
fn test_wrong_instance_type_is_a_mismatch() {
  let container = Arc::new(Container::new());
  container.add_instance("queue", 42_u32);
  let binding = ProxyBinding::new();
  binding.set_container(container);

  let err = QueueProxy::new(binding).instance().unwrap_err();

  assert!(matches!(err, Error::TypeMismatch { ref key, .. } if key == "queue"));
}

#[test]
fn test_cleared_binding_is_unconfigured_again() {
  let (container, _queue) = container_with_queue();
  let binding = ProxyBinding::new();
  binding.set_container(container);
  assert!(binding.is_configured());

  binding.clear();

  assert!(!binding.is_configured());
  assert!(matches!(
    QueueProxy::new(binding).len(),
    Err(Error::ContainerNotConfigured)
  ));
}

#[test]
fn test_container_has_checks_keys() {
  let (container, _queue) = container_with_queue();
  let container: Arc<dyn ServiceContainer> = container;

  assert!(container.has("queue"));
  assert!(!container.has("cache"));
}

// --- Dispatch ---

#[test]
fn test_invoke_routes_by_method_name() {
  let (container, _queue) = container_with_queue();
  let binding = ProxyBinding::new();
  binding.set_container(container);
  let proxy = QueueProxy::new(binding);

  proxy.invoke("enqueue", args!["foo".to_string()]).unwrap();
  let len = proxy.invoke("len", args![]).unwrap();
  assert_eq!(downcast_value::<usize>(len).unwrap(), 1);

  let instance = proxy.invoke("instance", args![]).unwrap();
  let instance = downcast_value::<Arc<WorkQueue>>(instance).unwrap();
  assert_eq!(instance.dequeue().as_deref(), Some("foo"));
}

#[test]
fn test_invoke_rejects_bad_calls() {
  let (container, _queue) = container_with_queue();
  let binding = ProxyBinding::new();
  binding.set_container(container);
  let proxy = QueueProxy::new(binding);

  assert!(matches!(
    proxy.invoke("peek", args![]),
    Err(Error::UnknownMethod { proxy: "QueueProxy", ref method }) if method == "peek"
  ));
  assert!(matches!(
    proxy.invoke("enqueue", args![]),
    Err(Error::ArgumentCount {
      expected: 1,
      actual: 0,
      ..
    })
  ));
  assert!(matches!(
    proxy.invoke("enqueue", args![7_u32]),
    Err(Error::ArgumentType { index: 0, .. })
  ));
  assert!(matches!(
    proxy.invoke("instance", args![1_u8]),
    Err(Error::ArgumentCount { .. })
  ));
}
