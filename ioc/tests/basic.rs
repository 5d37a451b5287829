use fibre_ioc::{Container, ContainerError};
use std::sync::Arc;

// --- Test Fixtures ---

#[derive(Debug, PartialEq, Eq)]
struct SimpleService {
  id: u32,
}

// --- Basic Tests ---

#[test]
fn test_singleton_factory() {
  // Arrange
  let container = Container::new();
  container.add_singleton("simple", || SimpleService { id: 101 });

  // Act
  let r1 = container.get::<SimpleService>("simple").unwrap();
  let r2 = container.get::<SimpleService>("simple").unwrap();

  // Assert
  assert_eq!(r1.id, 101);
  // Ensure it's a singleton by checking pointer equality.
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_instance_registration() {
  let container = Container::new();
  container.add_instance("named_instance", SimpleService { id: 202 });

  let r1 = container.get::<SimpleService>("named_instance").unwrap();
  let r2 = container.get::<SimpleService>("named_instance").unwrap();

  assert_eq!(r1.id, 202);
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_shared_registration_keeps_callers_handle() {
  let container = Container::new();
  let shared = Arc::new(SimpleService { id: 7 });
  container.add_shared("shared", shared.clone());

  let resolved = container.get::<SimpleService>("shared").unwrap();

  assert!(Arc::ptr_eq(&shared, &resolved));
}

#[test]
fn test_transient_factory() {
  let container = Container::new();
  container.add_transient("transient", || SimpleService { id: 303 });

  let r1 = container.get::<SimpleService>("transient").unwrap();
  let r2 = container.get::<SimpleService>("transient").unwrap();

  assert_eq!(r1.id, 303);
  assert_eq!(r2.id, 303);
  // Ensure it's a transient by checking the pointers are different.
  assert!(!Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_missing_key_is_not_found() {
  let container = Container::new();

  let err = container.get::<SimpleService>("missing").unwrap_err();

  assert_eq!(
    err,
    ContainerError::NotFound {
      key: "missing".to_string()
    }
  );
}

#[test]
fn test_wrong_type_is_a_mismatch() {
  let container = Container::new();
  container.add_instance("number", 42_u32);

  let err = container.get::<String>("number").unwrap_err();

  assert!(matches!(err, ContainerError::TypeMismatch { ref key, .. } if key == "number"));
  // The untyped lookup still succeeds.
  assert!(container.get_any("number").is_ok());
}

#[test]
fn test_inspection_and_removal() {
  let container = Container::new();
  assert!(container.is_empty());

  container.add_instance("a", 1_u8);
  container.add_instance("b", 2_u8);

  let mut keys = container.keys();
  keys.sort();
  assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
  assert_eq!(container.len(), 2);
  assert!(container.contains("a"));

  assert!(container.remove("a"));
  assert!(!container.remove("a"));
  assert!(!container.contains("a"));
  assert_eq!(container.len(), 1);
}
