use fibre_autowire::{global, resolve, Instance};
use std::sync::atomic::{AtomicUsize, Ordering};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn tracker() -> Instance {
  Instance::new(RequestTracker {
    id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
  })
}

fn main() {
  // --- Shared Binding ---
  // This factory will only be called ONCE.
  global().bind_factory("singleton_tracker", |_, _| {
    println!("Creating SINGLETON RequestTracker...");
    Ok(tracker())
  }, true);

  // --- Transient Binding ---
  // This factory will be called EVERY time the service is resolved.
  global().bind_factory("transient_tracker", |_, _| {
    println!("Creating TRANSIENT RequestTracker...");
    Ok(tracker())
  }, false);

  println!("--- Resolving Singletons ---");
  let s1 = resolve!("singleton_tracker");
  let s2 = resolve!("singleton_tracker");
  let id1 = s1.downcast::<RequestTracker>().unwrap().id;
  let id2 = s2.downcast::<RequestTracker>().unwrap().id;
  println!("Singleton 1 ID: {}, Singleton 2 ID: {}", id1, id2);
  assert!(Instance::ptr_eq(&s1, &s2), "Singleton instances should be identical");

  println!("--- Resolving Transients ---");
  let t1 = resolve!("transient_tracker");
  let t2 = resolve!("transient_tracker");
  assert!(!Instance::ptr_eq(&t1, &t2), "Transient instances should be different");

  // --- Rebinding evicts the cached singleton ---
  global().bind_factory("singleton_tracker", |_, _| Ok(tracker()), true);
  let s3 = resolve!("singleton_tracker");
  assert!(!Instance::ptr_eq(&s1, &s3));
  println!("Rebinding produced a fresh singleton, as expected.");
}
