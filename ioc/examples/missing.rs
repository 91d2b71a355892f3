use fibre_autowire::{global, resolve, Error, Parameter, TypeDescriptor, Instance};
use std::panic;

fn main() {
  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a service that was never registered...");

  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _service = resolve!("UnregisteredService");
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `make()` method ---
  println!("\nNow, attempting to resolve using the fallible `make()` method...");

  match global().make("UnregisteredService") {
    Err(Error::NotInstantiable(target)) => println!("Correctly failed: {} is not instantiable.", target),
    other => panic!("Should not have found the service! {:?}", other),
  }

  // --- A primitive parameter with no value and no default ---
  global().register(
    TypeDescriptor::concrete("Port")
      .param(Parameter::value("number"))
      .construct(|args| Ok(Instance::new(args.value::<u16>("number")?))),
  );
  match global().make("Port") {
    Err(err) => println!("Expected failure: {}", err),
    Ok(_) => panic!("Port needs an explicit number"),
  }
}
