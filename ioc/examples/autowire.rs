use fibre_autowire::{Container, Instance, Parameter, TypeDescriptor};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger {
  prefix: String,
}
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[{}]: {}", self.prefix, message);
  }
}

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}

impl ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    self.logger.log("Finished report generation.");
  }
}

fn main() {
  let container = Container::new();

  // --- Describe the types ---
  container.register(TypeDescriptor::interface("Logger"));
  container.register(
    TypeDescriptor::concrete("ConsoleLogger")
      .param(Parameter::value("prefix").default_value(String::from("CONSOLE LOG")))
      .construct(|args| {
        let logger = ConsoleLogger {
          prefix: args.value::<String>("prefix")?,
        };
        Ok(Instance::from_trait::<dyn Logger>(Arc::new(logger)))
      }),
  );
  container.register(
    TypeDescriptor::concrete("ReportService")
      .param(Parameter::service("logger", "Logger"))
      .construct(|args| {
        Ok(Instance::new(ReportService {
          logger: args.get_trait::<dyn Logger>("logger")?,
        }))
      }),
  );

  // --- Bind the abstraction ---
  // ReportService never names ConsoleLogger; the container wires it in.
  container.singleton("Logger", "ConsoleLogger");

  println!("Resolving the high-level service...");
  let report_service = container.resolve::<ReportService>("ReportService").unwrap();

  println!("Using the service...");
  report_service.generate_report();
}
