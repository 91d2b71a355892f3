use fibre_autowire::{params, Callable, Container, Function, Instance, MethodDescriptor, Parameter, TypeDescriptor};

struct Inventory {
  items: Vec<&'static str>,
}

fn main() {
  let container = Container::new();

  container.register(
    TypeDescriptor::concrete("Inventory").construct(|_| {
      Ok(Instance::new(Inventory {
        items: vec!["bolt", "nut", "washer"],
      }))
    }),
  );
  container.bind_self("Inventory", true);

  container.register(
    TypeDescriptor::concrete("Report")
      .construct(|_| Ok(Instance::unit()))
      .method(
        MethodDescriptor::new("render", |_, args| {
          let inventory = args.get::<Inventory>("inventory")?;
          let title = args.value::<String>("title")?;
          Ok(Instance::new(format!("{}: {}", title, inventory.items.join(", "))))
        })
        .param(Parameter::service("inventory", "Inventory"))
        .param(Parameter::value("title").default_value(String::from("Stock"))),
      ),
  );

  // --- [object, method] form ---
  let report = container.make("Report").unwrap();
  let rendered = container
    .call(&Callable::method(&report, "render"))
    .unwrap();
  println!("{}", rendered.downcast::<String>().unwrap());

  // --- "Class::method" form, overriding a parameter by name ---
  let rendered = container
    .call_method(
      &Callable::parse("Report::render").unwrap(),
      &params! { "title" => String::from("Warehouse") },
    )
    .unwrap();
  println!("{}", rendered.downcast::<String>().unwrap());

  // --- Plain function ---
  let count = Function::new("count", |args| {
    Ok(Instance::new(args.get::<Inventory>("inventory")?.items.len()))
  })
  .param(Parameter::service("inventory", "Inventory"));
  let total = container.call(&count.into()).unwrap();
  println!("Items in stock: {}", total.downcast::<usize>().unwrap());
}
