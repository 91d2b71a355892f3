//! Public macros for ergonomic parameter building and service resolution.

/// Builds a [`Parameters`](crate::Parameters) list.
///
/// Use `name => value` pairs for named parameters, or a plain list for
/// positional ones.
///
/// # Examples
///
/// ```
/// use fibre_autowire::params;
///
/// let named = params! { "host" => String::from("localhost"), "port" => 8080_u16 };
/// let positional = params![String::from("localhost"), 8080_u16];
///
/// assert_eq!(named.len(), 2);
/// assert_eq!(positional.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    ($($name:literal => $value:expr),* $(,)?) => {
        $crate::Parameters::new()
            $(.with($name, $value))*
    };

    ($($value:expr),+ $(,)?) => {
        $crate::Parameters::new()
            $(.push($value))+
    };
}

/// Resolves a service from the global container.
///
/// # Panics
///
/// This macro will panic if the service cannot be resolved. For a fallible
/// version, use `global().make(...)` directly.
///
/// # Examples
///
/// ```
/// use fibre_autowire::{global, params, resolve, Instance};
///
/// global().bind_factory("greeting", |_, params| {
///   let name = params.len();
///   Ok(Instance::new(format!("hello x{}", name)))
/// }, false);
///
/// let plain = resolve!("greeting");
/// let with_params = resolve!("greeting", &params! { "name" => "fibre" });
///
/// assert_eq!(*plain.downcast::<String>().unwrap(), "hello x0");
/// assert_eq!(*with_params.downcast::<String>().unwrap(), "hello x1");
/// ```
#[macro_export]
macro_rules! resolve {
    // Arm for plain resolution: resolve!("App\\Mailer")
    ($id:expr) => {
        $crate::global()
            .make($id)
            .unwrap_or_else(|err| {
                panic!("Failed to resolve required service '{}': {}", $id, err)
            })
    };

    // Arm for resolution with explicit parameters: resolve!("App\\Mailer", &params)
    ($id:expr, $params:expr) => {
        $crate::global()
            .make_with($id, $params)
            .unwrap_or_else(|err| {
                panic!("Failed to resolve required service '{}': {}", $id, err)
            })
    };
}
