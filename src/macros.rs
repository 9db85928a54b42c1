/// Name of the enclosing function, without its module or type path.
///
/// This is the default key a mocked method records itself under, so two
/// methods with the same name on one mock share a history.
#[macro_export]
macro_rules! method_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let mut name = type_name_of(f);
        name = name.strip_suffix("::f").unwrap_or(name);
        while let Some(outer) = name.strip_suffix("::{{closure}}") {
            name = outer;
        }
        match name.rfind("::") {
            Some(pos) => &name[pos + 2..],
            None => name,
        }
    }};
}

/// Forward the enclosing mocked method to a [`CallHandler`](crate::CallHandler).
///
/// ```text
/// register_call!(self.handler)                              // no args, no return
/// register_call!(self.handler, args: Args1::new(..))        // args, no return
/// register_call!(self.handler, default: value)              // returns R
/// register_call!(self.handler, args: .., default: value)
/// register_call!(self.handler, optional: None)              // returns Option<T>
/// register_call!(self.handler, args: .., optional: value)
/// ```
///
/// The method is keyed by [`method_name!`]. A leading `name: "..."`
/// overrides the key, e.g. `register_call!(self.handler, name: "inbox.count", default: 0)`.
#[macro_export]
macro_rules! register_call {
    ($handler:expr, name: $name:expr, args: $args:expr, default: $default:expr $(,)?) => {
        $handler.register_call_returning($name, $args, $default)
    };
    ($handler:expr, name: $name:expr, args: $args:expr, optional: $default:expr $(,)?) => {
        $handler.register_call_optional($name, $args, $default)
    };
    ($handler:expr, name: $name:expr, args: $args:expr $(,)?) => {
        $handler.register_call($name, $args)
    };
    ($handler:expr, name: $name:expr, default: $default:expr $(,)?) => {
        $handler.register_call_returning($name, $crate::Args0, $default)
    };
    ($handler:expr, name: $name:expr, optional: $default:expr $(,)?) => {
        $handler.register_call_optional($name, $crate::Args0, $default)
    };
    ($handler:expr, name: $name:expr $(,)?) => {
        $handler.register_call($name, $crate::Args0)
    };
    ($handler:expr, args: $args:expr, default: $default:expr $(,)?) => {
        $handler.register_call_returning($crate::method_name!(), $args, $default)
    };
    ($handler:expr, args: $args:expr, optional: $default:expr $(,)?) => {
        $handler.register_call_optional($crate::method_name!(), $args, $default)
    };
    ($handler:expr, args: $args:expr $(,)?) => {
        $handler.register_call($crate::method_name!(), $args)
    };
    ($handler:expr, default: $default:expr $(,)?) => {
        $handler.register_call_returning($crate::method_name!(), $crate::Args0, $default)
    };
    ($handler:expr, optional: $default:expr $(,)?) => {
        $handler.register_call_optional($crate::method_name!(), $crate::Args0, $default)
    };
    ($handler:expr $(,)?) => {
        $handler.register_call($crate::method_name!(), $crate::Args0)
    };
}
