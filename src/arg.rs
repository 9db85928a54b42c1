//! Argument wrappers
//!
//! Mocked methods box each argument into an [`Arg`] before handing the tuple
//! to the ledger. The variant is chosen explicitly at the call site:
//!
//! | Variant          | Built with                          | Compared by                    |
//! |------------------|-------------------------------------|--------------------------------|
//! | `Arg::Object`    | `Arg::object`, `Arg::shared`        | scalar value, else identity    |
//! | `Arg::Equatable` | `Arg::value`, `Arg::optional`       | `PartialEq` of `T`             |
//! | `Arg::List`      | `Arg::list`, `Arg::map`             | element-wise `PartialEq`       |
//! | `Arg::Nil`       | `Arg::nil`, `Arg::optional(None)`   | only equal to another `Nil`    |
//!
//! Values of different variants never compare equal.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Method or action identifier, compared by its textual description.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Selector(String);

impl Selector {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn description(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Element type for argument slots that only ever hold objects or nil.
///
/// It has no values, so an `Arg<Opaque>` can never be `Equatable`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opaque {}

/// Object-safe equality for values boxed into [`ArgObject::Equatable`].
pub trait DynEq: Any + fmt::Debug {
    fn as_any(&self) -> &dyn Any;

    fn dyn_eq(&self, other: &dyn DynEq) -> bool;
}

impl<T: Any + PartialEq + fmt::Debug> DynEq for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DynEq) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// An opaque argument value.
///
/// Known scalar kinds compare by value, `Equatable` objects through their own
/// `PartialEq`, and everything else by reference identity.
#[derive(Clone)]
pub enum ArgObject {
    Int(i64),
    UInt(u64),
    Double(f64),
    Bool(bool),
    Str(Rc<str>),
    Selector(Selector),
    Equatable(Rc<dyn DynEq>),
    Reference(Rc<dyn Any>),
}

impl ArgObject {
    /// Box a value that is compared with its own `PartialEq`.
    pub fn equatable<T: Any + PartialEq + fmt::Debug>(value: T) -> Self {
        Self::Equatable(Rc::new(value))
    }

    /// Share a reference that is compared by identity only.
    pub fn reference<T: Any>(value: &Rc<T>) -> Self {
        let value: Rc<dyn Any> = value.clone();
        Self::Reference(value)
    }
}

impl PartialEq for ArgObject {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Int(a), Self::UInt(b)) | (Self::UInt(b), Self::Int(a)) => {
                i128::from(*a) == i128::from(*b)
            }
            // Bitwise first so NaN stays reflexive.
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits() || a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Selector(a), Self::Selector(b)) => a.description() == b.description(),
            (Self::Equatable(a), Self::Equatable(b)) => (**a).dyn_eq(&**b),
            (Self::Reference(a), Self::Reference(b)) => {
                Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
            }
            _ => false,
        }
    }
}

impl fmt::Debug for ArgObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v:?}"),
            Self::Selector(v) => write!(f, "#selector({v})"),
            Self::Equatable(v) => write!(f, "{v:?}"),
            Self::Reference(v) => write!(f, "<reference {:p}>", Rc::as_ptr(v)),
        }
    }
}

macro_rules! arg_object_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for ArgObject {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )+
    };
}

arg_object_from! {
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => UInt,
    u16 => UInt,
    u32 => UInt,
    u64 => UInt,
    f32 => Double,
    f64 => Double,
    bool => Bool,
    &str => Str,
    String => Str,
    Selector => Selector,
}

impl From<usize> for ArgObject {
    fn from(value: usize) -> Self {
        Self::UInt(value as u64)
    }
}

impl From<isize> for ArgObject {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

/// A single argument slot.
#[derive(Clone, Debug)]
pub enum Arg<T = Opaque> {
    Object(ArgObject),
    Equatable(T),
    List(Vec<T>),
    Nil,
}

impl<T> Arg<T> {
    pub fn value(value: T) -> Self {
        Self::Equatable(value)
    }

    /// `None` becomes [`Arg::Nil`].
    pub fn optional(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Equatable(value),
            None => Self::Nil,
        }
    }

    pub fn list(values: impl IntoIterator<Item = T>) -> Self {
        Self::List(values.into_iter().collect())
    }

    pub fn nil() -> Self {
        Self::Nil
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }
}

impl Arg<Opaque> {
    pub fn object(value: impl Into<ArgObject>) -> Self {
        Self::Object(value.into())
    }

    pub fn object_optional<O: Into<ArgObject>>(value: Option<O>) -> Self {
        value.map_or(Self::Nil, |value| Self::Object(value.into()))
    }

    /// Compare this slot by the identity of `value`.
    pub fn shared<U: Any>(value: &Rc<U>) -> Self {
        Self::Object(ArgObject::reference(value))
    }
}

impl Arg<String> {
    /// Flatten a map into sorted `"key:value"` entries.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        let mut flattened: Vec<String> = entries
            .into_iter()
            .map(|(key, value)| format!("{key}:{value}"))
            .collect();
        flattened.sort();
        Self::List(flattened)
    }
}

impl<T> From<T> for Arg<T> {
    fn from(value: T) -> Self {
        Self::Equatable(value)
    }
}

impl<T: PartialEq> PartialEq for Arg<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Equatable(a), Self::Equatable(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Nil, Self::Nil) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn scalar_objects_compare_by_value() {
        assert_eq!(Arg::object("arg1"), Arg::object(String::from("arg1")));
        assert_eq!(Arg::object(3_i32), Arg::object(3_u64));
        assert_eq!(Arg::object(1.5_f64), Arg::object(1.5_f64));
        assert_eq!(Arg::object(f64::NAN), Arg::object(f64::NAN));
        assert_ne!(Arg::object(true), Arg::object(1_i64));
        assert_ne!(Arg::object("1"), Arg::object(1_i64));
    }

    #[test]
    fn selectors_compare_by_description() {
        let a = Arg::object(Selector::new("didAppear"));
        let b = Arg::object(Selector::new("didAppear"));
        let c = Arg::object(Selector::new("didDisappear"));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn equatable_objects_use_their_own_equality() {
        let a = Arg::object(ArgObject::equatable(Point { x: 1, y: 2 }));
        let b = Arg::object(ArgObject::equatable(Point { x: 1, y: 2 }));
        let c = Arg::object(ArgObject::equatable(Point { x: 2, y: 1 }));
        let other_type = Arg::object(ArgObject::equatable((1, 2)));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, other_type);
    }

    #[test]
    fn references_compare_by_identity() {
        let first = Rc::new(vec![1, 2, 3]);
        let twin = Rc::new(vec![1, 2, 3]);

        assert_eq!(Arg::shared(&first), Arg::shared(&first.clone()));
        assert_ne!(Arg::shared(&first), Arg::shared(&twin));
    }

    #[test]
    fn nil_only_equals_nil() {
        assert_eq!(Arg::<String>::nil(), Arg::optional(None));
        assert_ne!(Arg::nil(), Arg::value(String::new()));
        assert_ne!(Arg::nil(), Arg::list(Vec::<String>::new()));
        assert_ne!(Arg::<Opaque>::nil(), Arg::object(0_i64));
    }

    #[test]
    fn lists_compare_element_wise() {
        assert_eq!(Arg::list([1, 2, 3]), Arg::list(vec![1, 2, 3]));
        assert_ne!(Arg::list([1, 2, 3]), Arg::list([3, 2, 1]));
        assert_ne!(Arg::list([1, 2]), Arg::list([1, 2, 3]));
    }

    #[test]
    fn maps_flatten_independently_of_iteration_order() {
        let mut first = HashMap::new();
        first.insert("a", 1);
        first.insert("b", 2);
        let second = vec![("b", 2), ("a", 1)];

        assert_eq!(Arg::map(first), Arg::map(second));
        assert_eq!(
            Arg::map([("k", "v")]),
            Arg::list(vec!["k:v".to_string()])
        );
    }

    #[test]
    fn different_variants_never_match() {
        let value: Arg<i64> = Arg::value(1);
        let list: Arg<i64> = Arg::list([1]);
        let object: Arg<i64> = Arg::Object(ArgObject::Int(1));

        assert_ne!(value, list);
        assert_ne!(value, object);
        assert_ne!(list, object);
    }
}
