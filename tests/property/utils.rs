use probemock::{Arg, ArgObject, Opaque, Selector};
use proptest::prelude::*;

pub fn string_arg() -> impl Strategy<Value = Arg<String>> {
    prop_oneof![
        "[a-z]{0,8}".prop_map(Arg::value),
        prop::collection::vec("[a-z]{0,4}", 0..4).prop_map(Arg::list),
        Just(Arg::nil()),
    ]
}

pub fn object_arg() -> impl Strategy<Value = Arg<Opaque>> {
    prop_oneof![
        any::<i64>().prop_map(Arg::object),
        any::<u32>().prop_map(Arg::object),
        any::<f64>().prop_map(Arg::object),
        any::<bool>().prop_map(Arg::object),
        "[a-z]{0,8}".prop_map(Arg::object),
        "[a-z]{1,8}:".prop_map(|s| Arg::object(Selector::new(s))),
        (0i32..4).prop_map(|n| Arg::object(ArgObject::equatable(n))),
        Just(Arg::nil()),
    ]
}
