use probemock::{Arg, Args1, CallHandler, StubOptions};
use proptest::prelude::*;

fn lookup(handler: &CallHandler, key: &str) -> String {
    handler.register_call_returning(
        "lookup",
        Args1::new(Arg::value(key.to_string())),
        "default".to_string(),
    )
}

proptest! {
    #[test]
    fn test_last_stub_per_argument_wins(
        stubs in prop::collection::vec(("[a-c]", "[a-z]{1,5}"), 1..12),
    ) {
        let handler = CallHandler::new();
        for (key, value) in &stubs {
            handler
                .stub(StubOptions::default(), value.clone(), || lookup(&handler, key))
                .unwrap();
        }

        for key in ["a", "b", "c"] {
            let expected = stubs
                .iter()
                .rev()
                .find(|(k, _)| k == key)
                .map_or("default", |(_, v)| v.as_str());
            prop_assert_eq!(lookup(&handler, key), expected);
        }
        prop_assert_eq!(handler.call_count("lookup"), 3);
    }
}
