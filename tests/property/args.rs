use probemock::{Arg, Args2, ArgsTuple};
use proptest::prelude::*;

use super::utils::{object_arg, string_arg};

proptest! {
    #[test]
    fn test_string_arg_equality_is_reflexive(arg in string_arg()) {
        prop_assert_eq!(&arg, &arg.clone());
    }

    #[test]
    fn test_object_arg_equality_is_reflexive(arg in object_arg()) {
        prop_assert_eq!(&arg, &arg.clone());
    }

    #[test]
    fn test_arg_equality_is_symmetric(a in object_arg(), b in object_arg()) {
        prop_assert_eq!(a == b, b == a);
    }

    #[test]
    fn test_nil_only_equals_nil(arg in string_arg()) {
        prop_assert_eq!(arg == Arg::nil(), arg.is_nil());
    }

    #[test]
    fn test_tuple_equality_is_slot_conjunction(
        a1 in string_arg(),
        a2 in object_arg(),
        b1 in string_arg(),
        b2 in object_arg(),
    ) {
        let left = Args2::new(a1.clone(), a2.clone());
        let right = Args2::new(b1.clone(), b2.clone());

        prop_assert_eq!(left == right, a1 == b1 && a2 == b2);
        prop_assert_eq!(left.eq_tuple(&right), left == right);
    }
}
