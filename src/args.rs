//! Fixed-arity argument tuples.
//!
//! `Args0` through `Args6` hold one [`Arg`] per positional parameter. Two
//! tuples are equal when every slot is equal. The ledger stores tuples behind
//! [`ArgsTuple`] so one map can hold every method's history; comparing tuples
//! of different shapes yields `false`.

use crate::arg::Arg;
use std::any::Any;
use std::fmt;

/// Type-erased argument tuple.
pub trait ArgsTuple: fmt::Debug + 'static {
    fn arity(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn eq_tuple(&self, other: &dyn ArgsTuple) -> bool;
}

/// Arguments of a method or property that takes none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Args0;

impl ArgsTuple for Args0 {
    fn arity(&self) -> usize {
        0
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_tuple(&self, other: &dyn ArgsTuple) -> bool {
        other.as_any().is::<Self>()
    }
}

macro_rules! args_tuple {
    ($name:ident, $arity:expr, $($field:ident: $ty:ident),+) => {
        #[derive(Clone, Debug)]
        pub struct $name<$($ty),+> {
            $(pub $field: Arg<$ty>,)+
        }

        impl<$($ty),+> $name<$($ty),+> {
            pub fn new($($field: Arg<$ty>),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl<$($ty: PartialEq),+> PartialEq for $name<$($ty),+> {
            fn eq(&self, other: &Self) -> bool {
                $(self.$field == other.$field)&&+
            }
        }

        impl<$($ty: PartialEq + fmt::Debug + 'static),+> ArgsTuple for $name<$($ty),+> {
            fn arity(&self) -> usize {
                $arity
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn eq_tuple(&self, other: &dyn ArgsTuple) -> bool {
                other
                    .as_any()
                    .downcast_ref::<Self>()
                    .is_some_and(|other| self == other)
            }
        }
    };
}

args_tuple!(Args1, 1, arg1: A1);
args_tuple!(Args2, 2, arg1: A1, arg2: A2);
args_tuple!(Args3, 3, arg1: A1, arg2: A2, arg3: A3);
args_tuple!(Args4, 4, arg1: A1, arg2: A2, arg3: A3, arg4: A4);
args_tuple!(Args5, 5, arg1: A1, arg2: A2, arg3: A3, arg4: A4, arg5: A5);
args_tuple!(Args6, 6, arg1: A1, arg2: A2, arg3: A3, arg4: A4, arg5: A5, arg6: A6);
