//! Stub registry.
//!
//! Per method name, either a single catch-all entry or any number of
//! argument-specific entries. Adding a specific entry on top of a catch-all
//! is refused; adding a catch-all discards the specific entries.

use crate::args::ArgsTuple;
use crate::{logging, MockError, Result};
use std::any::{self, Any};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A stubbed return value. [`StubValue::Nil`] is a deliberate "return nothing",
/// distinct from a method that was never stubbed.
#[derive(Clone)]
pub enum StubValue {
    Value {
        value: Rc<dyn Any>,
        type_name: &'static str,
    },
    Nil,
}

impl StubValue {
    pub fn of<V: Any>(value: V) -> Self {
        Self::Value {
            value: Rc::new(value),
            type_name: any::type_name::<V>(),
        }
    }

    pub fn nil() -> Self {
        Self::Nil
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// `None` for `Nil` or when the stored value is not an `R`.
    pub fn downcast<R: Any + Clone>(&self) -> Option<R> {
        match self {
            Self::Value { value, .. } => value.downcast_ref::<R>().cloned(),
            Self::Nil => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Value { type_name, .. } => *type_name,
            Self::Nil => "nil",
        }
    }
}

impl fmt::Debug for StubValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value { type_name, .. } => write!(f, "Value({type_name})"),
            Self::Nil => f.write_str("Nil"),
        }
    }
}

#[derive(Debug)]
pub struct StubEntry {
    pub pattern: Box<dyn ArgsTuple>,
    pub value: StubValue,
    pub applies_to_all: bool,
}

#[derive(Debug, Default)]
pub struct StubRegistry {
    entries: HashMap<String, Vec<StubEntry>>,
}

impl StubRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        method: &str,
        pattern: Box<dyn ArgsTuple>,
        value: StubValue,
        applies_to_all: bool,
    ) -> Result<()> {
        let entries = self.entries.entry(method.to_string()).or_default();
        let has_catch_all = entries.iter().any(|entry| entry.applies_to_all);

        if applies_to_all {
            if !has_catch_all && !entries.is_empty() {
                logging::log_specific_stubs_superseded(method, entries.len());
            }
            entries.clear();
        } else {
            if has_catch_all {
                return Err(MockError::MethodHasBeenStubbedForAllArguments {
                    method: method.to_string(),
                });
            }
            entries.retain(|entry| !entry.pattern.eq_tuple(&*pattern));
        }

        logging::log_stub_registered(method, applies_to_all, value.type_name());
        entries.push(StubEntry {
            pattern,
            value,
            applies_to_all,
        });
        Ok(())
    }

    /// The value to return for a call, or `None` when nothing applies.
    pub fn resolve(&self, method: &str, args: &dyn ArgsTuple) -> Option<StubValue> {
        let entries = self.entries.get(method)?;
        if let Some(catch_all) = entries.iter().find(|entry| entry.applies_to_all) {
            return Some(catch_all.value.clone());
        }
        entries
            .iter()
            .find(|entry| entry.pattern.eq_tuple(args))
            .map(|entry| entry.value.clone())
    }

    pub fn entries(&self, method: &str) -> &[StubEntry] {
        self.entries
            .get(method)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn remove(&mut self, method: &str) {
        self.entries.remove(method);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
