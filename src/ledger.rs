//! Call history ledger.
//!
//! One [`CallHistory`] per method name: the calls the code under test made,
//! in order, plus the pattern captured by the most recent probe.

use crate::args::ArgsTuple;
use std::collections::HashMap;

/// A single real invocation.
#[derive(Debug)]
pub struct CallRecord {
    pub method: String,
    pub args: Box<dyn ArgsTuple>,
}

#[derive(Debug, Default)]
pub struct CallHistory {
    calls: Vec<CallRecord>,
    pattern: Option<Box<dyn ArgsTuple>>,
}

impl CallHistory {
    pub fn count(&self) -> usize {
        self.calls.len()
    }

    pub fn calls(&self) -> &[CallRecord] {
        &self.calls
    }

    pub fn pattern(&self) -> Option<&dyn ArgsTuple> {
        self.pattern.as_deref()
    }

    /// With `check_all`, every recorded call must equal the pattern;
    /// otherwise one is enough. No pattern or no calls never matches.
    pub fn matches(&self, check_all: bool) -> bool {
        let Some(pattern) = self.pattern.as_deref() else {
            return false;
        };
        if self.calls.is_empty() {
            return false;
        }
        if check_all {
            self.calls.iter().all(|call| call.args.eq_tuple(pattern))
        } else {
            self.calls.iter().any(|call| call.args.eq_tuple(pattern))
        }
    }
}

#[derive(Debug, Default)]
pub struct Ledger {
    histories: HashMap<String, CallHistory>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_real(&mut self, method: &str, args: Box<dyn ArgsTuple>) {
        self.histories
            .entry(method.to_string())
            .or_default()
            .calls
            .push(CallRecord {
                method: method.to_string(),
                args,
            });
    }

    pub fn record_pattern(&mut self, method: &str, args: Box<dyn ArgsTuple>) {
        self.histories
            .entry(method.to_string())
            .or_default()
            .pattern = Some(args);
    }

    pub fn count(&self, method: &str) -> usize {
        self.histories.get(method).map_or(0, CallHistory::count)
    }

    pub fn has_history(&self, method: &str) -> bool {
        self.count(method) > 0
    }

    pub fn matches(&self, method: &str, check_all: bool) -> bool {
        self.histories
            .get(method)
            .is_some_and(|history| history.matches(check_all))
    }

    pub fn history(&self, method: &str) -> Option<&CallHistory> {
        self.histories.get(method)
    }

    pub fn take_pattern(&mut self, method: &str) -> Option<Box<dyn ArgsTuple>> {
        self.histories
            .get_mut(method)
            .and_then(|history| history.pattern.take())
    }

    pub fn clear_pattern(&mut self, method: &str) {
        if let Some(history) = self.histories.get_mut(method) {
            history.pattern = None;
        }
    }

    pub fn clear(&mut self) {
        self.histories.clear();
    }
}
