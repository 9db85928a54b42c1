//! Invocation router.
//!
//! Every mocked method calls one of the `register_call*` entry points. Outside
//! a probe the call is appended to the ledger; inside a probe (see
//! [`CallHandler::capture_method_call`]) it only becomes the method's pattern.
//! The capture state cycles `Idle -> Capturing -> {PatternRecorded | Unrecorded}`
//! and is always back to `Idle` when a probe returns.

use crate::args::ArgsTuple;
use crate::assertions::{CollectingReporter, Failure, FailureReporter, PanicReporter};
use crate::config::{Config, ReportMode};
use crate::ledger::Ledger;
use crate::stubs::{StubRegistry, StubValue};
use crate::{logging, MockError, Result};
use std::any::{self, Any};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Per-mock call ledger, stub registry and capture state.
///
/// Single-threaded by construction: it is neither `Send` nor `Sync`.
pub struct CallHandler {
    pub(crate) ledger: RefCell<Ledger>,
    pub(crate) stubs: RefCell<StubRegistry>,
    capturing: Cell<bool>,
    probed: RefCell<Vec<String>>,
    reporter: Rc<dyn FailureReporter>,
    trace_calls: bool,
}

/// Resets the capture flag even if the probe panics.
struct CaptureGuard<'a>(&'a Cell<bool>);

impl Drop for CaptureGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl Default for CallHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CallHandler {
    pub fn new() -> Self {
        Self::with_reporter(Rc::new(PanicReporter))
    }

    pub fn with_reporter(reporter: Rc<dyn FailureReporter>) -> Self {
        Self {
            ledger: RefCell::new(Ledger::new()),
            stubs: RefCell::new(StubRegistry::new()),
            capturing: Cell::new(false),
            probed: RefCell::new(Vec::new()),
            reporter,
            trace_calls: true,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let reporter: Rc<dyn FailureReporter> = match config.reporting.mode {
            ReportMode::Panic => Rc::new(PanicReporter),
            ReportMode::Collect => Rc::new(CollectingReporter::new()),
        };
        let mut handler = Self::with_reporter(reporter);
        handler.trace_calls = config.logging.trace_calls;
        handler
    }

    /// Handler configured from `.probemock.toml`, or defaults.
    pub fn from_config_file() -> Self {
        Self::from_config(&Config::load_or_default())
    }

    pub fn reporter(&self) -> &Rc<dyn FailureReporter> {
        &self.reporter
    }

    /// Failures the reporter has collected, removed so that dropping it
    /// afterwards is clean. Always empty with the panicking reporter.
    pub fn take_failures(&self) -> Vec<Failure> {
        self.reporter.take_failures()
    }

    /// Run `probe` once and return the name of the mocked method it called.
    ///
    /// Nothing the probe calls is recorded as a real call. When it calls
    /// several mocked methods, the last one wins and the patterns of the
    /// others are dropped.
    pub fn capture_method_call<R>(&self, probe: impl FnOnce() -> R) -> Result<String> {
        self.probed.borrow_mut().clear();
        self.capturing.set(true);
        let guard = CaptureGuard(&self.capturing);

        let _ = probe();
        drop(guard);

        let mut probed = self.probed.take();
        let Some(method) = probed.pop() else {
            logging::log_probe_unrecorded();
            return Err(MockError::MethodNotMocked);
        };

        let mut ledger = self.ledger.borrow_mut();
        for other in probed.iter().filter(|other| **other != method) {
            ledger.clear_pattern(other);
            logging::log_pattern_discarded(other, &method);
        }
        Ok(method)
    }

    /// Record a call and return the stub that applies to it, if any.
    pub fn record_call(&self, method: &str, args: Box<dyn ArgsTuple>) -> Option<StubValue> {
        let stubbed = self.stubs.borrow().resolve(method, &*args);
        let arity = args.arity();

        if self.capturing.get() {
            self.ledger.borrow_mut().record_pattern(method, args);
            self.probed.borrow_mut().push(method.to_string());
            if self.trace_calls {
                logging::log_pattern_captured(method, arity);
            }
        } else {
            self.ledger.borrow_mut().record_real(method, args);
            if self.trace_calls {
                logging::log_call_recorded(method, arity);
            }
        }

        stubbed
    }

    /// Entry point for methods without a return value.
    pub fn register_call<A: ArgsTuple>(&self, method: &str, args: A) {
        let _ = self.record_call(method, Box::new(args));
    }

    /// Entry point for methods returning `R`; `default` applies when unstubbed.
    pub fn register_call_returning<A, R>(&self, method: &str, args: A, default: R) -> R
    where
        A: ArgsTuple,
        R: Any + Clone,
    {
        match self.record_call(method, Box::new(args)) {
            None => default,
            Some(StubValue::Nil) => {
                logging::log_nil_for_required_return(method);
                default
            }
            Some(stub) => stub.downcast::<R>().unwrap_or_else(|| {
                logging::log_stub_type_mismatch(method, any::type_name::<R>(), stub.type_name());
                default
            }),
        }
    }

    /// Entry point for methods returning `Option<T>`; a nil stub yields `None`.
    pub fn register_call_optional<A, T>(
        &self,
        method: &str,
        args: A,
        default: Option<T>,
    ) -> Option<T>
    where
        A: ArgsTuple,
        T: Any + Clone,
    {
        match self.record_call(method, Box::new(args)) {
            None => default,
            Some(StubValue::Nil) => None,
            Some(stub) => {
                if let Some(value) = stub.downcast::<Option<T>>() {
                    return value;
                }
                if let Some(value) = stub.downcast::<T>() {
                    return Some(value);
                }
                logging::log_stub_type_mismatch(
                    method,
                    any::type_name::<Option<T>>(),
                    stub.type_name(),
                );
                default
            }
        }
    }

    /// Number of real calls recorded for `method`.
    pub fn call_count(&self, method: &str) -> usize {
        self.ledger.borrow().count(method)
    }

    /// Debug renderings of the argument tuples recorded for `method`.
    pub fn recorded_calls(&self, method: &str) -> Vec<String> {
        self.ledger
            .borrow()
            .history(method)
            .map(|history| {
                history
                    .calls()
                    .iter()
                    .map(|call| format!("{:?}", call.args))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Forget every recorded call and stub.
    pub fn reset(&self) {
        self.ledger.borrow_mut().clear();
        self.stubs.borrow_mut().clear();
        self.probed.borrow_mut().clear();
        self.capturing.set(false);
    }
}

impl fmt::Debug for CallHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallHandler")
            .field("ledger", &self.ledger)
            .field("stubs", &self.stubs)
            .field("capturing", &self.capturing.get())
            .field("trace_calls", &self.trace_calls)
            .finish_non_exhaustive()
    }
}
