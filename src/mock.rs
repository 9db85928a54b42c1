//! Verify, reject and stub.
//!
//! Each operation first runs the probe closure to learn which method it
//! names and with which pattern. A probe that reaches no mocked method
//! always fails with [`MockError::MethodNotMocked`].

use crate::handler::CallHandler;
use crate::stubs::StubValue;
use crate::{logging, MockError, Result};
use std::any::Any;

/// What `verify` checks beyond "the method was called".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Exact number of real calls expected.
    pub expected_call_count: Option<usize>,
    /// Compare recorded arguments with the probe's arguments. With an
    /// expected count every call must match, otherwise one is enough.
    pub check_arguments: bool,
}

impl VerifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn times(count: usize) -> Self {
        Self {
            expected_call_count: Some(count),
            check_arguments: false,
        }
    }

    pub fn with_arguments(mut self) -> Self {
        self.check_arguments = true;
        self
    }

    pub fn with_call_count(mut self, count: usize) -> Self {
        self.expected_call_count = Some(count);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StubOptions {
    /// `false` registers a catch-all stub for the method.
    pub check_arguments: bool,
}

impl Default for StubOptions {
    fn default() -> Self {
        Self {
            check_arguments: true,
        }
    }
}

impl StubOptions {
    pub fn any_arguments() -> Self {
        Self {
            check_arguments: false,
        }
    }
}

impl CallHandler {
    pub fn verify<R>(&self, options: VerifyOptions, probe: impl FnOnce() -> R) -> Result<()> {
        let method = self.capture_method_call(probe)?;
        let outcome = self.verification_outcome(&method, options);
        self.ledger.borrow_mut().clear_pattern(&method);

        if let Err(err) = &outcome {
            logging::log_operation_failed("verify", err);
        }
        outcome
    }

    /// Fails with [`MockError::MethodWasCalled`] if the probed method has been
    /// called at all, whatever its arguments.
    pub fn reject<R>(&self, probe: impl FnOnce() -> R) -> Result<()> {
        self.rejection_outcome("reject", VerifyOptions::new(), probe)
    }

    /// Fails with [`MockError::MethodWasCalled`] only if a recorded call
    /// matches the probe's arguments.
    pub fn reject_matching<R>(&self, probe: impl FnOnce() -> R) -> Result<()> {
        self.rejection_outcome("reject_matching", VerifyOptions::new().with_arguments(), probe)
    }

    /// Register `value` for the call the probe makes.
    pub fn stub<R: Any>(
        &self,
        options: StubOptions,
        value: R,
        probe: impl FnOnce() -> R,
    ) -> Result<()> {
        self.register_stub(options, StubValue::of(value), probe)
    }

    /// Make the probed call return `None`, as opposed to its default.
    pub fn stub_nil<T>(
        &self,
        options: StubOptions,
        probe: impl FnOnce() -> Option<T>,
    ) -> Result<()> {
        self.register_stub(options, StubValue::nil(), probe)
    }

    fn register_stub<R>(
        &self,
        options: StubOptions,
        value: StubValue,
        probe: impl FnOnce() -> R,
    ) -> Result<()> {
        let method = self.capture_method_call(probe)?;
        let pattern = self
            .ledger
            .borrow_mut()
            .take_pattern(&method)
            .ok_or(MockError::MethodNotMocked)?;

        let outcome = self
            .stubs
            .borrow_mut()
            .add(&method, pattern, value, !options.check_arguments);
        if let Err(err) = &outcome {
            logging::log_operation_failed("stub", err);
        }
        outcome
    }

    fn rejection_outcome<R>(
        &self,
        operation: &str,
        options: VerifyOptions,
        probe: impl FnOnce() -> R,
    ) -> Result<()> {
        let method = self.capture_method_call(probe)?;
        let verified = self.verification_outcome(&method, options);
        self.ledger.borrow_mut().clear_pattern(&method);

        match verified {
            Ok(()) => {
                let err = MockError::MethodWasCalled { method };
                logging::log_operation_failed(operation, &err);
                Err(err)
            }
            Err(_) => Ok(()),
        }
    }

    fn verification_outcome(&self, method: &str, options: VerifyOptions) -> Result<()> {
        let ledger = self.ledger.borrow();
        let actual = ledger.count(method);

        if let Some(expected) = options.expected_call_count {
            if actual != expected {
                return Err(MockError::MethodCallCountMismatch {
                    method: method.to_string(),
                    actual,
                    expected,
                });
            }
        }

        if options.check_arguments {
            let check_all = options.expected_call_count.is_some();
            if ledger.matches(method, check_all) {
                return Ok(());
            }
            if actual == 0 {
                return Err(MockError::MethodNotCalled {
                    method: method.to_string(),
                });
            }
            let expected = ledger
                .history(method)
                .and_then(|history| history.pattern())
                .map(|pattern| format!("{pattern:?}"))
                .unwrap_or_default();
            return Err(MockError::ArgumentsMismatch {
                method: method.to_string(),
                expected,
                recorded: self.recorded_calls(method),
            });
        }

        if options.expected_call_count.is_none() && actual == 0 {
            return Err(MockError::MethodNotCalled {
                method: method.to_string(),
            });
        }
        Ok(())
    }
}

/// A type whose methods forward to a [`CallHandler`].
///
/// The provided methods are the test-facing API; see also the reporting
/// wrappers in [`crate::assertions`].
pub trait Mock {
    fn call_handler(&self) -> &CallHandler;

    /// The probed method was called at least once.
    fn verify<R>(&self, probe: impl FnOnce() -> R) -> Result<()> {
        self.call_handler().verify(VerifyOptions::new(), probe)
    }

    fn verify_with<R>(&self, options: VerifyOptions, probe: impl FnOnce() -> R) -> Result<()> {
        self.call_handler().verify(options, probe)
    }

    fn reject<R>(&self, probe: impl FnOnce() -> R) -> Result<()> {
        self.call_handler().reject(probe)
    }

    fn reject_matching<R>(&self, probe: impl FnOnce() -> R) -> Result<()> {
        self.call_handler().reject_matching(probe)
    }

    /// Stub the exact call the probe makes.
    fn stub<R: Any>(&self, value: R, probe: impl FnOnce() -> R) -> Result<()> {
        self.call_handler().stub(StubOptions::default(), value, probe)
    }

    fn stub_with<R: Any>(
        &self,
        options: StubOptions,
        value: R,
        probe: impl FnOnce() -> R,
    ) -> Result<()> {
        self.call_handler().stub(options, value, probe)
    }

    fn stub_nil<T>(&self, options: StubOptions, probe: impl FnOnce() -> Option<T>) -> Result<()> {
        self.call_handler().stub_nil(options, probe)
    }
}
