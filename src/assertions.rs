//! Reporting wrappers around the [`Mock`] operations.
//!
//! These never return an error: a failure is handed to the mock's
//! [`FailureReporter`] together with the caller's file and line, and
//! execution continues unless the reporter panics.

use crate::mock::{Mock, StubOptions, VerifyOptions};
use crate::{MockError, Result};
use miette::Diagnostic;
use serde::Serialize;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::panic::Location;
use std::thread;

/// A failed mock operation and where it was invoked from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub message: String,
    pub code: Option<String>,
    pub help: Option<String>,
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl Failure {
    pub fn new(error: &MockError, location: &'static Location<'static>) -> Self {
        Self {
            message: error.to_string(),
            code: error.code().map(|code| code.to_string()),
            help: error.help().map(|help| help.to_string()),
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}: {}", self.file, self.line, self.column, self.message)?;
        if let Some(help) = &self.help {
            write!(f, "\n  help: {help}")?;
        }
        Ok(())
    }
}

/// Where failures from the reporting wrappers go.
pub trait FailureReporter {
    fn report(&self, failure: Failure);

    /// Failures held for later inspection; empty for reporters that do not
    /// keep any.
    fn failures(&self) -> Vec<Failure> {
        Vec::new()
    }

    /// Remove and return the held failures, marking them as handled.
    fn take_failures(&self) -> Vec<Failure> {
        Vec::new()
    }
}

/// Panics on the first failure so the test stops at the failing assertion.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicReporter;

impl FailureReporter for PanicReporter {
    fn report(&self, failure: Failure) {
        panic!("{failure}");
    }
}

/// Records failures and lets the test keep running.
///
/// Dropping it while failures are still held panics, so a test cannot pass
/// with unreported failures.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    failures: RefCell<Vec<Failure>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_failures(&self) -> Vec<Failure> {
        self.failures.take()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.borrow().is_empty()
    }

    /// Panic with every held failure, if there are any.
    #[track_caller]
    pub fn assert_clean(&self) {
        let failures = self.take_failures();
        if !failures.is_empty() {
            panic!("{}", render(&failures));
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&*self.failures.borrow())
    }
}

impl FailureReporter for CollectingReporter {
    fn report(&self, failure: Failure) {
        tracing::debug!(file = failure.file, line = failure.line, "Mock failure collected");
        self.failures.borrow_mut().push(failure);
    }

    fn failures(&self) -> Vec<Failure> {
        self.failures.borrow().clone()
    }

    fn take_failures(&self) -> Vec<Failure> {
        self.failures.take()
    }
}

impl Drop for CollectingReporter {
    fn drop(&mut self) {
        let failures = self.failures.get_mut();
        if !failures.is_empty() && !thread::panicking() {
            panic!("{}", render(failures));
        }
    }
}

fn render(failures: &[Failure]) -> String {
    let mut out = format!("{} mock failure(s):", failures.len());
    for failure in failures {
        out.push('\n');
        out.push_str(&failure.to_string());
    }
    out
}

#[track_caller]
fn report<M: Mock>(mock: &M, outcome: Result<()>) {
    if let Err(err) = outcome {
        let failure = Failure::new(&err, Location::caller());
        mock.call_handler().reporter().report(failure);
    }
}

/// Report unless the probed method was called.
#[track_caller]
pub fn verify<M: Mock, R>(mock: &M, probe: impl FnOnce() -> R) {
    report(mock, mock.verify(probe));
}

#[track_caller]
pub fn verify_with<M: Mock, R>(mock: &M, options: VerifyOptions, probe: impl FnOnce() -> R) {
    report(mock, mock.verify_with(options, probe));
}

/// Report if the probed method was called.
#[track_caller]
pub fn reject<M: Mock, R>(mock: &M, probe: impl FnOnce() -> R) {
    report(mock, mock.reject(probe));
}

#[track_caller]
pub fn reject_matching<M: Mock, R>(mock: &M, probe: impl FnOnce() -> R) {
    report(mock, mock.reject_matching(probe));
}

#[track_caller]
pub fn stub<M: Mock, R: Any>(mock: &M, value: R, probe: impl FnOnce() -> R) {
    report(mock, mock.stub(value, probe));
}

#[track_caller]
pub fn stub_with<M: Mock, R: Any>(
    mock: &M,
    options: StubOptions,
    value: R,
    probe: impl FnOnce() -> R,
) {
    report(mock, mock.stub_with(options, value, probe));
}

#[track_caller]
pub fn stub_nil<M: Mock, T>(mock: &M, options: StubOptions, probe: impl FnOnce() -> Option<T>) {
    report(mock, mock.stub_nil(options, probe));
}
