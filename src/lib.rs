//! Hand-written test doubles with call recording, verification and stubbing.
//!
//! A mock type owns a [`CallHandler`] and every mocked method forwards its
//! name and argument tuple to it. Tests then name a call by invoking it
//! inside a probe closure:
//!
//! ```
//! use probemock::{any, register_call, Arg, Args1, CallHandler, Mock, VerifyOptions};
//!
//! trait Greeter {
//!     fn greet(&self, name: &str) -> String;
//! }
//!
//! #[derive(Default)]
//! struct MockGreeter {
//!     handler: CallHandler,
//! }
//!
//! impl Mock for MockGreeter {
//!     fn call_handler(&self) -> &CallHandler {
//!         &self.handler
//!     }
//! }
//!
//! impl Greeter for MockGreeter {
//!     fn greet(&self, name: &str) -> String {
//!         register_call!(
//!             self.handler,
//!             args: Args1::new(Arg::value(name.to_string())),
//!             default: String::from("hello")
//!         )
//!     }
//! }
//!
//! let mock = MockGreeter::default();
//! mock.stub("hi there".to_string(), || mock.greet("bob")).unwrap();
//!
//! assert_eq!(mock.greet("bob"), "hi there");
//! assert_eq!(mock.greet("alice"), "hello");
//!
//! mock.verify_with(VerifyOptions::times(2), || mock.greet(any())).unwrap();
//! ```

pub mod arg;
pub mod args;
pub mod assertions;
pub mod config;
pub mod handler;
pub mod ledger;
pub mod logging;
mod macros;
pub mod matchers;
pub mod mock;
pub mod stubs;

use miette::Diagnostic;

pub use arg::{Arg, ArgObject, Opaque, Selector};
pub use args::{Args0, Args1, Args2, Args3, Args4, Args5, Args6, ArgsTuple};
pub use assertions::{CollectingReporter, Failure, FailureReporter, PanicReporter};
pub use config::Config;
pub use handler::CallHandler;
pub use matchers::any;
pub use mock::{Mock, StubOptions, VerifyOptions};

/// Result type alias for mock operations
pub type Result<T, E = MockError> = std::result::Result<T, E>;

/// Failures raised by verification, rejection and stubbing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum MockError {
    #[error("Method `{method}` was not called")]
    #[diagnostic(
        code(probemock::method_not_called),
        help("Make sure the code under test reaches this method before verifying it.")
    )]
    MethodNotCalled { method: String },

    #[error("Method `{method}` was called")]
    #[diagnostic(
        code(probemock::method_was_called),
        help("The method was rejected but the code under test invoked it.")
    )]
    MethodWasCalled { method: String },

    #[error("Method `{method}` was called {actual} time(s), expected {expected}")]
    #[diagnostic(code(probemock::call_count_mismatch))]
    MethodCallCountMismatch {
        method: String,
        actual: usize,
        expected: usize,
    },

    #[error("Method `{method}` was never called with {expected}; recorded calls: {recorded:?}")]
    #[diagnostic(
        code(probemock::arguments_mismatch),
        help("Pass `any()` placeholders and drop `with_arguments()` to ignore argument values.")
    )]
    ArgumentsMismatch {
        method: String,
        expected: String,
        recorded: Vec<String>,
    },

    #[error("The probe closure did not call a mocked method")]
    #[diagnostic(
        code(probemock::method_not_mocked),
        help("The method body must forward to its CallHandler, e.g. with `register_call!`.")
    )]
    MethodNotMocked,

    #[error("Method `{method}` has been stubbed for all arguments")]
    #[diagnostic(
        code(probemock::stubbed_for_all_arguments),
        help("Stub with `StubOptions::any_arguments()` again to replace the value, or reset the mock.")
    )]
    MethodHasBeenStubbedForAllArguments { method: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(probemock::config_error),
        help("Check that .probemock.toml is readable and valid TOML.")
    )]
    ConfigError(String),
}
