//! Structured logging helpers.
//!
//! Every ledger, registry and facade event goes through one of these
//! functions so field names stay consistent across the crate.

use crate::MockError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "probemock=info";

/// Install a fmt subscriber that writes through the test harness capture.
///
/// `RUST_LOG` wins over `fallback_filter`. Calling this more than once, or
/// after another subscriber was installed, leaves the existing one in place.
pub fn init_test_logging(fallback_filter: &str) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_test_writer()
        .with_target(true)
        .with_level(true);

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback_filter.into()),
        )
        .with(fmt_layer)
        .try_init();
}

/// Log a real call appended to the ledger.
pub fn log_call_recorded(method: &str, arity: usize) {
    tracing::debug!(method, arity, "Call recorded");
}

/// Log a probe call stored as the method's pattern.
pub fn log_pattern_captured(method: &str, arity: usize) {
    tracing::debug!(method, arity, "Pattern captured");
}

/// Log a probe closure that never reached a recording entry point.
pub fn log_probe_unrecorded() {
    tracing::debug!("Probe did not call a mocked method");
}

/// Log a pattern dropped because a later captured call names the operation.
pub fn log_pattern_discarded(method: &str, kept: &str) {
    tracing::debug!(method, kept, "Pattern dropped, a later call names the operation");
}

/// Log a stub entry being registered.
pub fn log_stub_registered(method: &str, applies_to_all: bool, value_type: &str) {
    tracing::debug!(method, applies_to_all, value_type, "Stub registered");
}

/// Log argument-specific stubs discarded by a catch-all stub.
pub fn log_specific_stubs_superseded(method: &str, count: usize) {
    tracing::debug!(method, count, "Catch-all stub replaces argument-specific stubs");
}

/// Log a failed verify, reject or stub operation.
pub fn log_operation_failed(operation: &str, error: &MockError) {
    tracing::debug!(operation, error = %error, "Mock operation failed");
}

/// Log a stub whose stored type differs from the method's return type.
pub fn log_stub_type_mismatch(method: &str, expected: &str, stored: &str) {
    tracing::warn!(
        method,
        expected,
        stored,
        "Stubbed value has the wrong type, returning default"
    );
}

/// Log a nil stub consumed by a method whose return type cannot be nil.
pub fn log_nil_for_required_return(method: &str) {
    tracing::warn!(method, "Nil stubbed for a non-optional return, returning default");
}
