//! Placeholder arguments for probes.

/// A placeholder for a probe argument whose value does not matter.
///
/// Probes must call the mocked method with real values, so `any()` simply
/// produces `T::default()`. It stands for "any value, including none" as
/// long as the operation does not compare arguments: `verify` without
/// [`with_arguments`](crate::VerifyOptions::with_arguments), `reject`, or a
/// stub registered with [`StubOptions::any_arguments`](crate::StubOptions::any_arguments).
pub fn any<T: Default>() -> T {
    T::default()
}
