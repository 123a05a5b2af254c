/// Classification for retry policy.
///
/// Used to decide how a caller reacts to an error once the transport has
/// already exhausted its own retries.
///
/// # Behavior Summary
///
/// | Class | Continue batch? | Surface to caller? |
/// |-------|-----------------|--------------------|
/// | `Never` | No | Yes |
/// | `WithBackoff` | No | Yes (caller may retry later) |
/// | `SkipItem` | Yes | Only if every item fails |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - invalid input or a terminal, request-wide failure.
    Never,

    /// The provider is throttling us. Stop calling it for this request.
    WithBackoff,

    /// This item failed for good, but other items of the same request may
    /// still succeed.
    SkipItem,
}
