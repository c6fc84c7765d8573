/// Classification for retry policy.
///
/// | Class | Retry? |
/// |-------|--------|
/// | `Never` | No, the response will not change |
/// | `WithBackoff` | Yes, after waiting |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - malformed publication, missing currency or a client error.
    Never,

    /// Transient failure such as a timeout, a refused connection or a 5xx/429.
    WithBackoff,
}
