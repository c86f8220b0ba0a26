//! Operation outcomes

/// Outcome of an application create or delete operation
///
/// These are reported results, not errors: `Exists` and `NotExists` are
/// expected negatives, and `Failed` means a module rejected the operation.
/// Module-internal error detail never crosses this boundary; diagnostics go
/// to the logging sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation completed and every module acknowledged it
    Succeeded,
    /// An application with the same name already exists
    Exists,
    /// No application with the given id exists
    NotExists,
    /// A module rejected the operation
    Failed,
}
