pub mod backward_pass;
pub mod forward_pass;

pub use backward_pass::{BackwardPass, BackwardPassResult};
pub use forward_pass::ForwardPass;

/// Outcome of trying to date one task during a sweep.
///
/// `Deferred` means a neighbour is not dated yet and the task goes back on
/// the queue. It is control flow, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Relaxation {
    Resolved(i64),
    Deferred,
}
