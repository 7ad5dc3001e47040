//! Errors reported by the host runtime.
//!
//! The transition engine and the persistent collections never fail; out of
//! range collection access degrades to an absent value or an unchanged copy.
//! What can go wrong is routing a dispatch to a state container.

use thiserror::Error;

/// Errors that can occur while dispatching to a state container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The action surface was used before its component finished mounting.
    #[error("Component is not mounted yet")]
    NotMounted,

    /// The state container behind the dispatch has been dropped.
    #[error("Component has been unmounted")]
    Unmounted,

    /// One dispatch drained more chained transitions than allowed.
    #[error("Dispatch chain exceeded {limit} transitions")]
    RunawayDispatch { limit: usize },
}
