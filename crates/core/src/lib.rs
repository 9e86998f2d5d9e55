//! Shared primitives for the algolab teaching engines.
//!
//! Every engine in the workspace narrates its mutations. The narration is a
//! first-class return value, not a debugging side channel:
//!
//! - [`StepLog`]: ordered, append-only explanation strings returned by value
//!   from each mutating call. A call that turned into a no-op records the
//!   typed reason as its last step and flags the log as rejected.
//! - [`Replay`]: a cursor for stepping forwards and backwards through any
//!   finished trace (explanation strings or structured step records).
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`step_log`] | [`StepLog`] |
//! [`replay`] | [`Replay`] |

pub mod replay;
pub mod step_log;

pub use replay::Replay;
pub use step_log::StepLog;

/// Integer key stored by every engine (tree keys, heap values, hash keys).
pub type Key = i64;
