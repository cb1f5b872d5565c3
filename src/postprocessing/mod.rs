//! Turns raw model text into something usable: fence cleaning, operation
//! parsing, and the apply loop.

pub mod apply;
pub mod formatter;
pub mod interpreter;

pub use apply::{Applier, ApplyOutcome};
pub use formatter::clean;
pub use interpreter::{interpret, EditOperation, EditOperationList, InterpretError};
