//! Public façade for the engine layer.

pub mod error;
pub mod generator;
pub mod patcher;
pub mod types;

pub use error::{EngineError, EngineResult, ErrorKind};
pub use generator::Generator;
pub use patcher::PatchApplier;
pub use types::{EditRequest, GenerateRequest};
