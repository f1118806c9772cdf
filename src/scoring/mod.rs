pub mod engine;
pub mod validation;

pub use engine::{classify_tier, evaluate, normalize, EngineError};
pub use validation::validate_request;
