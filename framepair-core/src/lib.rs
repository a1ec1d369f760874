// Core building blocks of the framepair sampling engine
pub mod error;
pub mod hyper_params;
pub mod logging;
pub mod rng;

// Re-export the types samplers use everywhere
pub use error::FramePairError;
pub use hyper_params::{HyperParam, HyperParamSchema, HyperParams};
pub use logging::init_logging;
pub use rng::{derive_worker_seed, SamplerRng, SelectionWeights};
