pub mod registry;
pub mod sequence_sampler;
pub mod track_pair_sampler;
pub mod traits;
pub mod weights;

pub use registry::{
    register_sampler, registered_names, resolve_sampler, schema_of, RegistryEntry,
    SamplerConstructor, SamplerRegistry,
};
pub use sequence_sampler::SequenceSampler;
pub use track_pair_sampler::TrackPairSampler;
pub use traits::{Sampler, SamplerBase, SamplerState, MAX_SAMPLE_ATTEMPTS};
