//! GPU compute evaluation of the wave height field.
//!
//! Points are uploaded to a storage buffer, displaced by a compute shader and
//! read back through a staging buffer before the call returns.

mod buffers;
mod params;
mod pipelines;

pub mod sampling;

pub use buffers::GpuSampleBatch;
pub use params::{GpuSamplePoint, SampleParams};
pub use pipelines::SAMPLE_ENTRY_POINT;
pub use sampling::GpuWaveEvaluator;
