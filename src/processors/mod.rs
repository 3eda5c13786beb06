//! Image preprocessing transforms for receipt photos.
//!
//! Everything here is pure pixel work: no I/O, no collaborator calls. The
//! individual transforms are exposed for testing and reuse; [`ImageOptimizer`]
//! runs them in the fixed order the recognition engine expects.

pub mod blur;
pub mod morphology;
pub mod optimize;
pub mod resize;
pub mod threshold;

pub use optimize::ImageOptimizer;
pub use resize::LimitSideResize;
pub use threshold::AdaptiveMeanThreshold;
