//! WebGPU rendering module
//!
//! `scene` turns simulation snapshots into drawable positions; the SDF
//! pipeline draws them in the fragment shader.

pub mod scene;
pub mod sdf_pipeline;

pub use scene::{Scene, SegmentInstance, SegmentKind};
pub use sdf_pipeline::SdfRenderState;
