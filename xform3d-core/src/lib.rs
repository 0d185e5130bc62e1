//! xform3d Core Library - 3D transforms and vertex data
//!
//! This library provides a 4x4 affine transform with composition,
//! inversion and point transformation, a colored and textured vertex
//! type, and the small value types they are built on.

pub mod angle;
pub mod color;
pub mod projection;
pub mod transform;
pub mod vertex;

/// Three-component float vector used for points, offsets and factors
pub type Vector3f = nalgebra::Vector3<f32>;
/// Two-component float vector used for texture coordinates
pub type Vector2f = nalgebra::Vector2<f32>;

// Re-export commonly used types
pub use angle::Angle;
pub use color::Color;
pub use projection::{Camera, ProjectionMode};
pub use transform::Transform3;
pub use vertex::Vertex3;
