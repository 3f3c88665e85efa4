//! Scrolling wireframe landscape with a flat road between two mountain ranges.

mod height;
mod mesh;
mod scroll;
mod system;

// Re-export public types
pub use height::{TerrainHeightModel, Zone};
pub use mesh::{MeshBuilder, TerrainMesh, Vertex};
pub use scroll::ScrollState;
pub use system::{FrameStats, LandscapeSystem};
