//! Fixed viewpoint configuration.
//!
//! The landscape scrolls toward the viewer, so the camera never moves. It sits
//! behind the near edge of the lattice on the road's center line, raised above
//! the terrain and looking down the road.

/// Fixed camera placement relative to the lattice
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Height of the eye above the reference plane (world units)
    pub elevation: f32,

    /// Distance from the near edge of the lattice back to the eye (world units)
    pub back_distance: f32,

    /// Distance from the near edge into the lattice of the look-at point (world units)
    pub look_ahead: f32,

    /// Height of the look-at point (world units)
    pub target_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            elevation: 420.0,
            back_distance: 300.0,
            look_ahead: 1400.0,
            target_height: 0.0,
        }
    }
}
