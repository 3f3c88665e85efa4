//! Fixed camera looking down the road.
//!
//! The landscape is laid out with X across the road, Y along it (rows scroll
//! toward +Y, i.e. toward the viewer) and Z up.

use glam::{Mat4, Vec3};

use crate::params::{CameraConfig, GridConfig, RenderConfig};

/// Camera system for the fixed viewpoint
pub struct CameraSystem {
    config: CameraConfig,
}

impl CameraSystem {
    /// Create new camera system with specified placement
    pub fn new(config: CameraConfig) -> Self {
        Self { config }
    }

    /// Compute camera position and look-at target for a lattice
    ///
    /// # Returns
    /// Tuple of (eye_position, target_position)
    pub fn compute_position_and_target(&self, grid: &GridConfig) -> (Vec3, Vec3) {
        let center_x = grid.width() / 2.0;
        let near_edge = grid.longitudinal_period();

        let eye = Vec3::new(
            center_x,
            near_edge + self.config.back_distance,
            self.config.elevation,
        );
        let target = Vec3::new(
            center_x,
            near_edge - self.config.look_ahead,
            self.config.target_height,
        );
        (eye, target)
    }

    /// Create view-projection matrix for rendering
    pub fn create_view_proj_matrix(&self, grid: &GridConfig, render_config: &RenderConfig) -> Mat4 {
        let (eye, target) = self.compute_position_and_target(grid);

        // Z is up; the camera never rolls
        let view = Mat4::look_at_rh(eye, target, Vec3::Z);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane,
            render_config.far_plane,
        );

        proj * view
    }
}
