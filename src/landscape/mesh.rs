//! Per-frame triangle-strip mesh over the scrolled lattice.

use bytemuck::{Pod, Zeroable};
use rayon::prelude::*;

use super::height::TerrainHeightModel;
use super::scroll::ScrollState;
use crate::params::LandscapeParams;

/// Vertex data for the landscape mesh (position + normalized lattice coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// (lateral, scrolled longitudinal, height)
    pub position: [f32; 3],
    /// (column / (columns - 1), scrolled longitudinal / longitudinal period)
    pub uv: [f32; 2],
}

/// One triangle strip per lattice row pair, stored back to back in a single buffer
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    pub vertices: Vec<Vertex>,
    /// Triangle list covering every strip (for the solid hidden-line pass)
    pub triangle_indices: Vec<u32>,
    /// Line list of every triangle edge (for the wireframe pass)
    pub line_indices: Vec<u32>,
    columns: usize,
    rows: usize,
}

impl TerrainMesh {
    /// Allocate the vertex buffer and the static index sets for a lattice
    ///
    /// A lattice with fewer than 2 columns or rows has no strips and yields an empty mesh.
    pub fn new(columns: usize, rows: usize) -> Self {
        let strip_len = 2 * columns;
        let strip_count = lattice_strip_count(columns, rows);

        let mut triangle_indices =
            Vec::with_capacity(strip_count * strip_len.saturating_sub(2) * 3);
        let mut line_indices =
            Vec::with_capacity(strip_count * (2 * strip_len).saturating_sub(3) * 2);

        for strip in 0..strip_count {
            let base = (strip * strip_len) as u32;
            let len = strip_len as u32;

            // Strip triangle k is (k, k+1, k+2)
            for k in 0..len - 2 {
                triangle_indices.extend_from_slice(&[base + k, base + k + 1, base + k + 2]);
            }

            // Rungs and diagonals
            for k in 0..len - 1 {
                line_indices.extend_from_slice(&[base + k, base + k + 1]);
            }
            // Edges along each row
            for k in 0..len - 2 {
                line_indices.extend_from_slice(&[base + k, base + k + 2]);
            }
        }

        Self {
            vertices: vec![Vertex::default(); strip_count * strip_len],
            triangle_indices,
            line_indices,
            columns,
            rows,
        }
    }

    /// Number of strips (`rows - 1`)
    pub fn strip_count(&self) -> usize {
        lattice_strip_count(self.columns, self.rows)
    }

    /// Vertices per strip (`2 * columns`)
    pub fn strip_len(&self) -> usize {
        2 * self.columns
    }

    /// Vertices of one strip, alternating current-row and next-row lattice points
    pub fn strip(&self, index: usize) -> &[Vertex] {
        let len = self.strip_len();
        &self.vertices[index * len..(index + 1) * len]
    }

    pub fn strips(&self) -> impl Iterator<Item = &[Vertex]> {
        self.vertices.chunks_exact(self.strip_len().max(1))
    }

    /// Highest vertex of the current frame
    pub fn peak_height(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.position[2])
            .fold(0.0, f32::max)
    }
}

fn lattice_strip_count(columns: usize, rows: usize) -> usize {
    if columns < 2 {
        0
    } else {
        rows.saturating_sub(1)
    }
}

/// Walks the lattice each frame and fills a [`TerrainMesh`]
pub struct MeshBuilder {
    model: TerrainHeightModel,
    columns: usize,
    rows: usize,
    cell_size: f32,
    noise_scale: f64,
    base_amplitude: f32,
    audio_sensitivity: f32,
}

impl MeshBuilder {
    pub fn new(params: &LandscapeParams) -> Self {
        Self {
            model: TerrainHeightModel::new(params),
            columns: params.grid.columns,
            rows: params.grid.rows,
            cell_size: params.grid.cell_size,
            noise_scale: params.noise_scale as f64,
            base_amplitude: params.base_amplitude,
            audio_sensitivity: params.audio_sensitivity,
        }
    }

    /// Allocate a mesh sized for this builder's lattice
    pub fn new_mesh(&self) -> TerrainMesh {
        TerrainMesh::new(self.columns, self.rows)
    }

    pub fn model(&self) -> &TerrainHeightModel {
        &self.model
    }

    /// Terrain height scale for a given audio intensity, never negative
    pub fn amplitude_for(&self, intensity: f32) -> f32 {
        (self.base_amplitude * (1.0 + intensity * self.audio_sensitivity)).max(0.0)
    }

    /// Rebuild every strip for the current scroll position and intensity
    ///
    /// Rows are independent, so strips are filled in parallel; each worker
    /// writes only its own slice of the vertex buffer.
    ///
    /// # Returns
    /// * The amplitude used for this frame
    pub fn build(&self, scroll: &ScrollState, intensity: f32, mesh: &mut TerrainMesh) -> f32 {
        debug_assert_eq!(mesh.columns, self.columns);
        debug_assert_eq!(mesh.rows, self.rows);

        let amplitude = self.amplitude_for(intensity);
        let strip_len = mesh.strip_len();
        if mesh.vertices.is_empty() {
            return amplitude;
        }

        mesh.vertices
            .par_chunks_mut(strip_len)
            .enumerate()
            .for_each(|(row, strip)| {
                for (column, pair) in strip.chunks_exact_mut(2).enumerate() {
                    pair[0] = self.vertex(column, row, scroll, amplitude);
                    pair[1] = self.vertex(column, row + 1, scroll, amplitude);
                }
            });

        amplitude
    }

    fn vertex(&self, column: usize, row: usize, scroll: &ScrollState, amplitude: f32) -> Vertex {
        let period = self.rows as f32 * self.cell_size;
        let scrolled_y = (row as f32 * self.cell_size + scroll.offset()).rem_euclid(period);

        // Sample at the terrain row the vertex has travelled over, plus the drift
        let longitudinal = scroll.world_row(row) as f64 * self.noise_scale + scroll.noise_offset();
        let z = self.model.height_at(column as f32, longitudinal, amplitude);

        Vertex {
            position: [column as f32 * self.cell_size, scrolled_y, z],
            uv: [
                column as f32 / (self.columns - 1) as f32,
                scrolled_y / period,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::GridConfig;

    fn small_params() -> LandscapeParams {
        LandscapeParams {
            grid: GridConfig {
                columns: 6,
                rows: 5,
                cell_size: 10.0,
            },
            ..LandscapeParams::default()
        }
    }

    #[test]
    fn test_mesh_shape() {
        let params = small_params();
        let mesh = TerrainMesh::new(params.grid.columns, params.grid.rows);

        assert_eq!(mesh.strip_count(), 4);
        assert_eq!(mesh.strip_len(), 12);
        assert_eq!(mesh.vertices.len(), 48);
        assert_eq!(mesh.strips().count(), 4);

        // 10 triangles per strip
        assert_eq!(mesh.triangle_indices.len(), 4 * 10 * 3);
        // 11 rungs/diagonals + 10 row edges per strip
        assert_eq!(mesh.line_indices.len(), 4 * 21 * 2);

        let max = *mesh.line_indices.iter().max().unwrap() as usize;
        assert!(max < mesh.vertices.len());
    }

    #[test]
    fn test_strip_order_alternates_rows() {
        let params = small_params();
        let builder = MeshBuilder::new(&params);
        let scroll = ScrollState::new(&params);
        let mut mesh = builder.new_mesh();
        builder.build(&scroll, 0.0, &mut mesh);

        for (row, strip) in mesh.strips().enumerate() {
            for (column, pair) in strip.chunks_exact(2).enumerate() {
                let x = column as f32 * 10.0;
                assert_eq!(pair[0].position[0], x);
                assert_eq!(pair[1].position[0], x);
                assert_eq!(pair[0].position[1], row as f32 * 10.0);
                assert_eq!(pair[1].position[1], (row + 1) as f32 * 10.0);
            }
        }
    }

    #[test]
    fn test_shared_rows_match_between_strips() {
        let params = small_params();
        let builder = MeshBuilder::new(&params);
        let mut scroll = ScrollState::new(&params);
        scroll.advance(0.123);
        let mut mesh = builder.new_mesh();
        builder.build(&scroll, 0.4, &mut mesh);

        // Next row of strip s is the current row of strip s + 1
        for s in 0..mesh.strip_count() - 1 {
            let a = mesh.strip(s);
            let b = mesh.strip(s + 1);
            for column in 0..params.grid.columns {
                assert_eq!(a[2 * column + 1].position, b[2 * column].position);
            }
        }
    }

    #[test]
    fn test_scroll_offset_moves_rows() {
        let params = small_params();
        let builder = MeshBuilder::new(&params);
        let mut scroll = ScrollState::new(&params);
        // Quarter of a cell
        scroll.advance(params.scroll_period_s * 0.25);
        let mut mesh = builder.new_mesh();
        builder.build(&scroll, 0.0, &mut mesh);

        let first = mesh.strip(0)[0].position[1];
        assert!((first - 2.5).abs() < 1e-3);
        for v in &mesh.vertices {
            assert!(v.position[1] >= 0.0 && v.position[1] < 50.0);
            assert!((0.0..=1.0).contains(&v.uv[0]));
            assert!((0.0..1.0).contains(&v.uv[1]));
        }
    }

    #[test]
    fn test_intensity_inflates_amplitude() {
        let params = small_params();
        let builder = MeshBuilder::new(&params);

        assert_eq!(builder.amplitude_for(0.0), 100.0);
        assert_eq!(builder.amplitude_for(1.0), 350.0);
        assert_eq!(builder.amplitude_for(-1.0), 0.0);

        let scroll = ScrollState::new(&params);
        let mut quiet = builder.new_mesh();
        let mut loud = builder.new_mesh();
        builder.build(&scroll, 0.0, &mut quiet);
        builder.build(&scroll, 2.0, &mut loud);
        assert!(loud.peak_height() > quiet.peak_height());
    }

    #[test]
    fn test_build_reuses_buffer() {
        let params = small_params();
        let builder = MeshBuilder::new(&params);
        let mut scroll = ScrollState::new(&params);
        let mut mesh = builder.new_mesh();
        let capacity = mesh.vertices.capacity();
        let ptr = mesh.vertices.as_ptr();

        for _ in 0..50 {
            scroll.advance(1.0 / 60.0);
            builder.build(&scroll, 0.5, &mut mesh);
        }
        assert_eq!(mesh.vertices.capacity(), capacity);
        assert_eq!(mesh.vertices.as_ptr(), ptr);
        assert_eq!(mesh.vertices.len(), 4 * 12);
    }

    #[test]
    fn test_heights_non_negative() {
        let params = LandscapeParams::default();
        let builder = MeshBuilder::new(&params);
        let mut scroll = ScrollState::new(&params);
        let mut mesh = builder.new_mesh();
        for frame in 0..20 {
            scroll.advance(0.05);
            builder.build(&scroll, frame as f32 * 0.1, &mut mesh);
            assert!(mesh.vertices.iter().all(|v| v.position[2] >= 0.0));
        }
    }

    #[test]
    fn test_degenerate_lattice_is_empty() {
        for (columns, rows) in [(0, 0), (0, 5), (1, 1), (1, 4), (6, 0), (6, 1)] {
            let mesh = TerrainMesh::new(columns, rows);
            assert!(mesh.vertices.is_empty());
            assert!(mesh.triangle_indices.is_empty());
            assert!(mesh.line_indices.is_empty());
            assert_eq!(mesh.strip_count(), 0);
            assert_eq!(mesh.strips().count(), 0);
        }
    }

    #[test]
    fn test_build_on_degenerate_lattice_is_a_no_op() {
        let mut params = small_params();
        params.grid.columns = 0;
        params.grid.rows = 0;
        let builder = MeshBuilder::new(&params);
        let scroll = ScrollState::new(&params);
        let mut mesh = builder.new_mesh();

        let amplitude = builder.build(&scroll, 0.0, &mut mesh);
        assert_eq!(amplitude, params.base_amplitude);
        assert!(mesh.vertices.is_empty());
    }
}
