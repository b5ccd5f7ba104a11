//! Deformable ground surface
//!
//! The render and collision subsystems each keep a vertex buffer for the
//! ground plane. The deformer writes both every tick; if they ever diverge
//! the player sees geometry that doesn't match what physics collides with,
//! so the two copies must stay bit-identical.

use glam::Vec3;

/// Ground surface vertex buffers (render + collision copies)
#[derive(Debug, Clone)]
pub struct SurfaceMesh {
    pub render_vertices: Vec<Vec3>,
    pub collision_vertices: Vec<Vec3>,
}

impl SurfaceMesh {
    /// Build from an existing vertex buffer; both copies start identical
    pub fn new(vertices: Vec<Vec3>) -> Self {
        Self {
            collision_vertices: vertices.clone(),
            render_vertices: vertices,
        }
    }

    /// Flat grid on the XZ plane (y = 0), `segments` quads per side,
    /// spanning `[-half_x, half_x] x [-half_z, half_z]`
    ///
    /// Vertex order is row-major, which the demo and tests rely on for
    /// picking known vertices.
    pub fn flat_grid(half_x: f32, half_z: f32, segments: u32) -> Self {
        let side = segments + 1;
        let mut vertices = Vec::with_capacity((side * side) as usize);
        for row in 0..side {
            let z = -half_z + (row as f32 / segments as f32) * 2.0 * half_z;
            for col in 0..side {
                let x = -half_x + (col as f32 / segments as f32) * 2.0 * half_x;
                vertices.push(Vec3::new(x, 0.0, z));
            }
        }
        Self::new(vertices)
    }

    pub fn vertex_count(&self) -> usize {
        self.render_vertices.len()
    }

    /// True when the render and collision copies are bit-identical
    pub fn copies_in_sync(&self) -> bool {
        self.render_vertices.len() == self.collision_vertices.len()
            && self
                .render_vertices
                .iter()
                .zip(&self.collision_vertices)
                .all(|(a, b)| a.to_array().map(f32::to_bits) == b.to_array().map(f32::to_bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_grid_dimensions() {
        let mesh = SurfaceMesh::flat_grid(10.0, 10.0, 4);
        assert_eq!(mesh.vertex_count(), 25);
        // Corners land exactly on the extents
        assert_eq!(mesh.render_vertices[0], Vec3::new(-10.0, 0.0, -10.0));
        assert_eq!(mesh.render_vertices[24], Vec3::new(10.0, 0.0, 10.0));
    }

    #[test]
    fn test_copies_start_in_sync() {
        let mesh = SurfaceMesh::flat_grid(5.0, 5.0, 8);
        assert!(mesh.copies_in_sync());
    }

    #[test]
    fn test_divergence_detected() {
        let mut mesh = SurfaceMesh::flat_grid(5.0, 5.0, 2);
        mesh.render_vertices[3].y = 1.0;
        assert!(!mesh.copies_in_sync());
    }
}
