//! The hole: mesh deformation and bounded motion
//!
//! Two pieces that run back to back every tick: `HoleMotion` smooths the
//! input delta into a new clamped world position, then `HoleDeformer`
//! rewrites the affected ground vertices around that position.

use glam::{Vec2, Vec3};

use super::mesh::SurfaceMesh;
use crate::consts::{DETECTION_MARGIN, HOLE_SMOOTHING, PERFECT_RADIUS_FACTOR};
use crate::{horizontal_distance, lerp_toward};

/// Deforms the ground mesh around the hole's current position
///
/// The affected vertex set and per-vertex offsets are computed once at
/// construction and never change; each update is a pure function of the
/// hole center and that precomputed data.
#[derive(Debug, Clone)]
pub struct HoleDeformer {
    affected: Vec<usize>,
    offsets: Vec<Vec3>,
    /// Scale factor for the visual ring indicator around the hole
    pub indicator_scale: f32,
}

impl HoleDeformer {
    /// Scan the mesh for vertices within `radius + 1` (horizontal distance)
    /// of the initial hole center and record their indices and offsets.
    ///
    /// An empty affected set is allowed; the deformer just becomes a no-op.
    pub fn new(mesh: &SurfaceMesh, center: Vec3, radius: f32) -> Self {
        let detection_radius = radius + DETECTION_MARGIN;
        let mut affected = Vec::new();
        let mut offsets = Vec::new();

        for (index, vertex) in mesh.render_vertices.iter().enumerate() {
            if horizontal_distance(*vertex, center) <= detection_radius {
                affected.push(index);
                offsets.push((*vertex - center) * radius);
            }
        }

        if affected.is_empty() {
            log::warn!("no vertices within {detection_radius} of hole center; deformer is a no-op");
        } else {
            log::debug!("hole deformer tracking {} vertices", affected.len());
        }

        Self {
            affected,
            offsets,
            indicator_scale: radius,
        }
    }

    pub fn affected_count(&self) -> usize {
        self.affected.len()
    }

    /// Rewrite every affected vertex as `center + offset`, flattened to
    /// y = 0, in both the render and collision buffers
    pub fn update(&self, mesh: &mut SurfaceMesh, center: Vec3) {
        for (&index, &offset) in self.affected.iter().zip(&self.offsets) {
            let shifted = center + offset;
            let vertex = Vec3::new(shifted.x, 0.0, shifted.z);
            mesh.render_vertices[index] = vertex;
            mesh.collision_vertices[index] = vertex;
        }
    }
}

/// Rectangular movement bounds, given as two corner points
///
/// `corner_x` carries the +X extent (mirrored to -X); `corner_z` carries the
/// -Z extent (mirrored to +Z). Matches how the level defines its two limit
/// markers.
#[derive(Debug, Clone, Copy)]
pub struct MoveBounds {
    pub corner_x: f32,
    pub corner_z: f32,
}

/// Advances the hole position toward the input-driven target
#[derive(Debug, Clone)]
pub struct HoleMotion {
    position: Vec3,
    bounds: MoveBounds,
    movement_speed: f32,
    perfect_radius: f32,
}

impl HoleMotion {
    pub fn new(start: Vec3, bounds: MoveBounds, movement_speed: f32, hole_radius: f32) -> Self {
        Self {
            position: start,
            bounds,
            movement_speed,
            perfect_radius: PERFECT_RADIUS_FACTOR * hole_radius,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn perfect_radius(&self) -> f32 {
        self.perfect_radius
    }

    /// Smooth toward `current + delta`, then clamp into the bounds with the
    /// perfect radius as inset margin on all four sides.
    ///
    /// Zero movement speed or zero dt leaves the position unchanged; that is
    /// a valid idle state, not an error.
    pub fn update(&mut self, input_delta: Vec2, dt: f32) -> Vec3 {
        let target = self.position + Vec3::new(input_delta.x, 0.0, input_delta.y);
        let smoothed = lerp_toward(
            self.position,
            target,
            HOLE_SMOOTHING * self.movement_speed * dt,
        );

        self.position = Vec3::new(
            smoothed.x.clamp(
                -self.bounds.corner_x + self.perfect_radius,
                self.bounds.corner_x - self.perfect_radius,
            ),
            smoothed.y,
            smoothed.z.clamp(
                self.bounds.corner_z + self.perfect_radius,
                -self.bounds.corner_z - self.perfect_radius,
            ),
        );
        self.position
    }

    /// True when `position` satisfies the clamp invariant
    pub fn within_bounds(&self) -> bool {
        let x_limit = self.bounds.corner_x - self.perfect_radius;
        let z_min = self.bounds.corner_z + self.perfect_radius;
        let z_max = -self.bounds.corner_z - self.perfect_radius;
        self.position.x >= -x_limit
            && self.position.x <= x_limit
            && self.position.z >= z_min
            && self.position.z <= z_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    fn test_bounds() -> MoveBounds {
        MoveBounds {
            corner_x: 10.0,
            corner_z: -10.0,
        }
    }

    #[test]
    fn test_deformer_records_nearby_vertices() {
        let mesh = SurfaceMesh::flat_grid(10.0, 10.0, 20);
        let deformer = HoleDeformer::new(&mesh, Vec3::ZERO, 1.0);
        assert!(deformer.affected_count() > 0);
        // A 2-unit detection radius can't cover a 21x21 grid over 20 units
        assert!(deformer.affected_count() < mesh.vertex_count());
        assert_eq!(deformer.indicator_scale, 1.0);
    }

    #[test]
    fn test_deformer_empty_mesh_is_noop() {
        let mut mesh = SurfaceMesh::new(Vec::new());
        let deformer = HoleDeformer::new(&mesh, Vec3::ZERO, 1.0);
        assert_eq!(deformer.affected_count(), 0);
        deformer.update(&mut mesh, Vec3::new(3.0, 0.0, 3.0));
        assert_eq!(mesh.vertex_count(), 0);
    }

    #[test]
    fn test_deformer_flattens_y_and_keeps_copies_in_sync() {
        let mut mesh = SurfaceMesh::flat_grid(10.0, 10.0, 20);
        let deformer = HoleDeformer::new(&mesh, Vec3::ZERO, 1.0);

        deformer.update(&mut mesh, Vec3::new(2.0, 5.0, -3.0));
        assert!(mesh.copies_in_sync());
        assert!(mesh.render_vertices.iter().all(|v| v.y == 0.0));
    }

    #[test]
    fn test_deformer_update_is_idempotent() {
        let mut mesh = SurfaceMesh::flat_grid(10.0, 10.0, 20);
        let deformer = HoleDeformer::new(&mesh, Vec3::ZERO, 1.0);
        let center = Vec3::new(1.5, 0.0, -2.5);

        deformer.update(&mut mesh, center);
        let first = mesh.render_vertices.clone();
        deformer.update(&mut mesh, center);
        assert_eq!(first, mesh.render_vertices);
        assert!(mesh.copies_in_sync());
    }

    #[test]
    fn test_motion_moves_toward_input() {
        let mut motion = HoleMotion::new(Vec3::ZERO, test_bounds(), 10.0, 1.0);
        let pos = motion.update(Vec2::new(1.0, 0.0), SIM_DT);
        assert!(pos.x > 0.0);
        assert_eq!(pos.z, 0.0);
    }

    #[test]
    fn test_motion_zero_speed_is_idle() {
        let start = Vec3::new(1.0, 0.0, 2.0);
        let mut motion = HoleMotion::new(start, test_bounds(), 0.0, 1.0);
        assert_eq!(motion.update(Vec2::new(5.0, 5.0), SIM_DT), start);
        // Zero dt as well
        let mut motion = HoleMotion::new(start, test_bounds(), 10.0, 1.0);
        assert_eq!(motion.update(Vec2::new(5.0, 5.0), 0.0), start);
    }

    #[test]
    fn test_motion_clamps_to_bounds() {
        let mut motion = HoleMotion::new(Vec3::ZERO, test_bounds(), 40.0, 1.0);
        for _ in 0..2000 {
            motion.update(Vec2::new(100.0, 100.0), SIM_DT);
        }
        let pos = motion.position();
        assert_eq!(pos.x, 10.0 - motion.perfect_radius());
        assert_eq!(pos.z, 10.0 - motion.perfect_radius());
        assert!(motion.within_bounds());
    }

    proptest! {
        #[test]
        fn prop_position_always_within_bounds(
            deltas in prop::collection::vec((-50.0f32..50.0, -50.0f32..50.0), 1..200),
            speed in 0.0f32..60.0,
        ) {
            let mut motion = HoleMotion::new(Vec3::ZERO, test_bounds(), speed, 1.0);
            for (dx, dz) in deltas {
                motion.update(Vec2::new(dx, dz), SIM_DT);
                prop_assert!(motion.within_bounds());
            }
        }

        #[test]
        fn prop_deformer_idempotent_for_any_center(
            cx in -8.0f32..8.0,
            cz in -8.0f32..8.0,
        ) {
            let mut mesh = SurfaceMesh::flat_grid(10.0, 10.0, 16);
            let deformer = HoleDeformer::new(&mesh, Vec3::ZERO, 1.5);
            let center = Vec3::new(cx, 0.0, cz);

            deformer.update(&mut mesh, center);
            let first = mesh.render_vertices.clone();
            deformer.update(&mut mesh, center);
            prop_assert_eq!(first, mesh.render_vertices.clone());
            prop_assert!(mesh.copies_in_sync());
        }
    }
}
