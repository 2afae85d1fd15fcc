//! Dual surface mesh: one grid topology with a flat map shape and a globe shape.
//!
//! Vertex `i` refers to the same grid cell in every attribute array, so the renderer
//! can blend `flat[i]` toward `sphere[i]` without touching the index buffer.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::core::coordinates::GeoPoint;

#[derive(Debug, Clone)]
pub struct DualMesh {
    resolution: u32,
    pub flat: Vec<Vec3>,
    pub flat_normals: Vec<Vec3>,
    pub sphere: Vec<Vec3>,
    pub sphere_normals: Vec<Vec3>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl DualMesh {
    /// Build a `(resolution + 1)²` vertex grid and its `2 * resolution²` triangles.
    ///
    /// Rows sweep 360° and columns 180°. Each vertex is projected with the row angle
    /// as longitude and the column angle as latitude, which lays rows out along the
    /// map's x axis and columns along its y axis, matching where markers land.
    pub fn build(resolution: u32) -> Self {
        let resolution = resolution.max(1);
        let side = resolution + 1;
        let vertex_count = (side * side) as usize;
        let r = resolution as f64;

        let mut flat = Vec::with_capacity(vertex_count);
        let mut flat_normals = Vec::with_capacity(vertex_count);
        let mut sphere = Vec::with_capacity(vertex_count);
        let mut sphere_normals = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);

        for row in 0..side {
            for col in 0..side {
                let (row_deg, col_deg) = grid_angles(row, col, resolution);
                let point = GeoPoint::new(col_deg, row_deg);

                flat.push(point.to_plane());
                // The map always faces the camera
                flat_normals.push(Vec3::Z);

                let on_sphere = point.to_sphere();
                sphere.push(on_sphere);
                sphere_normals.push((on_sphere - Vec3::ZERO).normalize());

                // u spans [-1, 0]; the texture sampler repeats on u
                let u = (row as f64 / r - 1.0) as f32;
                let v = (1.0 - col as f64 / r) as f32;
                uvs.push([u, v]);
            }
        }

        let mut indices = Vec::with_capacity((resolution * resolution * 6) as usize);
        for row in 0..resolution {
            for col in 0..resolution {
                let ul = side * row + col;
                let ur = side * row + col + 1;
                let ll = side * (row + 1) + col;
                let lr = side * (row + 1) + col + 1;

                indices.extend_from_slice(&[ul, lr, ur]);
                indices.extend_from_slice(&[ul, ll, lr]);
            }
        }

        Self {
            resolution,
            flat,
            flat_normals,
            sphere,
            sphere_normals,
            uvs,
            indices,
        }
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn vertex_count(&self) -> usize {
        self.flat.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Positions blended between the map (`0`) and the globe (`1`).
    pub fn blended_positions(&self, blend: f32) -> Vec<Vec3> {
        let t = blend.clamp(0.0, 1.0);
        self.flat
            .iter()
            .zip(&self.sphere)
            .map(|(f, s)| f.lerp(*s, t))
            .collect()
    }

    /// Normals blended the same way, renormalized.
    pub fn blended_normals(&self, blend: f32) -> Vec<Vec3> {
        let t = blend.clamp(0.0, 1.0);
        self.flat_normals
            .iter()
            .zip(&self.sphere_normals)
            .map(|(f, s)| {
                let n = f.lerp(*s, t);
                // Antipodal normals cancel halfway through the morph
                n.try_normalize().unwrap_or(*f)
            })
            .collect()
    }

    /// Render mesh at the given blend factor.
    pub fn to_mesh(&self, blend: f32) -> Mesh {
        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_indices(Indices::U32(self.indices.clone()));
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs.clone());
        self.write_blend(&mut mesh, blend);
        mesh
    }

    /// Overwrite the position and normal attributes of a mesh built by [`Self::to_mesh`].
    pub fn write_blend(&self, mesh: &mut Mesh, blend: f32) {
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.blended_positions(blend));
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.blended_normals(blend));
    }
}

/// Row angle in `[-180, 180]` and column angle in `[-90, 90]` for a grid vertex.
fn grid_angles(row: u32, col: u32, resolution: u32) -> (f64, f64) {
    let r = resolution as f64;
    let row_deg = -180.0 + (row as f64 / r) * 360.0;
    let col_deg = -90.0 + (col as f64 / r) * 180.0;
    (row_deg, col_deg)
}
