//! Planet surface and earthquake markers
//!
//! [`Planet`] owns the dual mesh, the morph state and the live markers, and is the only
//! thing the rendering and input layers talk to. It holds no clock: every call that
//! depends on time takes the current playback time explicitly.

use bevy::prelude::*;

pub mod markers;
pub mod mesh;
pub mod morph;

pub use markers::{MarkerStep, QuakeMarker};
pub use mesh::DualMesh;
pub use morph::{MorphController, MorphMode};

use crate::quakes::QuakeRecord;

/// Stable identifier of a scene node, used to pair nodes with render entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Payload of a scene node; per-frame behavior is chosen by kind.
#[derive(Debug)]
pub enum NodeKind {
    Surface(Box<DualMesh>),
    Marker(QuakeMarker),
}

#[derive(Debug)]
pub struct SceneNode {
    pub id: NodeId,
    pub kind: NodeKind,
}

/// What changed during one [`Planet::update`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub retired: Vec<NodeId>,
}

#[derive(Resource, Debug)]
pub struct Planet {
    morph: MorphController,
    nodes: Vec<SceneNode>,
    marker_lifetime_secs: f64,
    wireframe: bool,
    next_id: u64,
}

impl Planet {
    pub const SURFACE: NodeId = NodeId(0);

    /// Build the surface mesh and the morph state. The mesh is never rebuilt.
    pub fn initialize(
        resolution: u32,
        morph_speed: f32,
        axial_tilt_deg: f32,
        marker_lifetime_secs: f64,
    ) -> Self {
        let surface = DualMesh::build(resolution);
        info!(
            "Planet surface built: resolution {}, {} vertices, {} triangles",
            surface.resolution(),
            surface.vertex_count(),
            surface.triangle_count()
        );

        Self {
            morph: MorphController::new(morph_speed, axial_tilt_deg),
            nodes: vec![SceneNode {
                id: Self::SURFACE,
                kind: NodeKind::Surface(Box::new(surface)),
            }],
            marker_lifetime_secs,
            wireframe: false,
            next_id: Self::SURFACE.0 + 1,
        }
    }

    /// Advance the morph, then every marker against the blend it just produced.
    pub fn update(&mut self, delta_secs: f32, current_time: f64) -> FrameReport {
        self.morph.advance(delta_secs);
        let blend = self.morph.blend();

        let mut report = FrameReport::default();
        let previous = std::mem::take(&mut self.nodes);
        let mut retained = Vec::with_capacity(previous.len());
        for mut node in previous {
            let keep = match &mut node.kind {
                NodeKind::Surface(_) => true,
                NodeKind::Marker(marker) => {
                    marker.step(current_time, blend) == MarkerStep::Alive
                }
            };
            if keep {
                retained.push(node);
            } else {
                report.retired.push(node.id);
            }
        }
        self.nodes = retained;

        if !report.retired.is_empty() {
            debug!(
                "Retired {} markers, {} active",
                report.retired.len(),
                self.marker_count()
            );
        }
        report
    }

    pub fn spawn_marker(
        &mut self,
        record: &QuakeRecord,
        normalized_magnitude: f32,
        current_time: f64,
    ) -> NodeId {
        let mut marker = QuakeMarker::new(
            record.geo_point(),
            record.magnitude as f32,
            normalized_magnitude,
            current_time,
            self.marker_lifetime_secs,
        );
        marker.position = marker.position_at(self.morph.blend());

        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(SceneNode {
            id,
            kind: NodeKind::Marker(marker),
        });
        id
    }

    /// Drop every marker, keeping the surface and morph state.
    pub fn clear_markers(&mut self) -> Vec<NodeId> {
        let mut removed = Vec::new();
        self.nodes.retain(|node| match node.kind {
            NodeKind::Surface(_) => true,
            NodeKind::Marker(_) => {
                removed.push(node.id);
                false
            }
        });
        removed
    }

    pub fn toggle_mode(&mut self) -> MorphMode {
        self.morph.toggle_mode()
    }

    pub fn set_debug_wireframe(&mut self, enabled: bool) {
        self.wireframe = enabled;
    }

    pub fn debug_wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn mode(&self) -> MorphMode {
        self.morph.mode()
    }

    pub fn blend(&self) -> f32 {
        self.morph.blend()
    }

    pub fn rotation(&self) -> Quat {
        self.morph.rotation()
    }

    pub fn surface(&self) -> Option<&DualMesh> {
        self.nodes.iter().find_map(|node| match &node.kind {
            NodeKind::Surface(mesh) => Some(mesh.as_ref()),
            NodeKind::Marker(_) => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = (NodeId, &QuakeMarker)> {
        self.nodes.iter().filter_map(|node| match &node.kind {
            NodeKind::Marker(marker) => Some((node.id, marker)),
            NodeKind::Surface(_) => None,
        })
    }

    #[cfg(test)]
    pub fn marker(&self, id: NodeId) -> Option<&QuakeMarker> {
        self.markers().find(|(node, _)| *node == id).map(|(_, m)| m)
    }

    pub fn marker_count(&self) -> usize {
        self.markers().count()
    }
}
