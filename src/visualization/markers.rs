//! Earthquake marker entities.

use bevy::mesh::{SphereKind, SphereMeshBuilder};
use bevy::prelude::*;
use std::collections::HashMap;

use crate::planet::{NodeId, Planet};
use crate::visualization::PlanetConfig;
use crate::visualization::earth::{EarthSurface, advance_planet};

/// Plugin mirroring planet markers as child entities of the surface
pub struct MarkersPlugin;

impl Plugin for MarkersPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MarkerEntities>()
            .init_resource::<RetiredMarkers>()
            .add_systems(Startup, setup_marker_assets)
            .add_systems(
                Update,
                (despawn_retired_markers, sync_marker_entities)
                    .chain()
                    .after(advance_planet),
            );
    }
}

/// Render entity for each live marker node
#[derive(Resource, Deref, DerefMut, Default)]
pub struct MarkerEntities(pub HashMap<NodeId, Entity>);

/// Marker nodes the planet dropped since the last sync
#[derive(Resource, Deref, DerefMut, Default)]
pub struct RetiredMarkers(pub Vec<NodeId>);

#[derive(Resource)]
struct MarkerAssets {
    sphere_mesh: Handle<Mesh>,
}

#[derive(Component)]
pub struct QuakeMarkerNode;

fn setup_marker_assets(
    mut commands: Commands,
    config: Res<PlanetConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let sphere_mesh = meshes.add(SphereMeshBuilder::new(
        config.marker_radius,
        SphereKind::Ico { subdivisions: 3 },
    ));
    commands.insert_resource(MarkerAssets { sphere_mesh });
}

fn despawn_retired_markers(
    mut commands: Commands,
    mut entities: ResMut<MarkerEntities>,
    mut retired: ResMut<RetiredMarkers>,
) {
    // A marker can be spawned and retired between two syncs and never get an entity
    for id in retired.drain(..) {
        if let Some(entity) = entities.remove(&id) {
            commands.entity(entity).despawn();
        }
    }
}

fn sync_marker_entities(
    mut commands: Commands,
    planet: Res<Planet>,
    assets: Res<MarkerAssets>,
    mut entities: ResMut<MarkerEntities>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    surface: Query<Entity, With<EarthSurface>>,
    mut transforms: Query<&mut Transform, With<QuakeMarkerNode>>,
) {
    let Ok(surface) = surface.single() else {
        return;
    };

    for (id, marker) in planet.markers() {
        let transform = Transform::from_translation(marker.position)
            .with_scale(Vec3::splat(marker.scale));

        if let Some(&entity) = entities.get(&id) {
            if let Ok(mut current) = transforms.get_mut(entity) {
                *current = transform;
            }
            continue;
        }

        let entity = commands
            .spawn((
                Mesh3d(assets.sphere_mesh.clone()),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: marker.color(),
                    unlit: true,
                    ..default()
                })),
                transform,
                QuakeMarkerNode,
                ChildOf(surface),
            ))
            .id();
        entities.insert(id, entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_retired_markers_are_despawned() {
        let mut world = World::new();
        let expired = world.spawn(QuakeMarkerNode).id();
        let live = world.spawn(QuakeMarkerNode).id();

        let mut entities = MarkerEntities::default();
        entities.insert(NodeId(1), expired);
        entities.insert(NodeId(2), live);
        world.insert_resource(entities);
        // NodeId(3) was retired before it ever got an entity
        world.insert_resource(RetiredMarkers(vec![NodeId(1), NodeId(3)]));

        world.run_system_once(despawn_retired_markers).unwrap();

        assert!(world.get_entity(expired).is_err());
        assert!(world.get_entity(live).is_ok());
        let entities = world.resource::<MarkerEntities>();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities.get(&NodeId(2)), Some(&live));
        assert!(world.resource::<RetiredMarkers>().is_empty());
    }
}
