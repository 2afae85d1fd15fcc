use bevy::image::{ImageAddressMode, ImageLoaderSettings, ImageSampler, ImageSamplerDescriptor};
use bevy::pbr::wireframe::Wireframe;
use bevy::prelude::*;

use crate::planet::Planet;
use crate::quakes::PlaybackClock;
use crate::visualization::PlanetConfig;
use crate::visualization::markers::RetiredMarkers;

/// Plugin for the morphing Earth surface
pub struct EarthPlugin;

/// Resource to store the surface mesh handle for per-frame blending
#[derive(Resource)]
pub struct EarthMeshHandle {
    pub handle: Handle<Mesh>,
}

/// Marker component for the surface entity; markers are its children
#[derive(Component)]
pub struct EarthSurface;

impl Plugin for EarthPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_earth).add_systems(
            Update,
            (advance_planet, apply_surface_morph, apply_wireframe)
                .chain()
                .after(crate::quakes::advance_playback),
        );
    }
}

/// Build the planet, upload its flat mesh and spawn the surface entity
pub fn setup_earth(
    mut commands: Commands,
    config: Res<PlanetConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    let planet = Planet::initialize(
        config.mesh_resolution,
        config.morph_speed,
        config.axial_tilt_deg,
        config.marker_lifetime_secs,
    );
    let Some(surface) = planet.surface() else {
        warn!("Planet has no surface node");
        return;
    };
    let mesh_handle = meshes.add(surface.to_mesh(planet.blend()));

    commands.insert_resource(EarthMeshHandle {
        handle: mesh_handle.clone(),
    });

    // u runs over [-1, 0] so the sampler must wrap; no mipmaps keeps the map sharp
    let texture: Handle<Image> = asset_server.load_with_settings(
        config.texture_path.clone(),
        |settings: &mut ImageLoaderSettings| {
            settings.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
                address_mode_u: ImageAddressMode::Repeat,
                ..ImageSamplerDescriptor::linear()
            });
        },
    );

    let material_handle = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(texture),
        perceptual_roughness: 1.0,
        // The flat sheet is seen from both sides while it curls up
        cull_mode: None,
        double_sided: true,
        ..default()
    });

    commands.spawn((
        Mesh3d(mesh_handle),
        MeshMaterial3d(material_handle),
        Transform::from_rotation(planet.rotation()),
        Visibility::Visible,
        EarthSurface,
        Name::new("Earth"),
    ));

    commands.insert_resource(planet);
}

/// One planet tick per frame, at the playback time the clock just reached
pub fn advance_planet(
    time: Res<Time>,
    clock: Res<PlaybackClock>,
    mut planet: ResMut<Planet>,
    mut retired: ResMut<RetiredMarkers>,
) {
    let report = planet.update(time.delta_secs(), clock.elapsed_secs);
    retired.extend(report.retired);
}

/// Push the blended shape and orientation to the surface entity
pub fn apply_surface_morph(
    planet: Res<Planet>,
    mesh_handle: Res<EarthMeshHandle>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut surface: Query<&mut Transform, With<EarthSurface>>,
    mut uploaded_blend: Local<Option<f32>>,
) {
    for mut transform in surface.iter_mut() {
        transform.rotation = planet.rotation();
    }

    let blend = planet.blend();
    if *uploaded_blend == Some(blend) {
        return;
    }
    let Some(dual) = planet.surface() else {
        return;
    };
    if let Some(mut mesh) = meshes.get_mut(&mesh_handle.handle) {
        dual.write_blend(&mut mesh, blend);
        *uploaded_blend = Some(blend);
    }
}

/// Keep the wireframe overlay in step with the planet's debug hint
pub fn apply_wireframe(
    mut commands: Commands,
    planet: Res<Planet>,
    surface: Query<(Entity, Has<Wireframe>), With<EarthSurface>>,
) {
    let wanted = planet.debug_wireframe();
    for (entity, has_wireframe) in surface.iter() {
        if wanted && !has_wireframe {
            commands.entity(entity).insert(Wireframe);
        } else if !wanted && has_wireframe {
            commands.entity(entity).remove::<Wireframe>();
        }
    }
}
