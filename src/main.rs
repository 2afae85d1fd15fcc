use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::light::GlobalAmbientLight;
use bevy::pbr::wireframe::WireframePlugin;
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{RenderCreation, WgpuFeatures, WgpuSettings};
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod core;
mod planet;
mod quakes;
mod ui;
mod visualization;

use quakes::QuakesPlugin;
use ui::{MainCamera, UiPlugin};
use visualization::VisualizationPlugin;

/// Marker component for the light that follows the camera
#[derive(Component)]
struct HeadLight;

// Setup scene and camera
pub fn setup(mut commands: Commands) {
    // The globe's night side should still read as land and sea
    commands.insert_resource(GlobalAmbientLight {
        brightness: 400.0,
        ..default()
    });

    // The flat map spans x in [-pi, pi]; back off far enough to see all of it
    let initial_distance = 6.0;

    let pan_orbit = PanOrbitCamera {
        focus: Vec3::ZERO,
        radius: Some(initial_distance),
        yaw: Some(0.0),
        pitch: Some(0.0),
        force_update: true,
        ..default()
    };

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            near: 0.01,
            far: 100.0,
            ..default()
        }),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        pan_orbit,
        MainCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_xyz(0.0, 0.0, initial_distance).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 6_000.0,
            ..default()
        },
        HeadLight,
        Transform::from_xyz(0.0, 0.0, initial_distance).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Keep the directional light shining from the camera toward the planet
fn follow_camera_light(
    camera: Query<&Transform, (With<MainCamera>, Without<HeadLight>)>,
    mut lights: Query<&mut Transform, With<HeadLight>>,
) {
    let Ok(camera) = camera.single() else {
        return;
    };
    for mut transform in lights.iter_mut() {
        transform.translation = camera.translation;
        transform.look_at(Vec3::ZERO, Vec3::Y);
    }
}

fn main() {
    let mut app = App::new();

    app.add_plugins((
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Earthquake Globe".to_string(),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            })
            .set(RenderPlugin {
                render_creation: RenderCreation::Automatic(WgpuSettings {
                    // Needed by the debug wireframe overlay
                    features: WgpuFeatures::POLYGON_MODE_LINE,
                    ..default()
                }),
                ..default()
            }),
        WireframePlugin::default(),
    ));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    app.add_plugins(PanOrbitCameraPlugin);

    // Add our custom plugins
    app.add_plugins(VisualizationPlugin);
    app.add_plugins(QuakesPlugin);
    app.add_plugins(UiPlugin);
    app.add_systems(Startup, setup);
    app.add_systems(Update, follow_camera_light);

    app.run();
}
