use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

mod camera;
mod constants;
mod debug_panel;
mod firework;
mod hud;
mod input;
mod math_utils;
mod sky;
mod textures;
mod types;
mod viewport;

use camera::{orbit_camera_input, spawn_camera, update_orbit_camera};
use debug_panel::{sky_panel_system, PanelPointer};
use firework::{FireworkPlugin, FireworkSet};
use hud::{spawn_hud, update_hud};
use input::{firework_click_system, ClickTracker};
use sky::SkyPlugin;
use textures::{report_texture_failures, setup_texture_bank};
use types::SceneRng;
use viewport::{handle_window_resize, init_viewport, Viewport};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Fireworks".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(EguiPlugin { enable_multipass_for_primary_context: false })
        .add_plugins((SkyPlugin, FireworkPlugin))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(SceneRng::from_env())
        .init_resource::<Viewport>()
        .init_resource::<ClickTracker>()
        .init_resource::<PanelPointer>()
        .add_systems(Startup, (init_viewport, setup_texture_bank, spawn_camera, spawn_hud))
        .add_systems(Update, (
            sky_panel_system,
            firework_click_system.after(sky_panel_system).before(FireworkSet::Spawn),
            handle_window_resize.before(FireworkSet::Spawn),
            (orbit_camera_input, update_orbit_camera).chain().after(sky_panel_system),
            update_hud.after(FireworkSet::Animate),
            report_texture_failures,
        ))
        .run();
}
