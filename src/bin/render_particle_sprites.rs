//! Utility to render the firework particle sprites
//! Run with: cargo run --bin render_particle_sprites
//!
//! Generates: assets/particles/{1..8}.png
//! Each image: 64x64 pixels, white shape on black. The shader only reads the red channel.

use bevy::prelude::*;
use bevy::render::view::screenshot::{save_to_disk, Screenshot};
use bevy::window::WindowResolution;
use std::f32::consts::PI;

const CELL_SIZE: u32 = 64;
const NUM_SPRITES: usize = 8;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Particle Sprite Renderer".to_string(),
                resolution: WindowResolution::new(CELL_SIZE as f32, CELL_SIZE as f32)
                    .with_scale_factor_override(1.0),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(RenderState::default())
        .add_systems(Startup, setup)
        .add_systems(Update, (render_frame, check_exit))
        .run();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenderPhase {
    Setup,      // Show the current sprite
    Wait,       // Wait for render
    Capture,    // Take screenshot
}

#[derive(Resource)]
struct RenderState {
    current_sprite: usize,
    frame_delay: u32,
    phase: RenderPhase,
    done: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            current_sprite: 0,
            frame_delay: 10,  // Let the render pipeline warm up
            phase: RenderPhase::Setup,
            done: false,
        }
    }
}

/// Part of sprite N. A sprite can be made of several layered meshes.
#[derive(Component)]
struct SpritePart(usize);

fn part(
    commands: &mut Commands,
    sprite: usize,
    mesh: Handle<Mesh>,
    material: Handle<ColorMaterial>,
    transform: Transform,
) {
    commands.spawn((
        Mesh2d(mesh),
        MeshMaterial2d(material),
        transform,
        Visibility::Hidden,
        SpritePart(sprite),
    ));
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let solid = materials.add(Color::WHITE);
    let half = CELL_SIZE as f32 * 0.5;

    // 1: soft glow, stacked translucent disks
    let glow_layers = 12;
    for i in 0..glow_layers {
        let radius = half * 0.95 * (1.0 - i as f32 / glow_layers as f32);
        let layer = materials.add(Color::srgba(1.0, 1.0, 1.0, 0.12));
        part(&mut commands, 0, meshes.add(Circle::new(radius)), layer, Transform::from_xyz(0.0, 0.0, i as f32 * 0.01));
    }

    // 2: disk
    part(&mut commands, 1, meshes.add(Circle::new(half * 0.42)), solid.clone(), Transform::IDENTITY);

    // 3: ring
    part(&mut commands, 2, meshes.add(Annulus::new(half * 0.52, half * 0.68)), solid.clone(), Transform::IDENTITY);

    // 4: cross
    let bar = meshes.add(Rectangle::new(half * 1.6, half * 0.14));
    part(&mut commands, 3, bar.clone(), solid.clone(), Transform::IDENTITY);
    part(&mut commands, 3, bar, solid.clone(), Transform::from_rotation(Quat::from_rotation_z(PI / 2.0)));

    // 5: five-point star, one thin rhombus per spike
    let spike = meshes.add(Rhombus::new(half * 0.3, half * 1.5));
    for i in 0..5 {
        let angle = i as f32 / 5.0 * PI;
        part(&mut commands, 4, spike.clone(), solid.clone(), Transform::from_rotation(Quat::from_rotation_z(angle)));
    }

    // 6: diamond
    part(&mut commands, 5, meshes.add(Rhombus::new(half * 1.2, half * 1.2)), solid.clone(), Transform::IDENTITY);

    // 7: core with a halo
    part(&mut commands, 6, meshes.add(Circle::new(half * 0.25)), solid.clone(), Transform::IDENTITY);
    let halo = materials.add(Color::srgba(1.0, 1.0, 1.0, 0.8));
    part(&mut commands, 6, meshes.add(Annulus::new(half * 0.64, half * 0.76)), halo, Transform::IDENTITY);

    // 8: hexagon
    part(&mut commands, 7, meshes.add(RegularPolygon::new(half * 0.5, 6)), solid, Transform::IDENTITY);

    commands.spawn(Camera2d);

    info!("Setup complete. Will render {} sprites", NUM_SPRITES);
}

fn render_frame(
    mut state: ResMut<RenderState>,
    mut parts: Query<(&mut Visibility, &SpritePart)>,
    mut commands: Commands,
) {
    if state.done {
        return;
    }

    if state.frame_delay > 0 {
        state.frame_delay -= 1;
        return;
    }

    match state.phase {
        RenderPhase::Setup => {
            for (mut vis, part) in parts.iter_mut() {
                *vis = if part.0 == state.current_sprite {
                    Visibility::Visible
                } else {
                    Visibility::Hidden
                };
            }

            state.frame_delay = 3;
            state.phase = RenderPhase::Wait;
        }

        RenderPhase::Wait => {
            state.phase = RenderPhase::Capture;
        }

        RenderPhase::Capture => {
            // Files are 1-based to match the runtime texture bank
            let path = format!("assets/particles/{}.png", state.current_sprite + 1);
            info!("Capturing sprite {} -> {}", state.current_sprite, path);

            commands.spawn(Screenshot::primary_window()).observe(save_to_disk(path));

            state.current_sprite += 1;
            if state.current_sprite >= NUM_SPRITES {
                info!("All {} sprites rendered! Check assets/particles/", NUM_SPRITES);
                state.done = true;
                // Give the last screenshot time to land on disk
                state.frame_delay = 10;
                return;
            }

            state.phase = RenderPhase::Setup;
        }
    }
}

fn check_exit(
    mut state: ResMut<RenderState>,
    mut exit: EventWriter<AppExit>,
) {
    if state.done {
        if state.frame_delay > 0 {
            state.frame_delay -= 1;
        } else {
            exit.write(AppExit::Success);
        }
    }
}
