// Click-to-spawn input handling
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use crate::constants::CLICK_DRAG_THRESHOLD;
use crate::debug_panel::PanelPointer;
use crate::firework::{FireworkSpawn, SpawnFirework};
use crate::textures::TextureBank;
use crate::types::SceneRng;

/// Where the current left press started. `None` when the press landed on the debug panel.
#[derive(Resource, Default)]
pub struct ClickTracker {
    press_position: Option<Vec2>,
}

/// A press/release pair only counts as a click if the cursor barely moved,
/// so orbit drags don't launch fireworks.
pub fn is_click(press: Vec2, release: Vec2) -> bool {
    press.distance(release) < CLICK_DRAG_THRESHOLD
}

/// Every click anywhere in the viewport requests one firework with fresh random parameters.
/// No debounce and no cap on live fireworks.
pub fn firework_click_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    panel_pointer: Res<PanelPointer>,
    mut tracker: ResMut<ClickTracker>,
    texture_bank: Option<Res<TextureBank>>,
    mut rng: ResMut<SceneRng>,
    mut spawn_events: EventWriter<SpawnFirework>,
) {
    let Ok(window) = window_query.single() else { return };
    let cursor = window.cursor_position();

    if mouse_button.just_pressed(MouseButton::Left) {
        tracker.press_position = if panel_pointer.over_panel { None } else { cursor };
    }

    if !mouse_button.just_released(MouseButton::Left) {
        return;
    }
    let (Some(press), Some(release)) = (tracker.press_position.take(), cursor) else { return };
    if !is_click(press, release) {
        return;
    }

    let Some(bank) = texture_bank else {
        warn!("⚠️ Click ignored: texture bank not ready");
        return;
    };

    let spawn = FireworkSpawn::random(&mut rng.0, &bank);
    debug!("🖱️ Click at {:?} -> firework with {} particles", release, spawn.count);
    spawn_events.write(SpawnFirework(spawn));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PARTICLE_TEXTURE_COUNT;

    #[derive(Resource, Default)]
    struct SpawnRequests(Vec<FireworkSpawn>);

    fn record_spawn_requests(mut events: EventReader<SpawnFirework>, mut requests: ResMut<SpawnRequests>) {
        requests.0.extend(events.read().map(|SpawnFirework(spawn)| spawn.clone()));
    }

    fn test_app(with_bank: bool) -> (App, Entity) {
        let mut app = App::new();
        app.init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<ClickTracker>()
            .init_resource::<PanelPointer>()
            .init_resource::<SpawnRequests>()
            .insert_resource(SceneRng::seeded(3))
            .add_event::<SpawnFirework>()
            .add_systems(Update, (firework_click_system, record_spawn_requests).chain());
        if with_bank {
            app.insert_resource(TextureBank::from_handles(
                (0..PARTICLE_TEXTURE_COUNT as u128)
                    .map(Handle::<Image>::weak_from_u128)
                    .collect(),
            ));
        }
        let window = app.world_mut().spawn((Window::default(), PrimaryWindow)).id();
        (app, window)
    }

    fn mouse_frame(app: &mut App, window: Entity, cursor: Vec2, pressed: bool) {
        if let Some(mut window) = app.world_mut().get_mut::<Window>(window) {
            window.set_cursor_position(Some(cursor));
        }
        {
            let mut buttons = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
            buttons.clear();
            if pressed {
                buttons.press(MouseButton::Left);
            } else {
                buttons.release(MouseButton::Left);
            }
        }
        app.update();
    }

    fn click(app: &mut App, window: Entity, press: Vec2, release: Vec2) {
        mouse_frame(app, window, press, true);
        mouse_frame(app, window, release, false);
    }

    fn requests(app: &App) -> usize {
        app.world().resource::<SpawnRequests>().0.len()
    }

    #[test]
    fn test_click_threshold() {
        let press = Vec2::new(100.0, 100.0);
        assert!(is_click(press, press));
        assert!(is_click(press, press + Vec2::new(3.0, 3.0)));
        assert!(!is_click(press, press + Vec2::new(CLICK_DRAG_THRESHOLD, 0.0)));
        assert!(!is_click(press, Vec2::new(400.0, 20.0)));
    }

    #[test]
    fn test_click_requests_one_random_firework() {
        let (mut app, window) = test_app(true);
        let at = Vec2::new(200.0, 150.0);

        mouse_frame(&mut app, window, at, true);
        assert_eq!(requests(&app), 0, "press alone must not spawn");

        mouse_frame(&mut app, window, at + Vec2::new(2.0, 1.0), false);
        assert_eq!(requests(&app), 1);

        let spawn = app.world().resource::<SpawnRequests>().0[0].clone();
        assert!((400..=2400).contains(&spawn.count));
        assert!(spawn.radius >= 0.6 && spawn.radius < 1.6);
    }

    #[test]
    fn test_drag_does_not_spawn() {
        let (mut app, window) = test_app(true);
        click(&mut app, window, Vec2::new(100.0, 100.0), Vec2::new(220.0, 100.0));
        assert_eq!(requests(&app), 0);
    }

    #[test]
    fn test_press_on_panel_does_not_spawn() {
        let (mut app, window) = test_app(true);
        app.world_mut().resource_mut::<PanelPointer>().over_panel = true;
        mouse_frame(&mut app, window, Vec2::new(50.0, 60.0), true);

        // Releasing outside the panel doesn't turn it into a click
        app.world_mut().resource_mut::<PanelPointer>().over_panel = false;
        mouse_frame(&mut app, window, Vec2::new(50.0, 60.0), false);
        assert_eq!(requests(&app), 0);
    }

    #[test]
    fn test_two_clicks_request_two_independent_fireworks() {
        let (mut app, window) = test_app(true);
        click(&mut app, window, Vec2::new(300.0, 300.0), Vec2::new(300.0, 300.0));
        click(&mut app, window, Vec2::new(600.0, 400.0), Vec2::new(601.0, 400.0));

        let spawned = &app.world().resource::<SpawnRequests>().0;
        assert_eq!(spawned.len(), 2);
        assert_ne!(spawned[0].position, spawned[1].position);
    }

    #[test]
    fn test_click_without_texture_bank_is_dropped() {
        let (mut app, window) = test_app(false);
        click(&mut app, window, Vec2::new(300.0, 300.0), Vec2::new(300.0, 300.0));
        assert_eq!(requests(&app), 0);
        assert!(app.world().resource::<ClickTracker>().press_position.is_none());
    }
}
