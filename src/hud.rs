// On-screen info: FPS and live firework count
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use crate::firework::Firework;
use crate::types::HudText;

pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new("FPS: -- | Fireworks: 0\nClick: launch | Drag: orbit | Scroll: zoom"),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(0.3, 0.95, 0.4)),  // Bright greenish color
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        HudText,
    ));
}

pub fn hud_text(fps: f64, live_fireworks: usize) -> String {
    format!(
        "FPS: {:.0} | Fireworks: {}\nClick: launch | Drag: orbit | Scroll: zoom",
        fps, live_fireworks
    )
}

pub fn update_hud(
    diagnostics: Res<DiagnosticsStore>,
    firework_query: Query<&Firework>,
    mut text_query: Query<&mut Text, With<HudText>>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0);
    let live = firework_query.iter().filter(|f| f.is_live()).count();

    for mut text in text_query.iter_mut() {
        *text = Text::new(hud_text(fps, live));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_text() {
        assert!(hud_text(59.6, 3).starts_with("FPS: 60 | Fireworks: 3\n"));
    }
}
