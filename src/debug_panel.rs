// Sky debug panel (egui sliders)
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use crate::constants::DEBUG_PANEL_WIDTH;
use crate::sky::SkyParameters;

/// Whether egui owns the pointer this frame. Written by the panel, read by
/// the click and orbit systems that run after it.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelPointer {
    pub over_panel: bool,
}

/// One slider: label, inclusive range, step, and the field it edits.
pub struct SliderSpec {
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f64,
    pub field: fn(&mut SkyParameters) -> &mut f32,
}

pub const SKY_SLIDERS: [SliderSpec; 7] = [
    SliderSpec { label: "turbidity", min: 0.0, max: 20.0, step: 0.1, field: |p| &mut p.turbidity },
    SliderSpec { label: "rayleigh", min: 0.0, max: 4.0, step: 0.001, field: |p| &mut p.rayleigh },
    SliderSpec { label: "mieCoefficient", min: 0.0, max: 0.1, step: 0.001, field: |p| &mut p.mie_coefficient },
    SliderSpec { label: "mieDirectionalG", min: 0.0, max: 1.0, step: 0.001, field: |p| &mut p.mie_directional_g },
    SliderSpec { label: "elevation", min: -3.0, max: 10.0, step: 0.01, field: |p| &mut p.elevation },
    SliderSpec { label: "azimuth", min: -180.0, max: 180.0, step: 0.1, field: |p| &mut p.azimuth },
    SliderSpec { label: "exposure", min: 0.0, max: 1.0, step: 0.0001, field: |p| &mut p.exposure },
];

/// Draws the panel on a copy of the parameters and only writes back on a real edit,
/// so change detection (and the sky re-apply) fires once per edit.
pub fn sky_panel_system(
    mut contexts: EguiContexts,
    mut params: ResMut<SkyParameters>,
    mut panel_pointer: ResMut<PanelPointer>,
) {
    let Some(ctx) = contexts.try_ctx_mut() else { return };

    let mut edited = *params;
    egui::Window::new("Sky")
        .default_width(DEBUG_PANEL_WIDTH)
        .default_pos(egui::pos2(12.0, 48.0))
        .show(ctx, |ui| {
            for slider in &SKY_SLIDERS {
                ui.add(
                    egui::Slider::new((slider.field)(&mut edited), slider.min..=slider.max)
                        .step_by(slider.step)
                        .text(slider.label),
                );
            }
        });

    panel_pointer.set_if_neq(PanelPointer {
        over_panel: ctx.wants_pointer_input() || ctx.is_pointer_over_area(),
    });
    params.set_if_neq(edited);
}
