use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};
use dipole_core::render::{plasma, viridis, Rgb};
use dipole_core::{
    Axis, ChargeId, FieldFrame, InteractiveSession, Polarity, RenderSurface, SessionConfig,
    Vec2 as FieldVec2,
};
use std::convert::Infallible;

// Constants
const TITLE: &str = "Electric field of a dipole";
const POSITIVE_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 40, 40);
const NEGATIVE_COLOR: egui::Color32 = egui::Color32::from_rgb(40, 90, 230);
const ARROW_FILL: f32 = 0.7; // Arrow length as a fraction of the grid spacing
const AXIS_MARGIN: f32 = 48.0;
const FIELD_NOTES: &str = "Field characteristics:\n\n\
    • Strongest close to the charges\n\
    • Field lines leave (+) and enter (−)\n\
    • Colour shows the field magnitude\n\
    • Field lines never cross";

fn main() {
    let mut session = match InteractiveSession::new(SessionConfig::default(), EguiSurface::default()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to create session: {e}");
            std::process::exit(1);
        }
    };
    // First frame before the window opens
    never_fails(session.recompute_and_render());

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: format!("{TITLE} - Bevy Demo"),
                        resolution: (1600., 900.).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "wgpu=error,naga=warn,dipole_core=debug".to_string(),
                    level: Level::INFO,
                }),
        )
        .add_plugins(EguiPlugin)
        .insert_resource(DipoleState {
            session,
            dark: true,
            fps: 60.0,
        })
        .add_systems(Startup, setup)
        .add_systems(Update, (fps_counter_system, theme_system, ui_system).chain())
        .run();
}

/// Keeps the latest frame; egui repaints from it every pass
#[derive(Default)]
struct EguiSurface {
    frame: Option<FieldFrame>,
}

impl RenderSurface for EguiSurface {
    type Error = Infallible;

    fn present(&mut self, frame: &FieldFrame) -> Result<(), Infallible> {
        self.frame = Some(frame.clone());
        Ok(())
    }
}

fn never_fails(result: Result<(), Infallible>) {
    result.unwrap_or_else(|never| match never {});
}

#[derive(Resource)]
struct DipoleState {
    session: InteractiveSession<EguiSurface>,
    dark: bool,

    // Performance metrics
    fps: f32,
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());

    info!("=== {TITLE} - Bevy Demo ===");
    info!("Drag the sliders in the control panel to move the charges.");
}

fn fps_counter_system(mut state: ResMut<DipoleState>, time: Res<Time>) {
    let dt = time.delta_seconds();
    if dt > 0.0 {
        state.fps = 1.0 / dt;
    }
}

fn theme_system(
    mut contexts: EguiContexts,
    state: Res<DipoleState>,
    mut applied: Local<Option<bool>>,
) {
    if *applied != Some(state.dark) {
        *applied = Some(state.dark);
        let visuals = if state.dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        contexts.ctx_mut().set_visuals(visuals);
    }
}

fn ui_system(mut contexts: EguiContexts, mut state: ResMut<DipoleState>) {
    let ctx = contexts.ctx_mut();

    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading(TITLE);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = if state.dark { "☀ Light" } else { "🌙 Dark" };
                if ui.button(label).clicked() {
                    state.dark = !state.dark;
                }
            });
        });
    });

    egui::SidePanel::left("control_panel")
        .default_width(320.0)
        .show(ctx, |ui| {
            ui.heading("Control Panel");
            ui.separator();

            let bound = state.session.config().position_bound;
            for id in ChargeId::ALL {
                let (name, color) = match id.polarity() {
                    Polarity::Positive => ("Positive charge (+q)", POSITIVE_COLOR),
                    Polarity::Negative => ("Negative charge (−q)", NEGATIVE_COLOR),
                };
                ui.colored_label(color, name);
                for axis in [Axis::X, Axis::Y] {
                    let mut value = state.session.state().charge(id).position()[axis.index()];
                    ui.horizontal(|ui| {
                        ui.label(format!("Position {axis}{}:", id.subscript()));
                        if ui
                            .add(egui::Slider::new(&mut value, -bound..=bound).fixed_decimals(1))
                            .changed()
                        {
                            never_fails(state.session.set_position(id, axis, value));
                        }
                    });
                }
                ui.separator();
            }

            if ui.button("Reset positions").clicked() {
                never_fails(state.session.reset());
            }
            ui.separator();

            ui.heading("Information");
            if let Some(frame) = state.session.surface().frame.as_ref() {
                let labels = frame.labels();
                ui.label(labels.separation.as_str());
                for line in labels.charges.lines() {
                    ui.label(line);
                }
                ui.label(labels.constant.as_str());
                let (lo, hi) = frame.magnitude_range();
                ui.label(format!("|E| range: {lo:.3e} .. {hi:.3e}"));
            }
            ui.group(|ui| {
                ui.label(FIELD_NOTES);
            });
            ui.separator();

            ui.heading("Performance");
            ui.label(format!("FPS: {:.1}", state.fps));
            ui.label(format!(
                "Recompute: {:.2} ms",
                state.session.timer().smoothed_frame_time_ms()
            ));
        });

    let dark = state.dark;
    egui::CentralPanel::default().show(ctx, |ui| {
        if let Some(frame) = state.session.surface().frame.as_ref() {
            draw_field(ui, frame, dark);
        }
    });
}

fn color32(c: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(c.r, c.g, c.b)
}

/// Maps plot coordinates onto a square screen rectangle, +y up
struct PlotTransform {
    rect: egui::Rect,
    half_extent: f32,
}

impl PlotTransform {
    fn scale(&self) -> f32 {
        self.rect.width() / (2.0 * self.half_extent)
    }

    fn to_screen(&self, p: FieldVec2) -> egui::Pos2 {
        egui::pos2(
            self.rect.left() + (p.x + self.half_extent) * self.scale(),
            self.rect.bottom() - (p.y + self.half_extent) * self.scale(),
        )
    }
}

fn draw_field(ui: &mut egui::Ui, frame: &FieldFrame, dark: bool) {
    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
    let text_color = if dark { egui::Color32::WHITE } else { egui::Color32::BLACK };

    let available = response.rect.shrink(AXIS_MARGIN);
    let side = available.width().min(available.height());
    let plot_rect = egui::Rect::from_center_size(available.center(), egui::vec2(side, side));
    let plot = PlotTransform {
        rect: plot_rect,
        half_extent: frame.half_extent(),
    };

    let grid = frame.grid();
    let spacing = if grid.width() > 1 {
        (grid.xs().get(1, 0) - grid.xs().get(0, 0)).abs() * plot.scale()
    } else {
        side
    };

    // Filled magnitude bands
    let clipped = painter.with_clip_rect(plot_rect);
    for (col, row, p) in grid.points() {
        let cell = egui::Rect::from_center_size(plot.to_screen(p), egui::vec2(spacing, spacing));
        clipped.rect_filled(cell.expand(0.5), 0.0, color32(viridis(frame.contour_fraction(col, row))));
    }

    // Direction arrows coloured by magnitude
    let arrow_len = spacing * ARROW_FILL;
    for (col, row, p) in grid.points() {
        let dir = frame.directions().at(col, row);
        if dir.norm_squared() < 1e-12 {
            continue;
        }
        let v = egui::vec2(dir.x, -dir.y) * arrow_len;
        let color = color32(plasma(frame.normalized_magnitude(frame.magnitude().get(col, row))));
        clipped.arrow(plot.to_screen(p) - v * 0.5, v, egui::Stroke::new(1.5, color));
    }

    // Charge markers
    for marker in frame.markers() {
        let center = plot.to_screen(marker.position);
        let color = match marker.polarity {
            Polarity::Positive => POSITIVE_COLOR,
            Polarity::Negative => NEGATIVE_COLOR,
        };
        painter.circle_filled(center, (marker.radius * plot.scale()).max(6.0), color);
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            marker.symbol(),
            egui::FontId::proportional(18.0),
            egui::Color32::WHITE,
        );
    }

    // Frame, ticks and labels
    painter.rect_stroke(plot_rect, 0.0, egui::Stroke::new(1.0, text_color));
    let h = frame.half_extent();
    let mut tick = -h.floor();
    while tick <= h {
        let x = plot.to_screen(FieldVec2::new(tick, -h));
        let y = plot.to_screen(FieldVec2::new(-h, tick));
        painter.text(
            x + egui::vec2(0.0, 6.0),
            egui::Align2::CENTER_TOP,
            format!("{tick:.0}"),
            egui::FontId::proportional(12.0),
            text_color,
        );
        painter.text(
            y - egui::vec2(6.0, 0.0),
            egui::Align2::RIGHT_CENTER,
            format!("{tick:.0}"),
            egui::FontId::proportional(12.0),
            text_color,
        );
        tick += 1.0;
    }
    painter.text(
        egui::pos2(plot_rect.center().x, plot_rect.bottom() + 26.0),
        egui::Align2::CENTER_TOP,
        "x (m)",
        egui::FontId::proportional(14.0),
        text_color,
    );
    painter.text(
        egui::pos2(plot_rect.left() - 34.0, plot_rect.center().y),
        egui::Align2::RIGHT_CENTER,
        "y (m)",
        egui::FontId::proportional(14.0),
        text_color,
    );
    painter.text(
        egui::pos2(plot_rect.center().x, plot_rect.top() - 8.0),
        egui::Align2::CENTER_BOTTOM,
        TITLE,
        egui::FontId::proportional(18.0),
        text_color,
    );
}
