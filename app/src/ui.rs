use crate::app::{Hover, KnnApp};
use crate::config::DemoConfig;

use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, emath::RectTransform,
};
use knn_regression::Session;

// #1976d2 at 70% and #e53935 at 80%, premultiplied.
const POINT_FILL: Color32 = Color32::from_rgba_premultiplied(17, 82, 146, 178);
const NEIGHBOR_RING: Color32 = Color32::from_rgb(0x43, 0xa0, 0x47);
const QUERY_FILL: Color32 = Color32::from_rgba_premultiplied(183, 46, 42, 204);
const LABEL: Color32 = Color32::from_gray(0x22);
const QUERY_HOVER_RING: Color32 = Color32::from_gray(0x22);

/// The data space: the unit square, y growing downwards like the screen.
fn unit_rect() -> Rect {
    Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0))
}

/// Draws the left-side panel with the scatter, k and classify controls.
pub fn draw_side_panel(app: &mut KnnApp, ctx: &egui::Context) {
    egui::SidePanel::left("controls_panel").show(ctx, |ui| {
        ui.heading("KNN Regression");
        ui.separator();

        if ui.button("Scatter points").clicked() {
            app.scatter();
        }
        ui.separator();

        draw_k_selector(app, ui);

        let enabled = app.session.can_classify();
        if ui.add_enabled(enabled, egui::Button::new("Classify")).clicked() {
            app.classify();
        }
        ui.separator();

        draw_query_summary(app, ui);

        if let Some(status) = &app.status {
            ui.separator();
            ui.colored_label(Color32::from_rgb(0xc6, 0x28, 0x28), status);
        }
    });
}

fn draw_k_selector(app: &mut KnnApp, ui: &mut Ui) {
    let choices = app.config.k_choices.clone();
    ui.horizontal(|ui| {
        ui.label("k:");
        egui::ComboBox::from_id_salt("k_select")
            .selected_text(app.selected_k.to_string())
            .show_ui(ui, |ui| {
                for k in choices {
                    ui.selectable_value(&mut app.selected_k, k, k.to_string());
                }
            });
    });
}

fn draw_query_summary(app: &KnnApp, ui: &mut Ui) {
    match app.session.query_point() {
        None => {
            ui.label("Click on the plot to place a query point.");
        }
        Some(point) => {
            ui.label(format!("Query: [{:.2}, {:.2}]", point.x, point.y));
            match point.value {
                Some(value) => ui.label(format!("Estimate: {:.2}", value)),
                None => ui.label("Not classified yet."),
            };
        }
    }
}

/// Draws the central panel containing the scatter plot.
pub fn draw_central_panel(app: &mut KnnApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let side = ui.available_size().min_elem();
        let (response, painter) = ui.allocate_painter(egui::vec2(side, side), Sense::click());
        let to_screen = RectTransform::from_to(unit_rect(), response.rect);
        let to_data = to_screen.inverse();

        painter.rect_filled(response.rect, 0.0, Color32::WHITE);

        // --- Interaction Handling ---
        app.hover = response
            .hover_pos()
            .and_then(|pos| hit_test(&app.session, &app.config, &to_screen, pos));

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let data = to_data * pos;
                app.place_query(
                    f64::from(data.x.clamp(0.0, 1.0)),
                    f64::from(data.y.clamp(0.0, 1.0)),
                );
            }
        }

        // --- Drawing Layers ---
        let radius = app.config.point_radius;
        for (i, point) in app.session.dataset().iter().enumerate() {
            let center = to_screen * Pos2::new(point.x as f32, point.y as f32);
            painter.circle_filled(center, radius, POINT_FILL);
            if app.hover == Some(Hover::Known(i)) {
                painter.text(
                    center - egui::vec2(0.0, radius + 6.0),
                    Align2::CENTER_BOTTOM,
                    format!("{:.2}", point.value),
                    FontId::proportional(13.0),
                    LABEL,
                );
            }
        }

        if let Some(neighbors) = app.session.neighbors() {
            for n in neighbors.iter() {
                let center = to_screen * Pos2::new(n.point.x as f32, n.point.y as f32);
                painter.circle_stroke(center, radius + 3.0, Stroke::new(3.0, NEIGHBOR_RING));
            }
        }

        if let Some(query) = app.session.query_point() {
            let center = to_screen * Pos2::new(query.x as f32, query.y as f32);
            painter.circle_filled(center, app.config.query_radius, QUERY_FILL);
            if let Some(stroke) = query_outline(app.hover) {
                painter.circle_stroke(center, app.config.query_radius + 2.0, stroke);
            }
            // A classified point always shows its estimate.
            if let Some(value) = query.value {
                painter.text(
                    center - egui::vec2(0.0, app.config.query_radius + 6.0),
                    Align2::CENTER_BOTTOM,
                    format!("{:.2}", value),
                    FontId::proportional(15.0),
                    LABEL,
                );
            }
        }
    });
}

/// The ring drawn around the query point while the pointer is over it.
fn query_outline(hover: Option<Hover>) -> Option<Stroke> {
    match hover {
        Some(Hover::Query) => Some(Stroke::new(2.0, QUERY_HOVER_RING)),
        _ => None,
    }
}

/// Finds what lies under `pointer`, in screen space.
///
/// Dataset points are checked before the query point; a hit is anything within
/// the radius plus `hover_slack` squared pixels.
pub fn hit_test(
    session: &Session<f64>,
    config: &DemoConfig,
    to_screen: &RectTransform,
    pointer: Pos2,
) -> Option<Hover> {
    let within = |x: f64, y: f64, radius: f32| {
        let center = *to_screen * Pos2::new(x as f32, y as f32);
        center.distance_sq(pointer) <= radius * radius + config.hover_slack
    };

    session
        .dataset()
        .iter()
        .position(|p| within(p.x, p.y, config.point_radius))
        .map(Hover::Known)
        .or_else(|| {
            session
                .query_point()
                .filter(|q| within(q.x, q.y, config.query_radius))
                .map(|_| Hover::Query)
        })
}
