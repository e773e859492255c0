use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

use crate::charts;
use crate::color::level_color;
use crate::data::model::{Grade, Level, School, Subject};
use crate::data::stats;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Bubble scatter: Simce Lectura vs Matemática, bubble size = Autoestima
// ---------------------------------------------------------------------------

/// Render one grade's scatter panel (chart + correlation readout), or the
/// no-data placeholder when nothing in the filtered view is plottable.
pub fn bubble_panel(ui: &mut Ui, state: &AppState, grade: Grade) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    ui.heading(format!("{}: Rendimiento vs Autoestima", grade.label()));

    let Some(chart) = charts::bubble_chart(dataset, &state.visible_indices, grade) else {
        ui.label(format!(
            "No hay datos de {} para los filtros seleccionados.",
            grade.label()
        ));
        return;
    };

    correlation_readout(ui, state, grade);

    Plot::new(("bubble", grade.label()))
        .x_axis_label("Simce Lectura")
        .y_axis_label("Simce Matemática")
        .height(320.0)
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{:.0}, {:.0}", value.x, value.y)
            } else {
                format!("{name}\nLect {:.0}  Mate {:.0}", value.x, value.y)
            }
        })
        .show(ui, |plot_ui| {
            for point in &chart.points {
                let marker = Points::new(vec![[point.lectura, point.matematica]])
                    .radius(bubble_radius(point.autoestima))
                    .color(state.color_map.color_for(&point.comuna))
                    .name(&point.nombre);
                plot_ui.points(marker);
            }
        });
}

/// Map an autoestima score in [0, 100] to a marker radius.
fn bubble_radius(autoestima: f64) -> f32 {
    (3.0 + (autoestima.clamp(0.0, 100.0) / 100.0) * 8.0) as f32
}

fn correlation_readout(ui: &mut Ui, state: &AppState, grade: Grade) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let r = stats::pearson(
        dataset,
        &state.visible_indices,
        |s| s.simce(grade, Subject::Lectura),
        |s| s.simce(grade, Subject::Matematica),
    );
    match r {
        Some(r) => ui.label(format!("Correlación Lectura vs Matemática: r = {r:.2}")),
        None => ui.label("Correlación Lectura vs Matemática: no disponible"),
    };
}

// ---------------------------------------------------------------------------
// Standards-distribution stacked bar (single institution)
// ---------------------------------------------------------------------------

/// Render the standards-distribution chart for one school and grade.
pub fn standards_panel(ui: &mut Ui, school: &School, grade: Grade) {
    ui.strong(format!("Distribución de estándares, {}", grade.label()));

    let Some(chart) = charts::standards_chart(school, grade) else {
        ui.label(format!(
            "Sin datos de distribución para {}.",
            grade.label()
        ));
        return;
    };

    // One BarChart per band, stacked in the fixed band order.
    let mut layers: Vec<BarChart> = Vec::with_capacity(Level::STACK_ORDER.len());
    for level in Level::STACK_ORDER {
        let bars: Vec<Bar> = chart
            .stacks
            .iter()
            .enumerate()
            .map(|(i, stack)| Bar::new(i as f64, stack.value(level)).width(0.6))
            .collect();
        let mut layer = BarChart::new(bars)
            .name(level.label())
            .color(level_color(level));
        let below: Vec<&BarChart> = layers.iter().collect();
        if !below.is_empty() {
            layer = layer.stack_on(&below);
        }
        layers.push(layer);
    }

    let labels: Vec<String> = chart
        .stacks
        .iter()
        .map(|s| s.subject.label().to_string())
        .collect();

    Plot::new(("standards", grade.label()))
        .legend(Legend::default())
        .height(220.0)
        .include_y(0.0)
        .include_y(100.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round() as usize;
            if (mark.value - idx as f64).abs() < 1e-6 {
                labels.get(idx).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .y_axis_label("% de estudiantes")
        .show(ui, |plot_ui| {
            for layer in layers {
                plot_ui.bar_chart(layer);
            }
        });
}
