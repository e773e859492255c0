use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Filtered data table (below the charts / report)
// ---------------------------------------------------------------------------

const HEADERS: [&str; 9] = [
    "Establecimiento",
    "RBD",
    "Comuna",
    "Cat. Básica 2019",
    "Cat. Media 2019",
    "Lect 4B",
    "Mate 4B",
    "Lect 2M",
    "Mate 2M",
];

/// Render the detail table for the filtered view.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    ui.heading("Detalle General de Establecimientos");

    if state.visible_indices.is_empty() {
        ui.label("No hay datos para esta selección.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        // The outer panel already scrolls.
        .vscroll(false)
        .column(Column::remainder().at_least(200.0))
        .columns(Column::auto().at_least(60.0), HEADERS.len() - 1)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for &idx in &state.visible_indices {
                let s = &dataset.schools[idx];
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&s.nombre);
                    });
                    row.col(|ui| {
                        ui.label(s.rbd.to_string());
                    });
                    row.col(|ui| {
                        ui.label(&s.comuna);
                    });
                    row.col(|ui| {
                        ui.label(text(&s.cat_2019_basica));
                    });
                    row.col(|ui| {
                        ui.label(text(&s.cat_2019_media));
                    });
                    for score in [
                        s.simce_lect_4b,
                        s.simce_mate_4b,
                        s.simce_lect_2m,
                        s.simce_mate_2m,
                    ] {
                        row.col(|ui| {
                            ui.label(number(score));
                        });
                    }
                });
            }
        });
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "N/A".to_string())
}

fn number(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => "N/A".to_string(),
    }
}
