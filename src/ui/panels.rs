use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::CategoryFilter;
use crate::export;
use crate::report;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filtros de Búsqueda");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("Sin datos cargados.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Comuna multi-select ----
            let n_selected = state.criteria.comunas.len();
            let n_total = dataset.comunas.len();
            let header_text = format!("Comuna  ({n_selected}/{n_total})");

            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("comunas")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("Todas").clicked() {
                            state.select_all_comunas();
                        }
                        if ui.small_button("Ninguna").clicked() {
                            state.select_no_comunas();
                        }
                    });

                    for comuna in &dataset.comunas {
                        let mut checked = state.criteria.comunas.contains(comuna);
                        let text = RichText::new(comuna)
                            .color(state.color_map.color_for(comuna));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_comuna(comuna);
                        }
                    }
                });
            ui.separator();

            // ---- Category filter (básica OR media) ----
            ui.strong("Categoría 2019 (básica o media)");
            egui::ComboBox::from_id_salt("categoria")
                .selected_text(state.criteria.categoria.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for cat in CategoryFilter::ALL {
                        if ui
                            .selectable_label(state.criteria.categoria == cat, cat.label())
                            .clicked()
                        {
                            state.set_categoria(cat);
                        }
                    }
                });
            ui.separator();

            // ---- Institution picker, scoped to the selected comunas ----
            ui.strong("Establecimiento");
            let options = state.picker_options();
            let current = state
                .selected_school
                .clone()
                .unwrap_or_else(|| "Todos".to_string());
            egui::ComboBox::from_id_salt("establecimiento")
                .selected_text(current)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(state.selected_school.is_none(), "Todos")
                        .clicked()
                    {
                        state.selected_school = None;
                    }
                    for nombre in &options {
                        let is_selected = state.selected_school.as_deref() == Some(nombre);
                        if ui.selectable_label(is_selected, nombre).clicked() {
                            state.selected_school = Some(nombre.clone());
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Archivo", |ui: &mut Ui| {
            if ui.button("Abrir CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} establecimientos, {} visibles",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        ui.separator();

        if ui.button("Descargar CSV filtrado").clicked() {
            download_filtered_csv(state);
        }

        let can_report = state.selected_index().is_some();
        if ui
            .add_enabled(can_report, egui::Button::new("Generar ficha PDF"))
            .clicked()
        {
            download_report_pdf(state);
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir tabla de establecimientos")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_from(&path);
    }
}

fn download_filtered_csv(state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        return;
    };
    match export::filtered_csv(&dataset, &state.visible_indices) {
        Ok(bytes) => save_bytes(state, export::CSV_FILENAME, &bytes),
        Err(e) => {
            log::error!("CSV export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn download_report_pdf(state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        return;
    };
    let Some(idx) = state.selected_index() else {
        return;
    };
    let school = &dataset.schools[idx];
    let doc = report::build(school);
    match report::pdf::render(&doc) {
        Ok(bytes) => save_bytes(state, &export::report_filename(school.rbd), &bytes),
        Err(e) => {
            log::error!("PDF export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn save_bytes(state: &mut AppState, suggested_name: &str, bytes: &[u8]) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Guardar")
        .set_file_name(suggested_name)
        .save_file()
    else {
        return;
    };

    match std::fs::write(&path, bytes) {
        Ok(()) => {
            log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to write {}: {e}", path.display());
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}
