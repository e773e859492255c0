use eframe::egui::{self, Ui};

use crate::data::model::Grade;
use crate::report::{self, Table};
use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// On-screen institution report ("ficha")
// ---------------------------------------------------------------------------

/// Render the report for the picked institution. The caller only enters this
/// mode when `state.selected_index()` resolves.
pub fn report_panel(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let Some(idx) = state.selected_index() else {
        return;
    };

    let school = &dataset.schools[idx];
    let doc = report::build(school);

    // -- Section I: identification --
    ui.heading(&doc.nombre);
    ui.label(format!("Comuna: {}    RBD: {}", doc.comuna, doc.rbd));
    ui.separator();

    // -- Section II: academic scores --
    ui.strong("Puntajes Simce 2024");
    section_grid(ui, "academico", &doc.academico);
    ui.add_space(8.0);

    // -- Section III: socio-emotional indicators --
    ui.strong("Indicadores de Desarrollo Personal y Social");
    section_grid(ui, "idps", &doc.idps);
    ui.add_space(8.0);

    // -- Standards distribution per grade --
    ui.columns(2, |cols| {
        plot::standards_panel(&mut cols[0], school, Grade::Basica4);
        plot::standards_panel(&mut cols[1], school, Grade::Media2);
    });
}

fn section_grid(ui: &mut Ui, id: &str, table: &Table) {
    egui::Grid::new(id)
        .striped(true)
        .min_col_width(90.0)
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for column in &table.columns {
                ui.strong(*column);
            }
            ui.end_row();

            for row in &table.rows {
                ui.strong(row.label);
                for cell in &row.cells {
                    ui.label(cell.to_string());
                }
                ui.end_row();
            }
        });
}
