use std::path::Path;

use eframe::egui;

use crate::state::{AppState, DATA_FILE};
use crate::ui::{panels, plot, report_view, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MonitorApp {
    pub state: AppState,
}

impl MonitorApp {
    /// Build the app and attempt the startup load of the default dataset.
    pub fn new() -> Self {
        let mut state = AppState::default();
        state.load_from(Path::new(DATA_FILE));
        Self { state }
    }
}

impl eframe::App for MonitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar, counts, export actions ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard or institution report, table below ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                // A failed load is fatal for the session: show the error
                // instead of rendering panels over partial data.
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    match &self.state.status_message {
                        Some(msg) => ui.heading(msg),
                        None => ui.heading("Abra una tabla de establecimientos (Archivo → Abrir CSV…)"),
                    }
                });
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui: &mut egui::Ui| {
                if self.state.selected_index().is_some() {
                    report_view::report_panel(ui, &self.state);
                } else {
                    ui.heading("Seguimiento de Establecimientos Críticos (2019-2024)");
                    ui.label("Análisis de resultados Simce e Indicadores de Desarrollo Personal y Social (IDPS)");
                    ui.add_space(4.0);
                    ui.columns(2, |cols| {
                        plot::bubble_panel(&mut cols[0], &self.state, crate::data::model::Grade::Basica4);
                        plot::bubble_panel(&mut cols[1], &self.state, crate::data::model::Grade::Media2);
                    });
                }

                ui.separator();
                table::data_table(ui, &self.state);
            });
        });
    }
}
