use std::path::Path;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::filter::{self, CategoryFilter, FilterCriteria};
use crate::data::loader;
use crate::data::model::Dataset;

/// Default source file, loaded at startup from the working directory.
pub const DATA_FILE: &str = "tabla_integral_criticos_2024.csv";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<Dataset>>,

    /// Current filter selections.
    pub criteria: FilterCriteria,

    /// Indices of schools passing the current filters (cached per change).
    pub visible_indices: Vec<usize>,

    /// Institution picked for the report view; `None` shows the dashboard.
    pub selected_school: Option<String>,

    /// Comuna → colour, shared by charts and sidebar swatches.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load (or re-use the cached copy of) the CSV at `path`. A load failure
    /// is fatal for the session: the dataset stays unset and the error is
    /// surfaced instead of partial data.
    pub fn load_from(&mut self, path: &Path) {
        match loader::load_cached(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} establecimientos across {} comunas from {}",
                    dataset.len(),
                    dataset.comunas.len(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e}");
                self.dataset = None;
                self.visible_indices.clear();
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a loaded dataset; filters default to all comunas, no category
    /// constraint, no institution picked.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.criteria = FilterCriteria::all_of(&dataset);
        self.visible_indices = (0..dataset.len()).collect();
        self.color_map = ColorMap::new(&dataset.comunas);
        self.selected_school = None;
        self.status_message = None;
        self.dataset = Some(dataset);
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filter::filtered_indices(ds, &self.criteria);
        }
    }

    /// Toggle one comuna in the multi-select.
    pub fn toggle_comuna(&mut self, comuna: &str) {
        if !self.criteria.comunas.remove(comuna) {
            self.criteria.comunas.insert(comuna.to_string());
        }
        self.refilter();
    }

    pub fn select_all_comunas(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria.comunas = ds.comunas.iter().cloned().collect();
            self.refilter();
        }
    }

    pub fn select_no_comunas(&mut self) {
        self.criteria.comunas.clear();
        self.refilter();
    }

    pub fn set_categoria(&mut self, categoria: CategoryFilter) {
        self.criteria.categoria = categoria;
        self.refilter();
    }

    /// Institution picker options: schools in the currently selected comunas
    /// (the comuna filter scopes the picker; the category filter does not).
    pub fn picker_options(&self) -> Vec<String> {
        let Some(ds) = &self.dataset else {
            return Vec::new();
        };
        ds.schools
            .iter()
            .filter(|s| self.criteria.comunas.contains(&s.comuna))
            .map(|s| s.nombre.clone())
            .collect()
    }

    /// Resolve the picked institution, dropping it if it fell out of scope.
    pub fn selected_index(&self) -> Option<usize> {
        let ds = self.dataset.as_ref()?;
        let name = self.selected_school.as_deref()?;
        let idx = filter::index_by_name(ds, name)?;
        if self.criteria.comunas.contains(&ds.schools[idx].comuna) {
            Some(idx)
        } else {
            None
        }
    }
}
