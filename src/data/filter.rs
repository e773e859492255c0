use std::collections::BTreeSet;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// The categorical constraint over the 2019 performance categories.
/// Anything but `Todos` keeps rows where the básica OR the media category
/// equals the target (the two fields are independent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    Todos,
    Insuficiente,
    MedioBajo,
}

impl CategoryFilter {
    pub const ALL: [CategoryFilter; 3] = [
        CategoryFilter::Todos,
        CategoryFilter::Insuficiente,
        CategoryFilter::MedioBajo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::Todos => "Todos",
            CategoryFilter::Insuficiente => "INSUFICIENTE",
            CategoryFilter::MedioBajo => "MEDIO-BAJO",
        }
    }

    /// The category string rows are matched against; `None` means no
    /// constraint.
    fn target(self) -> Option<&'static str> {
        match self {
            CategoryFilter::Todos => None,
            CategoryFilter::Insuficiente => Some("INSUFICIENTE"),
            CategoryFilter::MedioBajo => Some("MEDIO-BAJO"),
        }
    }
}

/// User-selected predicates: a comuna subset plus the categorical constraint.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Selected comunas. An empty set means "nothing selected" and yields an
    /// empty view, not "no filter".
    pub comunas: BTreeSet<String>,
    pub categoria: CategoryFilter,
}

impl FilterCriteria {
    /// Criteria selecting every comuna with no categorical constraint.
    pub fn all_of(dataset: &Dataset) -> Self {
        FilterCriteria {
            comunas: dataset.comunas.iter().cloned().collect(),
            categoria: CategoryFilter::Todos,
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of schools that pass the criteria, input order preserved.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    let target = criteria.categoria.target();
    dataset
        .schools
        .iter()
        .enumerate()
        .filter(|(_, s)| criteria.comunas.contains(&s.comuna))
        .filter(|(_, s)| match target {
            None => true,
            Some(t) => s.in_category(t),
        })
        .map(|(i, _)| i)
        .collect()
}

/// Exact-match lookup by institution name.
pub fn index_by_name(dataset: &Dataset, name: &str) -> Option<usize> {
    dataset.schools.iter().position(|s| s.nombre == name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::test_fixtures::{dataset, school};

    fn sample() -> crate::data::model::Dataset {
        let mut a = school("Escuela A", 1, "Ovalle");
        a.cat_2019_basica = Some("INSUFICIENTE".to_string());
        a.cat_2019_media = Some("MEDIO".to_string());

        let mut b = school("Liceo B", 2, "Coquimbo");
        b.cat_2019_basica = Some("MEDIO".to_string());
        b.cat_2019_media = Some("INSUFICIENTE".to_string());

        let mut c = school("Colegio C", 3, "Ovalle");
        c.cat_2019_basica = Some("MEDIO-BAJO".to_string());
        c.cat_2019_media = None;

        dataset(vec![a, b, c])
    }

    #[test]
    fn full_comuna_set_keeps_everything() {
        let ds = sample();
        let criteria = FilterCriteria::all_of(&ds);
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 1, 2]);
    }

    #[test]
    fn empty_selection_yields_empty_view() {
        let ds = sample();
        let criteria = FilterCriteria {
            comunas: BTreeSet::new(),
            categoria: CategoryFilter::Todos,
        };
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn comuna_subset_keeps_only_members() {
        let ds = sample();
        let criteria = FilterCriteria {
            comunas: [String::from("Ovalle")].into(),
            categoria: CategoryFilter::Todos,
        };
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 2]);
    }

    #[test]
    fn category_matches_either_grade() {
        let ds = sample();
        let criteria = FilterCriteria {
            comunas: ds.comunas.iter().cloned().collect(),
            categoria: CategoryFilter::Insuficiente,
        };
        // A matches on básica, B matches on media only; both must surface.
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 1]);
    }

    #[test]
    fn category_with_no_matches_is_empty_not_error() {
        let ds = sample();
        let criteria = FilterCriteria {
            comunas: [String::from("Coquimbo")].into(),
            categoria: CategoryFilter::MedioBajo,
        };
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn lookup_by_name_is_exact() {
        let ds = sample();
        assert_eq!(index_by_name(&ds, "Liceo B"), Some(1));
        assert_eq!(index_by_name(&ds, "Liceo"), None);
    }
}
