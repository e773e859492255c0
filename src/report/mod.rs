pub mod pdf;

use std::fmt;

use crate::data::model::{Grade, Indicator, School, Subject};

// ---------------------------------------------------------------------------
// Report document – built first, rendered second (screen or PDF)
// ---------------------------------------------------------------------------

/// A single table cell. Missing values render as an explicit marker instead
/// of being coerced to 0 or an empty string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Score(f64),
    NotAvailable,
}

impl Cell {
    pub const NOT_AVAILABLE: &'static str = "N/A";

    fn from_value(value: Option<f64>) -> Self {
        match value {
            Some(v) => Cell::Score(v),
            None => Cell::NotAvailable,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Score(v) => write!(f, "{v:.1}"),
            Cell::NotAvailable => write!(f, "{}", Cell::NOT_AVAILABLE),
        }
    }
}

/// One labelled row of a report table.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub label: &'static str,
    pub cells: Vec<Cell>,
}

/// A column-labelled table of one report section.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Row>,
}

/// The per-institution report ("ficha"), fixed section order:
/// (I) identification, (II) academic scores, (III) IDPS indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub nombre: String,
    pub comuna: String,
    pub rbd: i64,
    pub academico: Table,
    pub idps: Table,
}

/// Build the report document for one school.
pub fn build(school: &School) -> Report {
    let academico = Table {
        columns: Subject::ALL.iter().map(|s| s.label()).collect(),
        rows: Grade::ALL
            .iter()
            .map(|&grade| Row {
                label: grade.label(),
                cells: Subject::ALL
                    .iter()
                    .map(|&subject| Cell::from_value(school.simce(grade, subject)))
                    .collect(),
            })
            .collect(),
    };

    let idps = Table {
        columns: Indicator::ALL.iter().map(|i| i.label()).collect(),
        rows: Grade::ALL
            .iter()
            .map(|&grade| Row {
                label: grade.label(),
                cells: Indicator::ALL
                    .iter()
                    .map(|&indicator| Cell::from_value(school.idps(grade, indicator)))
                    .collect(),
            })
            .collect(),
    };

    Report {
        nombre: school.nombre.clone(),
        comuna: school.comuna.clone(),
        rbd: school.rbd,
        academico,
        idps,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::test_fixtures::school;

    fn count_na(table: &Table) -> usize {
        table
            .rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| **c == Cell::NotAvailable)
            .count()
    }

    #[test]
    fn sections_have_fixed_shape() {
        let report = build(&school("Escuela A", 123, "Ovalle"));
        assert_eq!(report.nombre, "Escuela A");
        assert_eq!(report.rbd, 123);

        assert_eq!(report.academico.columns, vec!["Lectura", "Matemática"]);
        assert_eq!(report.academico.rows.len(), 2);
        assert_eq!(report.academico.rows[0].label, "4° Básico");
        assert_eq!(report.academico.rows[1].label, "II Medio");

        assert_eq!(
            report.idps.columns,
            vec!["Autoestima", "Clima", "Participación", "Hábitos"]
        );
        assert_eq!(report.idps.rows[0].cells.len(), 4);
    }

    #[test]
    fn complete_record_has_no_na_markers() {
        let report = build(&school("Escuela A", 1, "Ovalle"));
        assert_eq!(count_na(&report.idps), 0);
        assert_eq!(count_na(&report.academico), 0);
    }

    #[test]
    fn one_missing_indicator_yields_exactly_one_marker() {
        let mut s = school("Escuela A", 1, "Ovalle");
        s.clima_2m = None;
        let report = build(&s);
        assert_eq!(count_na(&report.idps), 1);
        // And in the right cell: II Medio row, Clima column.
        assert_eq!(report.idps.rows[1].cells[1], Cell::NotAvailable);
    }

    #[test]
    fn cells_format_scores_and_markers() {
        assert_eq!(Cell::Score(247.0).to_string(), "247.0");
        assert_eq!(Cell::Score(70.56).to_string(), "70.6");
        assert_eq!(Cell::NotAvailable.to_string(), "N/A");
    }
}
