use crate::data::model::{Dataset, Grade, Indicator, Level, School, Subject};

// ---------------------------------------------------------------------------
// Chart builders – pure functions from the filtered view to chart data
// ---------------------------------------------------------------------------
// Builders return `None` for "no data"; the UI layer renders an informational
// placeholder in that case and never receives an empty chart.

/// One bubble of the performance-vs-autoestima scatter.
#[derive(Debug, Clone, PartialEq)]
pub struct BubblePoint {
    /// Simce Lectura (x axis).
    pub lectura: f64,
    /// Simce Matemática (y axis).
    pub matematica: f64,
    /// Autoestima indicator, mapped to bubble size.
    pub autoestima: f64,
    /// Colour channel.
    pub comuna: String,
    /// Hover label.
    pub nombre: String,
}

/// Declarative description of one grade's scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleChart {
    pub grade: Grade,
    pub points: Vec<BubblePoint>,
}

/// Build the bubble chart for a grade from the filtered view.
///
/// Rows missing any of the (lectura, matemática, autoestima) triple are
/// excluded before rendering, never plotted as zero.
pub fn bubble_chart(dataset: &Dataset, indices: &[usize], grade: Grade) -> Option<BubbleChart> {
    let points: Vec<BubblePoint> = indices
        .iter()
        .filter_map(|&i| {
            let s = &dataset.schools[i];
            Some(BubblePoint {
                lectura: s.simce(grade, Subject::Lectura)?,
                matematica: s.simce(grade, Subject::Matematica)?,
                autoestima: s.idps(grade, Indicator::Autoestima)?,
                comuna: s.comuna.clone(),
                nombre: s.nombre.clone(),
            })
        })
        .collect();

    if points.is_empty() {
        return None;
    }
    Some(BubbleChart { grade, points })
}

// ---------------------------------------------------------------------------
// Standards-distribution stacked bar
// ---------------------------------------------------------------------------

/// One subject's complete three-level stack.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectStack {
    pub subject: Subject,
    pub adecuado: f64,
    pub elemental: f64,
    pub insuficiente: f64,
}

impl SubjectStack {
    /// Percentage for a band; band order is fixed by [`Level::STACK_ORDER`].
    pub fn value(&self, level: Level) -> f64 {
        match level {
            Level::Adecuado => self.adecuado,
            Level::Elemental => self.elemental,
            Level::Insuficiente => self.insuficiente,
        }
    }
}

/// Declarative description of one record's standards-distribution chart for a grade.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardsChart {
    pub grade: Grade,
    pub stacks: Vec<SubjectStack>,
}

/// Build the stacked-bar data for one school and grade.
///
/// A subject is included only when all three of its level percentages are
/// present; `None` when neither subject is complete.
pub fn standards_chart(school: &School, grade: Grade) -> Option<StandardsChart> {
    let stacks: Vec<SubjectStack> = Subject::ALL
        .iter()
        .filter_map(|&subject| {
            Some(SubjectStack {
                subject,
                adecuado: school.pct(grade, subject, Level::Adecuado)?,
                elemental: school.pct(grade, subject, Level::Elemental)?,
                insuficiente: school.pct(grade, subject, Level::Insuficiente)?,
            })
        })
        .collect();

    if stacks.is_empty() {
        return None;
    }
    Some(StandardsChart { grade, stacks })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::test_fixtures::{dataset, school};

    #[test]
    fn incomplete_rows_are_excluded_not_zeroed() {
        let a = school("A", 1, "Ovalle");
        let mut b = school("B", 2, "Coquimbo");
        b.autoestima_4b = None;

        let ds = dataset(vec![a, b]);
        let chart = bubble_chart(&ds, &[0, 1], Grade::Basica4).unwrap();
        assert_eq!(chart.points.len(), 1);
        assert_eq!(chart.points[0].nombre, "A");
    }

    #[test]
    fn empty_view_signals_no_data() {
        let ds = dataset(vec![school("A", 1, "Ovalle")]);
        assert_eq!(bubble_chart(&ds, &[], Grade::Basica4), None);
    }

    #[test]
    fn all_rows_incomplete_signals_no_data() {
        let mut a = school("A", 1, "Ovalle");
        a.simce_lect_2m = None;
        let ds = dataset(vec![a]);
        assert_eq!(bubble_chart(&ds, &[0], Grade::Media2), None);
    }

    #[test]
    fn grades_use_their_own_columns() {
        let mut a = school("A", 1, "Ovalle");
        a.simce_lect_4b = None;
        let ds = dataset(vec![a]);
        assert_eq!(bubble_chart(&ds, &[0], Grade::Basica4), None);
        assert!(bubble_chart(&ds, &[0], Grade::Media2).is_some());
    }

    #[test]
    fn standards_chart_has_fixed_band_order() {
        assert_eq!(
            Level::STACK_ORDER,
            [Level::Adecuado, Level::Elemental, Level::Insuficiente]
        );

        let s = school("A", 1, "Ovalle");
        let chart = standards_chart(&s, Grade::Basica4).unwrap();
        assert_eq!(chart.stacks.len(), 2);
        let lect = &chart.stacks[0];
        assert_eq!(lect.subject, Subject::Lectura);
        assert_eq!(lect.value(Level::Adecuado), 15.0);
        assert_eq!(lect.value(Level::Insuficiente), 55.0);
    }

    #[test]
    fn subject_with_missing_band_is_dropped() {
        let mut s = school("A", 1, "Ovalle");
        s.pct_elem_lect_4b = None;
        let chart = standards_chart(&s, Grade::Basica4).unwrap();
        assert_eq!(chart.stacks.len(), 1);
        assert_eq!(chart.stacks[0].subject, Subject::Matematica);
    }

    #[test]
    fn record_with_no_complete_subject_signals_no_data() {
        let mut s = school("A", 1, "Ovalle");
        s.pct_adec_lect_2m = None;
        s.pct_insuf_mate_2m = None;
        assert_eq!(standards_chart(&s, Grade::Media2), None);
    }
}
