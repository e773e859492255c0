use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// School – one row of the source table
// ---------------------------------------------------------------------------

/// A single school (one row of the source CSV).
///
/// Field order is the ingest/export column contract: the exporter writes
/// columns in exactly this order, and the loader checks every header below is
/// present before parsing rows. Scores and indicators are `Option` because
/// missing cells mean "no value", never 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    #[serde(rename = "Nombre Establecimiento")]
    pub nombre: String,
    /// National school identifier, unique within the dataset.
    #[serde(rename = "RBD")]
    pub rbd: i64,
    #[serde(rename = "Comuna")]
    pub comuna: String,

    #[serde(rename = "Cat_2019_Basica")]
    pub cat_2019_basica: Option<String>,
    #[serde(rename = "Cat_2019_Media")]
    pub cat_2019_media: Option<String>,

    // -- Simce scores per grade/subject --
    #[serde(rename = "Simce_Lect_4B")]
    pub simce_lect_4b: Option<f64>,
    #[serde(rename = "Simce_Mate_4B")]
    pub simce_mate_4b: Option<f64>,
    #[serde(rename = "Simce_Lect_2M")]
    pub simce_lect_2m: Option<f64>,
    #[serde(rename = "Simce_Mate_2M")]
    pub simce_mate_2m: Option<f64>,

    // -- IDPS indicators per grade --
    #[serde(rename = "Autoestima_4B")]
    pub autoestima_4b: Option<f64>,
    #[serde(rename = "Clima_4B")]
    pub clima_4b: Option<f64>,
    #[serde(rename = "Participacion_4B")]
    pub participacion_4b: Option<f64>,
    #[serde(rename = "Habitos_4B")]
    pub habitos_4b: Option<f64>,
    #[serde(rename = "Autoestima_2M")]
    pub autoestima_2m: Option<f64>,
    #[serde(rename = "Clima_2M")]
    pub clima_2m: Option<f64>,
    #[serde(rename = "Participacion_2M")]
    pub participacion_2m: Option<f64>,
    #[serde(rename = "Habitos_2M")]
    pub habitos_2m: Option<f64>,

    // -- Standards distribution (% of students per level), per grade/subject --
    #[serde(rename = "Pct_Insuf_Lect_4B")]
    pub pct_insuf_lect_4b: Option<f64>,
    #[serde(rename = "Pct_Elem_Lect_4B")]
    pub pct_elem_lect_4b: Option<f64>,
    #[serde(rename = "Pct_Adec_Lect_4B")]
    pub pct_adec_lect_4b: Option<f64>,
    #[serde(rename = "Pct_Insuf_Mate_4B")]
    pub pct_insuf_mate_4b: Option<f64>,
    #[serde(rename = "Pct_Elem_Mate_4B")]
    pub pct_elem_mate_4b: Option<f64>,
    #[serde(rename = "Pct_Adec_Mate_4B")]
    pub pct_adec_mate_4b: Option<f64>,
    #[serde(rename = "Pct_Insuf_Lect_2M")]
    pub pct_insuf_lect_2m: Option<f64>,
    #[serde(rename = "Pct_Elem_Lect_2M")]
    pub pct_elem_lect_2m: Option<f64>,
    #[serde(rename = "Pct_Adec_Lect_2M")]
    pub pct_adec_lect_2m: Option<f64>,
    #[serde(rename = "Pct_Insuf_Mate_2M")]
    pub pct_insuf_mate_2m: Option<f64>,
    #[serde(rename = "Pct_Elem_Mate_2M")]
    pub pct_elem_mate_2m: Option<f64>,
    #[serde(rename = "Pct_Adec_Mate_2M")]
    pub pct_adec_mate_2m: Option<f64>,
}

impl School {
    /// Ingest/export column contract, in order. Must match the serde renames
    /// above field for field.
    pub const COLUMNS: [&'static str; 29] = [
        "Nombre Establecimiento",
        "RBD",
        "Comuna",
        "Cat_2019_Basica",
        "Cat_2019_Media",
        "Simce_Lect_4B",
        "Simce_Mate_4B",
        "Simce_Lect_2M",
        "Simce_Mate_2M",
        "Autoestima_4B",
        "Clima_4B",
        "Participacion_4B",
        "Habitos_4B",
        "Autoestima_2M",
        "Clima_2M",
        "Participacion_2M",
        "Habitos_2M",
        "Pct_Insuf_Lect_4B",
        "Pct_Elem_Lect_4B",
        "Pct_Adec_Lect_4B",
        "Pct_Insuf_Mate_4B",
        "Pct_Elem_Mate_4B",
        "Pct_Adec_Mate_4B",
        "Pct_Insuf_Lect_2M",
        "Pct_Elem_Lect_2M",
        "Pct_Adec_Lect_2M",
        "Pct_Insuf_Mate_2M",
        "Pct_Elem_Mate_2M",
        "Pct_Adec_Mate_2M",
    ];

    /// Simce score for a grade/subject.
    pub fn simce(&self, grade: Grade, subject: Subject) -> Option<f64> {
        match (grade, subject) {
            (Grade::Basica4, Subject::Lectura) => self.simce_lect_4b,
            (Grade::Basica4, Subject::Matematica) => self.simce_mate_4b,
            (Grade::Media2, Subject::Lectura) => self.simce_lect_2m,
            (Grade::Media2, Subject::Matematica) => self.simce_mate_2m,
        }
    }

    /// IDPS indicator for a grade.
    pub fn idps(&self, grade: Grade, indicator: Indicator) -> Option<f64> {
        match (grade, indicator) {
            (Grade::Basica4, Indicator::Autoestima) => self.autoestima_4b,
            (Grade::Basica4, Indicator::Clima) => self.clima_4b,
            (Grade::Basica4, Indicator::Participacion) => self.participacion_4b,
            (Grade::Basica4, Indicator::Habitos) => self.habitos_4b,
            (Grade::Media2, Indicator::Autoestima) => self.autoestima_2m,
            (Grade::Media2, Indicator::Clima) => self.clima_2m,
            (Grade::Media2, Indicator::Participacion) => self.participacion_2m,
            (Grade::Media2, Indicator::Habitos) => self.habitos_2m,
        }
    }

    /// Standards-distribution percentage for a grade/subject/level.
    pub fn pct(&self, grade: Grade, subject: Subject, level: Level) -> Option<f64> {
        use {Grade::*, Level::*, Subject::*};
        match (grade, subject, level) {
            (Basica4, Lectura, Insuficiente) => self.pct_insuf_lect_4b,
            (Basica4, Lectura, Elemental) => self.pct_elem_lect_4b,
            (Basica4, Lectura, Adecuado) => self.pct_adec_lect_4b,
            (Basica4, Matematica, Insuficiente) => self.pct_insuf_mate_4b,
            (Basica4, Matematica, Elemental) => self.pct_elem_mate_4b,
            (Basica4, Matematica, Adecuado) => self.pct_adec_mate_4b,
            (Media2, Lectura, Insuficiente) => self.pct_insuf_lect_2m,
            (Media2, Lectura, Elemental) => self.pct_elem_lect_2m,
            (Media2, Lectura, Adecuado) => self.pct_adec_lect_2m,
            (Media2, Matematica, Insuficiente) => self.pct_insuf_mate_2m,
            (Media2, Matematica, Elemental) => self.pct_elem_mate_2m,
            (Media2, Matematica, Adecuado) => self.pct_adec_mate_2m,
        }
    }

    /// Whether either 2019 category (básica OR media) equals `target`.
    pub fn in_category(&self, target: &str) -> bool {
        self.cat_2019_basica.as_deref() == Some(target)
            || self.cat_2019_media.as_deref() == Some(target)
    }
}

// ---------------------------------------------------------------------------
// Grade / Subject / Indicator / Level enumerations
// ---------------------------------------------------------------------------

/// The two evaluated grade-level cohorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Basica4,
    Media2,
}

impl Grade {
    pub const ALL: [Grade; 2] = [Grade::Basica4, Grade::Media2];

    pub fn label(self) -> &'static str {
        match self {
            Grade::Basica4 => "4° Básico",
            Grade::Media2 => "II Medio",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Lectura,
    Matematica,
}

impl Subject {
    pub const ALL: [Subject; 2] = [Subject::Lectura, Subject::Matematica];

    pub fn label(self) -> &'static str {
        match self {
            Subject::Lectura => "Lectura",
            Subject::Matematica => "Matemática",
        }
    }
}

/// Socio-emotional (IDPS) indicators, in report column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Autoestima,
    Clima,
    Participacion,
    Habitos,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::Autoestima,
        Indicator::Clima,
        Indicator::Participacion,
        Indicator::Habitos,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Indicator::Autoestima => "Autoestima",
            Indicator::Clima => "Clima",
            Indicator::Participacion => "Participación",
            Indicator::Habitos => "Hábitos",
        }
    }
}

/// Performance bands of the standards distribution. `STACK_ORDER` fixes both
/// the stacking order and the legend order of the distribution chart,
/// independent of data order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Adecuado,
    Elemental,
    Insuficiente,
}

impl Level {
    pub const STACK_ORDER: [Level; 3] = [Level::Adecuado, Level::Elemental, Level::Insuficiente];

    pub fn label(self) -> &'static str {
        match self {
            Level::Adecuado => "Adecuado",
            Level::Elemental => "Elemental",
            Level::Insuficiente => "Insuficiente",
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with the pre-computed comuna index.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All schools (rows), in file order.
    pub schools: Vec<School>,
    /// Sorted unique comuna names.
    pub comunas: Vec<String>,
}

impl Dataset {
    /// Build the comuna index from the loaded rows.
    pub fn from_schools(schools: Vec<School>) -> Self {
        let mut comunas: Vec<String> = schools.iter().map(|s| s.comuna.clone()).collect();
        comunas.sort();
        comunas.dedup();
        Dataset { schools, comunas }
    }

    /// Number of schools.
    pub fn len(&self) -> usize {
        self.schools.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.schools.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_match_serde_renames() {
        // Serializing one row must produce exactly the contract header.
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.serialize(test_fixtures::school("A", 1, "Ovalle")).unwrap();
        let bytes = wtr.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let header = text.lines().next().unwrap();
        let parsed: Vec<&str> = header.split(',').collect();
        // "Nombre Establecimiento" contains no comma, so a plain split is fine.
        assert_eq!(parsed, School::COLUMNS.to_vec());
    }

    #[test]
    fn category_match_is_or_across_grades() {
        let mut s = test_fixtures::school("A", 1, "Ovalle");
        s.cat_2019_basica = Some("MEDIO".to_string());
        s.cat_2019_media = Some("INSUFICIENTE".to_string());
        assert!(s.in_category("INSUFICIENTE"));
        assert!(!s.in_category("MEDIO-BAJO"));

        s.cat_2019_media = None;
        assert!(!s.in_category("INSUFICIENTE"));
    }

    #[test]
    fn comuna_index_is_sorted_and_unique() {
        let ds = Dataset::from_schools(vec![
            test_fixtures::school("A", 1, "Ovalle"),
            test_fixtures::school("B", 2, "Coquimbo"),
            test_fixtures::school("C", 3, "Ovalle"),
        ]);
        assert_eq!(ds.comunas, vec!["Coquimbo".to_string(), "Ovalle".to_string()]);
        assert_eq!(ds.len(), 3);
    }
}
