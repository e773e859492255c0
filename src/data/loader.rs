use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use thiserror::Error;

use super::model::{Dataset, School};

// ---------------------------------------------------------------------------
// LoadError
// ---------------------------------------------------------------------------

/// Fatal load failures. Any of these halts the session; the UI shows the
/// message instead of rendering panels over partial data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no se pudo leer '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}': encabezado ilegible: {source}", .path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("'{}': faltan columnas requeridas: {}", .path.display(), .columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    #[error("'{}', fila {row}: {source}", .path.display())]
    Row {
        path: PathBuf,
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("'{}': RBD duplicado {rbd}", .path.display())]
    DuplicateRbd { path: PathBuf, rbd: i64 },
}

// ---------------------------------------------------------------------------
// Memoized entry-point
// ---------------------------------------------------------------------------

struct CacheEntry {
    path: PathBuf,
    modified: SystemTime,
    dataset: Arc<Dataset>,
}

static CACHE: Mutex<Option<CacheEntry>> = Mutex::new(None);

/// Load a dataset, memoized process-wide keyed by (path, mtime).
///
/// Repeated calls for an unchanged file return the same `Arc` without
/// touching the parser; a changed modification time invalidates the entry.
pub fn load_cached(path: &Path) -> Result<Arc<Dataset>, LoadError> {
    let modified = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let mut cache = CACHE.lock().unwrap();
    if let Some(entry) = cache.as_ref() {
        if entry.path == path && entry.modified == modified {
            return Ok(Arc::clone(&entry.dataset));
        }
    }

    let dataset = Arc::new(load_csv(path)?);
    *cache = Some(CacheEntry {
        path: path.to_path_buf(),
        modified,
        dataset: Arc::clone(&dataset),
    });
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse the CSV at `path` into a [`Dataset`], uncached.
///
/// The header is checked against [`School::COLUMNS`] before any row is
/// parsed; extra columns are tolerated (and ignored), absent ones are not.
/// Empty cells deserialize to `None` — a missing score stays missing.
pub fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| LoadError::Header {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let missing: Vec<String> = School::COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing,
        });
    }

    let mut schools: Vec<School> = Vec::new();
    for (row_no, result) in reader.deserialize::<School>().enumerate() {
        let school = result.map_err(|source| LoadError::Row {
            path: path.to_path_buf(),
            row: row_no + 1,
            source,
        })?;

        if let Some(prev) = schools.iter().find(|s| s.rbd == school.rbd) {
            return Err(LoadError::DuplicateRbd {
                path: path.to_path_buf(),
                rbd: prev.rbd,
            });
        }
        schools.push(school);
    }

    Ok(Dataset::from_schools(schools))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::{Grade, Subject};

    const HEADER: &str = "Nombre Establecimiento,RBD,Comuna,Cat_2019_Basica,Cat_2019_Media,\
Simce_Lect_4B,Simce_Mate_4B,Simce_Lect_2M,Simce_Mate_2M,\
Autoestima_4B,Clima_4B,Participacion_4B,Habitos_4B,\
Autoestima_2M,Clima_2M,Participacion_2M,Habitos_2M,\
Pct_Insuf_Lect_4B,Pct_Elem_Lect_4B,Pct_Adec_Lect_4B,\
Pct_Insuf_Mate_4B,Pct_Elem_Mate_4B,Pct_Adec_Mate_4B,\
Pct_Insuf_Lect_2M,Pct_Elem_Lect_2M,Pct_Adec_Lect_2M,\
Pct_Insuf_Mate_2M,Pct_Elem_Mate_2M,Pct_Adec_Mate_2M";

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        writeln!(f, "{HEADER}").unwrap();
        for row in rows {
            writeln!(f, "{row}").unwrap();
        }
        f.flush().unwrap();
        f
    }

    fn full_row(nombre: &str, rbd: i64, comuna: &str) -> String {
        format!(
            "{nombre},{rbd},{comuna},INSUFICIENTE,MEDIO-BAJO,\
240,231,225,218,72,70.5,68,66,69,67.5,71,63,\
55,30,15,60,28,12,58,27,15,62,26,12"
        )
    }

    #[test]
    fn loads_rows_in_file_order() {
        let f = write_csv(&[
            &full_row("Escuela A", 11, "Ovalle"),
            &full_row("Liceo B", 12, "Coquimbo"),
        ]);
        let ds = load_csv(f.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.schools[0].nombre, "Escuela A");
        assert_eq!(ds.schools[1].rbd, 12);
        assert_eq!(
            ds.schools[0].simce(Grade::Basica4, Subject::Lectura),
            Some(240.0)
        );
        assert_eq!(ds.comunas, vec!["Coquimbo".to_string(), "Ovalle".to_string()]);
    }

    #[test]
    fn empty_cells_stay_missing() {
        // Lectura 4B score and both categories blank.
        let row = "Escuela A,11,Ovalle,,,\
,231,225,218,72,70.5,68,66,69,67.5,71,63,\
55,30,15,60,28,12,58,27,15,62,26,12";
        let f = write_csv(&[row]);
        let ds = load_csv(f.path()).unwrap();
        let s = &ds.schools[0];
        assert_eq!(s.simce_lect_4b, None);
        assert_eq!(s.simce_mate_4b, Some(231.0));
        assert_eq!(s.cat_2019_basica, None);
        assert_eq!(s.cat_2019_media, None);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_csv(Path::new("no-existe-en-ninguna-parte.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn missing_column_is_rejected_before_rows() {
        let mut f = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        // Drop the RBD column entirely.
        let header = HEADER.replace("RBD,", "");
        writeln!(f, "{header}").unwrap();
        f.flush().unwrap();

        let err = load_csv(f.path()).unwrap_err();
        match err {
            LoadError::MissingColumns { columns, .. } => {
                assert_eq!(columns, vec!["RBD".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn bad_number_reports_row() {
        let bad = full_row("Escuela A", 11, "Ovalle").replace("240", "doscientos");
        let f = write_csv(&[&full_row("Escuela X", 10, "Illapel"), &bad]);
        let err = load_csv(f.path()).unwrap_err();
        match err {
            LoadError::Row { row, .. } => assert_eq!(row, 2),
            other => panic!("expected Row, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_rbd_is_rejected() {
        let f = write_csv(&[
            &full_row("Escuela A", 11, "Ovalle"),
            &full_row("Escuela B", 11, "Coquimbo"),
        ]);
        let err = load_csv(f.path()).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateRbd { rbd: 11, .. }));
    }

    #[test]
    fn cache_returns_same_arc_for_unchanged_file() {
        let f = write_csv(&[&full_row("Escuela A", 11, "Ovalle")]);
        let first = load_cached(f.path()).unwrap();
        let second = load_cached(f.path()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
