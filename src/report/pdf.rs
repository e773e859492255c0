use std::io::BufWriter;

use anyhow::{Context, Result};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};

use super::{Report, Table};

// ---------------------------------------------------------------------------
// PDF rendering of the institution report
// ---------------------------------------------------------------------------
// A4 portrait, fixed-width table cells. Content fits one page at this data
// volume; the cursor still knows how to break to a new page and repeat the
// document header.

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 20.0;
const BOTTOM: f32 = 20.0;

const LABEL_COL_W: f32 = 42.0;
const DATA_COL_W: f32 = 32.0;
const ROW_H: f32 = 8.0;

/// Render the report to PDF bytes.
pub fn render(report: &Report) -> Result<Vec<u8>> {
    let mut writer = PdfWriter::new(&format!("Ficha RBD {}", report.rbd))?;

    // -- Section I: identification --
    writer.heading("I. Identificación");
    writer.field("Establecimiento", &report.nombre);
    writer.field("Comuna", &report.comuna);
    writer.field("RBD", &report.rbd.to_string());
    writer.gap(4.0);

    // -- Section II: academic scores --
    writer.heading("II. Puntajes Simce 2024");
    writer.table(&report.academico);
    writer.gap(4.0);

    // -- Section III: socio-emotional indicators --
    writer.heading("III. Indicadores de Desarrollo Personal y Social");
    writer.table(&report.idps);

    writer.finish()
}

struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    bold: IndirectFontRef,
    title: String,
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "contenido");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .context("loading Helvetica")?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .context("loading Helvetica-Bold")?;
        let layer = doc.get_page(page).get_layer(layer);

        let mut writer = PdfWriter {
            doc,
            layer,
            font,
            bold,
            title: title.to_string(),
            y: PAGE_H - MARGIN,
        };
        writer.document_header();
        Ok(writer)
    }

    /// Draw the repeated document header at the top of the current page.
    fn document_header(&mut self) {
        self.layer.use_text(
            "Monitor Educativo Coquimbo 2024",
            16.0,
            Mm(MARGIN),
            Mm(self.y),
            &self.bold,
        );
        self.y -= 6.0;
        self.layer
            .use_text(&self.title, 10.0, Mm(MARGIN), Mm(self.y), &self.font);
        self.y -= 4.0;
        self.rule();
        self.y -= 8.0;
    }

    /// Break to a new page (repeating the header) if fewer than `needed`
    /// millimetres remain.
    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed >= BOTTOM {
            return;
        }
        let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "contenido");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_H - MARGIN;
        self.document_header();
    }

    fn rule(&mut self) {
        let line = Line {
            points: vec![
                (Point::new(Mm(MARGIN), Mm(self.y)), false),
                (Point::new(Mm(PAGE_W - MARGIN), Mm(self.y)), false),
            ],
            is_closed: false,
        };
        self.layer.set_outline_thickness(0.4);
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(0.5, 0.5, 0.5, None)));
        self.layer.add_line(line);
    }

    fn heading(&mut self, text: &str) {
        self.ensure_space(ROW_H * 2.0);
        self.layer
            .use_text(text, 12.0, Mm(MARGIN), Mm(self.y), &self.bold);
        self.y -= ROW_H;
    }

    fn field(&mut self, label: &str, value: &str) {
        self.ensure_space(ROW_H);
        self.layer.use_text(
            format!("{label}:"),
            10.0,
            Mm(MARGIN),
            Mm(self.y),
            &self.bold,
        );
        self.layer
            .use_text(value, 10.0, Mm(MARGIN + LABEL_COL_W), Mm(self.y), &self.font);
        self.y -= ROW_H - 2.0;
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    /// Fixed-width table: label column plus one data column per section
    /// column. Missing cells carry their "N/A" marker through `Display`.
    fn table(&mut self, table: &Table) {
        self.ensure_space(ROW_H * (table.rows.len() as f32 + 1.0));

        for (i, column) in table.columns.iter().enumerate() {
            let x = MARGIN + LABEL_COL_W + i as f32 * DATA_COL_W;
            self.layer
                .use_text(*column, 10.0, Mm(x), Mm(self.y), &self.bold);
        }
        self.y -= 2.0;
        self.rule();
        self.y -= ROW_H - 2.0;

        for row in &table.rows {
            self.ensure_space(ROW_H);
            self.layer
                .use_text(row.label, 10.0, Mm(MARGIN), Mm(self.y), &self.bold);
            for (i, cell) in row.cells.iter().enumerate() {
                let x = MARGIN + LABEL_COL_W + i as f32 * DATA_COL_W;
                self.layer
                    .use_text(cell.to_string(), 10.0, Mm(x), Mm(self.y), &self.font);
            }
            self.y -= ROW_H - 2.0;
        }
    }

    fn finish(self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.doc
            .save(&mut BufWriter::new(&mut bytes))
            .context("writing PDF")?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::test_fixtures::school;
    use crate::report;

    #[test]
    fn renders_nonempty_pdf() {
        let doc = report::build(&school("Escuela A", 123, "Ovalle"));
        let bytes = render(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn tolerates_fully_missing_indicators() {
        let mut s = school("Escuela B", 124, "Illapel");
        s.autoestima_4b = None;
        s.clima_4b = None;
        s.participacion_4b = None;
        s.habitos_4b = None;
        let bytes = render(&report::build(&s)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
