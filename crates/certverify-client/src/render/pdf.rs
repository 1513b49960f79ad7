//! # Verification Report (PDF)
//!
//! Renders a fetched [`VerificationRecord`] as a single A4 page: institution
//! header band, title band, status badge, eight field boxes in two columns,
//! a status box, the contact footer and a generation timestamp.
//!
//! Rendering is purely local. The report is derived from the record alone.
//!
//! Layout coordinates are millimetres measured from the top-left corner and
//! flipped to PDF space when drawn.

use std::path::{Path, PathBuf};

use certverify_core::VerificationRecord;
use chrono::{DateTime, Utc};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;

const HEADER_YELLOW: [u8; 3] = [248, 246, 124];
const BORDER_AMBER: [u8; 3] = [255, 193, 7];
const TITLE_GREEN: [u8; 3] = [16, 185, 129];
const BADGE_GREEN: [u8; 3] = [34, 197, 94];
const FIELD_FILL: [u8; 3] = [254, 252, 191];
const STATUS_FILL: [u8; 3] = [220, 252, 231];
const STATUS_TEXT: [u8; 3] = [21, 128, 61];
const LABEL_BROWN: [u8; 3] = [133, 77, 14];
const BLACK: [u8; 3] = [0, 0, 0];
const WHITE: [u8; 3] = [255, 255, 255];
const GREY: [u8; 3] = [100, 100, 100];

/// Default file name prefix.
pub const DEFAULT_FILE_PREFIX: &str = "VLGE";

/// Issuing institution printed in the header and footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Institution {
    pub name: String,
    pub accreditation: Vec<String>,
    pub address: String,
    pub contact: String,
}

impl Default for Institution {
    fn default() -> Self {
        Self {
            name: "VLGE INSTITUTE PVT.LTD.".into(),
            accreditation: vec![
                "An ISO Certified Institution, DPIIT Recognised Startup(Govt of India)".into(),
                "Registered Under MSME & Registered By Govt of India(MCA)".into(),
            ],
            address: "#104, K K NAGAR, TIRUTTANI, TIRUVALLUR(DIST), TN-631209".into(),
            contact: "Ph: +917708115754 | Email: info@valuelearn.in | Web: www.valuelearn.in"
                .into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("PDF rendering failed: {0}")]
    Render(String),
    #[error("failed to write report to {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A rendered report ready to be saved.
#[derive(Debug, Clone)]
pub struct ExportedReport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportedReport {
    /// Write the report into `dir` under its file name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "verification report written");
        Ok(path)
    }
}

#[derive(Debug, Clone)]
pub struct ReportExporter {
    institution: Institution,
    file_prefix: String,
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self::new(Institution::default(), DEFAULT_FILE_PREFIX)
    }
}

impl ReportExporter {
    pub fn new(institution: Institution, file_prefix: impl Into<String>) -> Self {
        Self {
            institution,
            file_prefix: file_prefix.into(),
        }
    }

    /// `{PREFIX}_{certificateNumber}_Verification_Report.pdf`.
    ///
    /// Path separators in the certificate number become `-`.
    pub fn file_name(&self, record: &VerificationRecord) -> String {
        let cert: String = record
            .certificate_number
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
            .collect();
        format!("{}_{cert}_Verification_Report.pdf", self.file_prefix)
    }

    pub fn export(
        &self,
        record: &VerificationRecord,
        generated_at: DateTime<Utc>,
    ) -> Result<ExportedReport, ExportError> {
        let bytes = self.render(record, generated_at)?;
        Ok(ExportedReport {
            file_name: self.file_name(record),
            bytes,
        })
    }

    fn render(
        &self,
        record: &VerificationRecord,
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, ExportError> {
        let title = format!("Verification Report {}", record.certificate_number);
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Report");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(render_err)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_err)?;
        let canvas = Canvas {
            layer: doc.get_page(page).get_layer(layer),
            regular,
            bold,
        };
        let inst = &self.institution;

        // Header band and page border.
        canvas.fill_rect(0.0, 0.0, PAGE_WIDTH, 50.0, HEADER_YELLOW);
        canvas.stroke_rect(10.0, 10.0, PAGE_WIDTH - 20.0, PAGE_HEIGHT - 20.0, BORDER_AMBER, 2.0);
        canvas.centered(25.0, 24.0, true, LABEL_BROWN, &inst.name);
        for (i, line) in inst.accreditation.iter().enumerate() {
            canvas.centered(35.0 + 7.0 * i as f32, 12.0, false, LABEL_BROWN, line);
        }

        canvas.fill_rect(15.0, 60.0, PAGE_WIDTH - 30.0, 20.0, TITLE_GREEN);
        canvas.centered(73.0, 18.0, true, WHITE, "CERTIFICATE VERIFICATION REPORT");

        canvas.fill_rect(15.0, 90.0, 60.0, 12.0, BADGE_GREEN);
        canvas.text(31.0, 98.0, 10.0, true, WHITE, "VERIFIED");

        canvas.text(20.0, 120.0, 14.0, true, BLACK, "Student Information:");

        // Eight field boxes, two per row; status gets its own box below.
        const TOP: f32 = 135.0;
        const BOX_W: f32 = 80.0;
        const BOX_H: f32 = 15.0;
        let [boxed @ .., (status_label, status_value)] = record.labeled_fields();
        for (i, (label, value)) in boxed.iter().enumerate() {
            let x = if i % 2 == 0 { 20.0 } else { 110.0 };
            let y = TOP + 25.0 * (i / 2) as f32;
            canvas.fill_rect(x, y - 5.0, BOX_W, BOX_H, FIELD_FILL);
            canvas.stroke_rect(x, y - 5.0, BOX_W, BOX_H, HEADER_YELLOW, 1.0);
            canvas.text(x + 2.0, y, 8.0, true, LABEL_BROWN, &label.to_uppercase());
            canvas.text(x + 2.0, y + 7.0, 10.0, false, BLACK, value);
        }

        let status_y = TOP + 105.0;
        canvas.fill_rect(20.0, status_y, BOX_W, BOX_H, STATUS_FILL);
        canvas.stroke_rect(20.0, status_y, BOX_W, BOX_H, BADGE_GREEN, 1.0);
        canvas.text(22.0, status_y + 5.0, 8.0, true, LABEL_BROWN, &status_label.to_uppercase());
        canvas.text(22.0, status_y + 12.0, 12.0, true, STATUS_TEXT, status_value);

        // Footer.
        canvas.fill_rect(0.0, PAGE_HEIGHT - 40.0, PAGE_WIDTH, 40.0, HEADER_YELLOW);
        canvas.centered(PAGE_HEIGHT - 30.0, 10.0, true, LABEL_BROWN, &inst.name);
        canvas.centered(PAGE_HEIGHT - 22.0, 8.0, false, LABEL_BROWN, &inst.address);
        canvas.centered(PAGE_HEIGHT - 15.0, 8.0, false, LABEL_BROWN, &inst.contact);
        let stamp = generated_at.format("Generated on: %d/%m/%Y at %H:%M:%S UTC").to_string();
        canvas.centered(PAGE_HEIGHT - 5.0, 7.0, false, GREY, &stamp);

        let bytes = doc.save_to_bytes().map_err(render_err)?;
        tracing::debug!(
            certificate_number = %record.certificate_number,
            bytes = bytes.len(),
            "verification report rendered"
        );
        Ok(bytes)
    }
}

fn render_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Render(e.to_string())
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

/// Approximate Helvetica advance width in millimetres.
fn text_width(text: &str, size_pt: f32) -> f32 {
    const PT_TO_MM: f32 = 0.3528;
    text.chars().count() as f32 * size_pt * 0.5 * PT_TO_MM
}

/// Drawing helpers in top-left millimetre coordinates.
struct Canvas {
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Canvas {
    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(
            Mm(x),
            Mm(PAGE_HEIGHT - (y + h)),
            Mm(x + w),
            Mm(PAGE_HEIGHT - y),
        )
    }

    fn fill_rect(&self, x: f32, y: f32, w: f32, h: f32, color: [u8; 3]) {
        self.layer.set_fill_color(rgb(color));
        self.layer
            .add_rect(Self::rect(x, y, w, h).with_mode(PaintMode::Fill));
    }

    fn stroke_rect(&self, x: f32, y: f32, w: f32, h: f32, color: [u8; 3], thickness: f32) {
        self.layer.set_outline_color(rgb(color));
        self.layer.set_outline_thickness(thickness);
        self.layer
            .add_rect(Self::rect(x, y, w, h).with_mode(PaintMode::Stroke));
    }

    /// Text with its baseline at `y`.
    fn text(&self, x: f32, y: f32, size: f32, bold: bool, color: [u8; 3], text: &str) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.set_fill_color(rgb(color));
        self.layer
            .use_text(text, size, Mm(x), Mm(PAGE_HEIGHT - y), font);
    }

    fn centered(&self, y: f32, size: f32, bold: bool, color: [u8; 3], text: &str) {
        let x = ((PAGE_WIDTH - text_width(text, size)) / 2.0).max(12.0);
        self.text(x, y, size, bold, color, text);
    }
}
