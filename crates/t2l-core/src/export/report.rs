//! Human-readable processing report.
//!
//! The PDF form is drawn directly with lopdf content operators using the
//! standard Helvetica faces, so no font files are needed.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::debug;

use crate::error::OutputError;
use crate::models::config::ReportConfig;
use crate::models::declaration::ContainerSummary;

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const LEFT: i64 = 40;
const BOTTOM_MARGIN: i64 = 80;
const FOOTER_Y: i64 = 60;
const LOGO_MAX_WIDTH: u32 = 150;
const LOGO_MAX_HEIGHT: u32 = 60;
const LOGO_RESOURCE: &str = "Im1";

/// Summary of one batch run.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub footer: String,
    pub generated_at: DateTime<Local>,
    pub elapsed: Duration,
    pub containers: ContainerSummary,
    pub logo: Option<PathBuf>,
}

impl Report {
    pub fn new(config: &ReportConfig, containers: ContainerSummary, elapsed: Duration) -> Self {
        Self {
            title: config.title.clone(),
            footer: config.footer.clone(),
            generated_at: Local::now(),
            elapsed,
            containers,
            logo: config.logo_path.clone(),
        }
    }

    pub fn with_generated_at(mut self, at: DateTime<Local>) -> Self {
        self.generated_at = at;
        self
    }

    fn elapsed_line(&self) -> String {
        format!(
            "Tiempo total de procesamiento: {:.2} segundos",
            self.elapsed.as_secs_f64()
        )
    }

    fn generated_line(&self) -> String {
        format!("Generado: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S"))
    }

    fn container_line(container: &str, items: usize) -> String {
        format!("{}   Total partidas: {}", container, items)
    }

    /// Plain-text rendering.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{}", self.elapsed_line());
        let _ = writeln!(out, "{}", self.generated_line());
        let _ = writeln!(out);
        let _ = writeln!(out, "Detalle por contenedor:");
        for (container, items) in self.containers.iter() {
            let _ = writeln!(out, "  {}", Self::container_line(container, items));
        }
        let _ = writeln!(
            out,
            "  Documentos: {}   Partidas: {}",
            self.containers.len(),
            self.containers.total_items()
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.footer);
        out
    }

    /// A4 PDF rendering, paginated.
    pub fn render_pdf(&self) -> Result<Vec<u8>, OutputError> {
        let logo = self.logo.as_deref().map(Logo::load).transpose()?;

        let mut canvas = Canvas::new();
        if let Some(logo) = &logo {
            canvas.image(logo);
        }

        canvas.y -= 120;
        canvas.text(Font::Bold, 16, &self.title);
        canvas.y -= 25;
        canvas.text(Font::Regular, 10, &self.elapsed_line());
        canvas.y -= 20;
        canvas.text(Font::Regular, 10, &self.generated_line());
        canvas.y -= 30;
        canvas.text(Font::Bold, 12, "Detalle por contenedor:");
        canvas.y -= 20;

        for (container, items) in self.containers.iter() {
            canvas.text(Font::Regular, 11, &Self::container_line(container, items));
            canvas.y -= 18;
            canvas.ensure_room();
        }

        canvas.y -= 10;
        canvas.ensure_room();
        canvas.text_at(Font::Italic, 10, FOOTER_Y, &self.footer);

        let pages = canvas.finish();
        debug!("Rendering report with {} pages", pages.len());
        build_document(pages, logo.as_ref())
    }
}

/// Logo decoded to raw RGB samples.
struct Logo {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl Logo {
    fn load(path: &Path) -> Result<Self, OutputError> {
        let image = image::open(path)
            .map_err(|e| OutputError::Report(format!("logo {}: {}", path.display(), e)))?
            .to_rgb8();
        let (width, height) = image.dimensions();
        debug!("Loaded logo {} ({}x{})", path.display(), width, height);
        Ok(Self {
            width,
            height,
            rgb: image.into_raw(),
        })
    }

    /// Size on the page, scaled down to fit the logo box.
    fn placed_size(&self) -> (i64, i64) {
        let scale = f64::min(
            f64::from(LOGO_MAX_WIDTH) / f64::from(self.width.max(1)),
            f64::from(LOGO_MAX_HEIGHT) / f64::from(self.height.max(1)),
        )
        .min(1.0);
        (
            ((f64::from(self.width) * scale).round() as i64).max(1),
            ((f64::from(self.height) * scale).round() as i64).max(1),
        )
    }
}

#[derive(Clone, Copy)]
enum Font {
    Regular,
    Bold,
    Italic,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Italic => "F3",
        }
    }
}

/// Accumulates text operations page by page, top to bottom.
struct Canvas {
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    y: i64,
}

impl Canvas {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            y: PAGE_HEIGHT - 50,
        }
    }

    fn text(&mut self, font: Font, size: i64, text: &str) {
        let y = self.y;
        self.text_at(font, size, y, text);
    }

    fn text_at(&mut self, font: Font, size: i64, y: i64, text: &str) {
        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(font.resource().as_bytes().to_vec()), Object::Integer(size)],
            ),
            Operation::new("Td", vec![Object::Integer(LEFT), Object::Integer(y)]),
            Operation::new("Tj", vec![Object::string_literal(win_ansi(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    /// Draw the logo with its top-left corner at the cursor.
    fn image(&mut self, logo: &Logo) {
        let (width, height) = logo.placed_size();
        self.current.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Integer(width),
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(height),
                    Object::Integer(LEFT),
                    Object::Integer(self.y - height),
                ],
            ),
            Operation::new("Do", vec![Object::Name(LOGO_RESOURCE.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ]);
    }

    /// Start a new page once the cursor reaches the bottom margin.
    fn ensure_room(&mut self) {
        if self.y < BOTTOM_MARGIN {
            self.pages.push(std::mem::take(&mut self.current));
            self.y = PAGE_HEIGHT - BOTTOM_MARGIN;
        }
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        self.pages.push(self.current);
        self.pages
    }
}

/// Encode for the standard fonts' WinAnsi encoding; characters outside
/// Latin-1 become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

fn build_document(pages: Vec<Vec<Operation>>, logo: Option<&Logo>) -> Result<Vec<u8>, OutputError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font = |doc: &mut Document, base: &str| {
        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => Object::Name(base.as_bytes().to_vec()),
            "Encoding" => "WinAnsiEncoding",
        })
    };
    let regular = font(&mut doc, "Helvetica");
    let bold = font(&mut doc, "Helvetica-Bold");
    let italic = font(&mut doc, "Helvetica-Oblique");

    let mut resources = dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
            "F3" => italic,
        },
    };
    if let Some(logo) = logo {
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(logo.width),
                "Height" => i64::from(logo.height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8i64,
            },
            logo.rgb.clone(),
        ));
        resources.set("XObject", dictionary! { LOGO_RESOURCE => image_id });
    }
    let resources_id = doc.add_object(resources);

    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| OutputError::Report(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| OutputError::Report(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn report(containers: usize) -> Report {
        let mut summary = ContainerSummary::new();
        for i in 0..containers {
            summary.record(format!("MSCU{:06}", i), i % 4);
        }
        Report::new(&ReportConfig::default(), summary, Duration::from_millis(1234))
            .with_generated_at(Local.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap())
    }

    #[test]
    fn test_render_text() {
        let text = report(2).render_text();
        assert!(text.starts_with("INFORME PROCESAMIENTO T2L\n"));
        assert!(text.contains("Tiempo total de procesamiento: 1.23 segundos"));
        assert!(text.contains("Generado: 2025-03-01 09:30:00"));
        assert!(text.contains("MSCU000000   Total partidas: 0"));
        assert!(text.contains("MSCU000001   Total partidas: 1"));
        assert!(text.contains("Documentos: 2   Partidas: 1"));
    }

    #[test]
    fn test_render_pdf_single_page() {
        let bytes = report(3).render_pdf().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_render_pdf_paginates() {
        let bytes = report(120).render_pdf().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() >= 3);
    }

    fn has_image(doc: &Document) -> bool {
        doc.objects.values().any(|object| match object {
            Object::Stream(stream) => stream
                .dict
                .get(b"Subtype")
                .map(|subtype| subtype == &Object::Name(b"Image".to_vec()))
                .unwrap_or(false),
            _ => false,
        })
    }

    #[test]
    fn test_render_pdf_with_logo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        image::RgbImage::from_pixel(300, 60, image::Rgb([200, 30, 30]))
            .save(&path)
            .unwrap();

        let mut with_logo = report(2);
        with_logo.logo = Some(path);
        let doc = Document::load_mem(&with_logo.render_pdf().unwrap()).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        assert!(has_image(&doc));

        let without = Document::load_mem(&report(2).render_pdf().unwrap()).unwrap();
        assert!(!has_image(&without));
    }

    #[test]
    fn test_missing_logo_is_an_error() {
        let mut broken = report(1);
        broken.logo = Some(PathBuf::from("/definitely/missing/logo.png"));
        assert!(matches!(broken.render_pdf(), Err(OutputError::Report(_))));
    }

    #[test]
    fn test_logo_is_scaled_to_fit() {
        let logo = Logo {
            width: 300,
            height: 60,
            rgb: Vec::new(),
        };
        assert_eq!(logo.placed_size(), (150, 30));

        let small = Logo {
            width: 20,
            height: 10,
            rgb: Vec::new(),
        };
        assert_eq!(small.placed_size(), (20, 10));
    }

    #[test]
    fn test_win_ansi() {
        assert_eq!(win_ansi("Año"), vec![b'A', 0xF1, b'o']);
        assert_eq!(win_ansi("€"), vec![b'?']);
    }
}
