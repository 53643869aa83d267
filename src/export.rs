use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;

use crate::models::ResumeData;
use crate::render::{self, DisplaySettings, Template};

// A4 geometry in millimeters, and the margin the PDF layout reserves.
const A4_WIDTH_MM: f64 = 210.0;
const A4_HEIGHT_MM: f64 = 297.0;
const PAGE_MARGIN_MM: f64 = 15.0;

// One rendered line of the base font occupies this much vertical space.
const BASE_LINE_HEIGHT_MM: f64 = 5.0;
const BASE_FONT_SIZE_PT: f64 = 11.0;

const SHARE_HOST: &str = "https://resumepro.example";
const SHARE_TOKEN_LEN: usize = 13;
const SHARE_TOKEN_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Number of A4 pages needed for content of the given height. Content that
/// fits within one page is still one page.
pub fn page_count(img_height_mm: f64, page_height_mm: f64) -> usize {
    if img_height_mm <= page_height_mm {
        return 1;
    }
    (img_height_mm / page_height_mm).ceil() as usize
}

fn line_height_mm(settings: &DisplaySettings) -> f64 {
    BASE_LINE_HEIGHT_MM * settings.font_size * settings.line_spacing
}

fn usable_page_height_mm() -> f64 {
    A4_HEIGHT_MM - 2.0 * PAGE_MARGIN_MM
}

/// Paginated line layout ready for PDF assembly.
pub struct PdfLayout {
    pub pages: Vec<Vec<String>>,
}

impl PdfLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Split the rendered layout into fixed-size A4 pages, mirroring the
/// raster-slicing of the original exporter: total content height divided by
/// page height, rounded up.
pub fn paginate(lines: Vec<String>, settings: &DisplaySettings) -> PdfLayout {
    let line_height = line_height_mm(settings);
    let usable = usable_page_height_mm();
    let img_height = lines.len() as f64 * line_height;
    let pages_needed = page_count(img_height, usable);

    if lines.is_empty() {
        return PdfLayout { pages: vec![Vec::new()] };
    }

    // Cut the sheet into exactly `pages_needed` slices, front-loading the
    // remainder. Deriving a chunk size instead can merge slices when the
    // rounded size divides the line count evenly, under-reporting pages.
    let base = lines.len() / pages_needed;
    let extra = lines.len() % pages_needed;
    let mut iter = lines.into_iter();
    let mut pages = Vec::with_capacity(pages_needed);
    for i in 0..pages_needed {
        let take = base + usize::from(i < extra);
        pages.push(iter.by_ref().take(take).collect());
    }

    PdfLayout { pages }
}

fn escape_typst(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '\\' | '#' | '$' | '*' | '_' | '`' | '@' | '[' | ']' | '<' | '>' | '~' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

fn typst_font(settings: &DisplaySettings) -> &str {
    match settings.font_family.as_str() {
        "serif" => "Libertinus Serif",
        "mono" => "DejaVu Sans Mono",
        "sans" => "DejaVu Sans",
        other => other,
    }
}

/// Build the typst source for the paginated layout: A4 page, font family and
/// size from the display settings, one explicit page break per raster page.
pub fn build_typst_source(layout: &PdfLayout, settings: &DisplaySettings) -> String {
    let mut src = String::new();
    src.push_str(&format!(
        "#set page(width: {A4_WIDTH_MM}mm, height: {A4_HEIGHT_MM}mm, margin: {PAGE_MARGIN_MM}mm)\n"
    ));
    src.push_str(&format!(
        "#set text(font: \"{}\", size: {:.1}pt)\n",
        typst_font(settings),
        BASE_FONT_SIZE_PT * settings.font_size
    ));
    src.push_str(&format!(
        "#set par(leading: {:.2}em)\n\n",
        0.65 * settings.line_spacing
    ));

    for (i, page) in layout.pages.iter().enumerate() {
        if i > 0 {
            src.push_str("#pagebreak()\n");
        }
        for line in page {
            if line.is_empty() {
                src.push_str("#v(1em)\n");
            } else {
                src.push_str(&escape_typst(line));
                src.push_str(" \\\n");
            }
        }
    }
    src
}

/// Render the document with the given template, paginate it onto A4 pages
/// and compile a PDF via `typst`. Returns the page count on success.
pub fn export_pdf(
    data: &ResumeData,
    template: Template,
    settings: &DisplaySettings,
    output: &Path,
) -> Result<usize> {
    let lines = render::render(template, data, settings);
    let layout = paginate(lines, settings);
    let source = build_typst_source(&layout, settings);

    let workdir = std::env::temp_dir().join(format!("vitae-pdf-{}", share_token()));
    std::fs::create_dir_all(&workdir).context("Failed to create PDF work directory")?;
    let source_path = workdir.join("resume.typ");
    std::fs::write(&source_path, source).context("Failed to write typst source")?;

    let status = Command::new("typst")
        .arg("compile")
        .arg(&source_path)
        .arg(output)
        .status()
        .context("Failed to execute typst. Is it installed and on PATH?")?;

    let _ = std::fs::remove_file(&source_path);
    let _ = std::fs::remove_dir(&workdir);

    if !status.success() {
        anyhow::bail!("Typst compilation failed");
    }

    Ok(layout.page_count())
}

/// Fixed plain-text layout: header, summary, experience, education, skills.
pub fn text_content(data: &ResumeData) -> String {
    let info = &data.personal_info;
    let mut content = format!("{} {}\n", info.first_name, info.last_name);
    content.push_str(&format!("{}\n", info.title));
    content.push_str(&format!("{} | {} | {}\n", info.email, info.phone, info.location));
    if !info.linkedin.is_empty() {
        content.push_str(&format!("{}\n", info.linkedin));
    }
    if let Some(website) = &info.website {
        content.push_str(&format!("{website}\n"));
    }

    content.push_str("\n\nPROFESSIONAL SUMMARY\n");
    content.push_str(&format!("{}\n", data.summary));

    content.push_str("\n\nWORK EXPERIENCE\n");
    for exp in &data.work_experience {
        content.push_str(&format!("\n{}\n", exp.title));
        content.push_str(&format!("{} | {} - {}\n", exp.company, exp.start_date, exp.end_date));
        for bullet in &exp.bullets {
            content.push_str(&format!("• {bullet}\n"));
        }
    }

    content.push_str("\n\nEDUCATION\n");
    for edu in &data.education {
        content.push_str(&format!("\n{}\n", edu.degree));
        content.push_str(&format!("{} | {} - {}\n", edu.institution, edu.start_date, edu.end_date));
        if let Some(desc) = &edu.description {
            content.push_str(&format!("{desc}\n"));
        }
    }

    content.push_str("\n\nSKILLS\n");
    content.push_str(&data.skills.join(", "));
    content
}

pub fn export_text(data: &ResumeData, output: &Path) -> Result<()> {
    std::fs::write(output, text_content(data))
        .with_context(|| format!("Failed to write {}", output.display()))
}

/// The JSON backup shape: full document, template id, export timestamp.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonBackup {
    pub resume_data: ResumeData,
    pub template: String,
    pub export_date: String,
}

pub fn json_content(data: &ResumeData, template: &str) -> Result<String> {
    let backup = JsonBackup {
        resume_data: data.clone(),
        template: template.to_string(),
        export_date: chrono::Utc::now().to_rfc3339(),
    };
    serde_json::to_string_pretty(&backup).context("Failed to serialize resume")
}

pub fn export_json(data: &ResumeData, template: &str, output: &Path) -> Result<()> {
    std::fs::write(output, json_content(data, template)?)
        .with_context(|| format!("Failed to write {}", output.display()))
}

/// Parse a previously exported JSON backup back into document + template.
pub fn import_json(path: &Path) -> Result<(ResumeData, String)> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let backup: JsonBackup = serde_json::from_str(&raw)
        .with_context(|| format!("Not a valid resume export: {}", path.display()))?;
    Ok((backup.resume_data, backup.template))
}

fn share_token() -> String {
    let mut rng = rand::thread_rng();
    (0..SHARE_TOKEN_LEN)
        .map(|_| SHARE_TOKEN_CHARS[rng.gen_range(0..SHARE_TOKEN_CHARS.len())] as char)
        .collect()
}

/// Mock share link. Nothing is persisted remotely; the URL is not resolvable.
pub fn create_shareable_link() -> String {
    format!("{SHARE_HOST}/share/{}", share_token())
}
