use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts, Style, StyleType};

use crate::error::ReportError;
use crate::styles::DocumentStyles;

const TITLE: &str = "Title";
const SECTION: &str = "Heading1";
const SUBSECTION: &str = "Heading2";

/// Build a DOCX file from a rendered (uncoloured) results page.
///
/// Line syntax understood:
/// - `# text` title, `## text` section, `### text` subsection
/// - `- text` bullet
/// - `**text**` bold run inside any body line
///
/// ANSI colour sequences are stripped, so terminal output can be passed in
/// as well.
pub fn generate_docx(rendered: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ReportError> {
    let mut docx = Docx::new()
        .add_style(heading_style(TITLE, "title", styles.title_size, styles))
        .add_style(heading_style(SECTION, "heading 1", styles.section_size, styles))
        .add_style(heading_style(SUBSECTION, "heading 2", styles.subsection_size, styles));

    let plain = strip_ansi(rendered);
    let mut previous_blank = true;
    for line in plain.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !previous_blank {
                docx = docx.add_paragraph(Paragraph::new());
            }
            previous_blank = true;
            continue;
        }
        previous_blank = false;

        let paragraph = if let Some(text) = trimmed.strip_prefix("### ") {
            heading_paragraph(text, SUBSECTION, styles)
        } else if let Some(text) = trimmed.strip_prefix("## ") {
            heading_paragraph(text, SECTION, styles)
        } else if let Some(text) = trimmed.strip_prefix("# ") {
            heading_paragraph(text, TITLE, styles)
        } else if let Some(text) = trimmed.strip_prefix("- ") {
            bullet_paragraph(text, styles)
        } else {
            body_paragraph(trimmed, styles)
        };
        docx = docx.add_paragraph(paragraph);
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ReportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

fn heading_style(style_id: &str, name: &str, size_pt: usize, styles: &DocumentStyles) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // half-points
        .bold()
        .fonts(RunFonts::new().ascii(&styles.heading_font))
}

fn heading_paragraph(text: &str, style_id: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new().style(style_id).add_run(
        Run::new()
            .add_text(text.replace("**", ""))
            .color(&styles.heading_color),
    )
}

fn bullet_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let bullet = body_run("\u{2022} ", styles);
    inline_runs(text, styles)
        .into_iter()
        .fold(Paragraph::new().align(AlignmentType::Left).add_run(bullet), |p, run| {
            p.add_run(run)
        })
}

fn body_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    inline_runs(text, styles)
        .into_iter()
        .fold(Paragraph::new().align(AlignmentType::Left), |p, run| p.add_run(run))
}

fn body_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

/// Split on `**` markers; odd segments are bold. An unmatched marker is
/// kept as literal text.
fn inline_runs(text: &str, styles: &DocumentStyles) -> Vec<Run> {
    let segments: Vec<&str> = text.split("**").collect();
    let balanced = segments.len() % 2 == 1;

    let mut runs = Vec::with_capacity(segments.len());
    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            continue;
        }
        let last = i == segments.len() - 1;
        if i % 2 == 1 && (balanced || !last) {
            runs.push(body_run(segment, styles).bold());
        } else if i % 2 == 1 {
            runs.push(body_run(&format!("**{segment}"), styles));
        } else {
            runs.push(body_run(segment, styles));
        }
    }
    runs
}

/// Remove `ESC [ ... m` colour sequences.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' && chars.peek() == Some(&'[') {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}
