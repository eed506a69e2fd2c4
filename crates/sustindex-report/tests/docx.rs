use sustindex_report::docx::{generate_docx, strip_ansi};
use sustindex_report::styles::DocumentStyles;

#[test]
fn generates_zip_container() {
    let rendered = "# Assessment Complete!\n\n## ESG Baseline\n\n**Grade:** A-\n\n- **Environmental:** 72\n- unmatched **bold\n";

    let bytes = generate_docx(rendered, &DocumentStyles::default()).unwrap();

    assert!(bytes.len() > 100);
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn colour_sequences_are_removed() {
    assert_eq!(strip_ansi("Grade \u{1b}[1;32mA\u{1b}[0m!"), "Grade A!");
    assert_eq!(strip_ansi("no colour"), "no colour");
}
