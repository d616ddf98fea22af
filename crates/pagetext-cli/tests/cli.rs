//! End-to-end tests for the `pagetext` binary.
//!
//! PDFs are generated on the fly: each page is US Letter, uses the built-in
//! Helvetica font, and draws its lines 20pt apart from the top margin. A page
//! with no lines has an empty content stream (no text layer).

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const PAGE_BREAK: &str = "\n--- PAGE BREAK ---\n";

/// Serialize a minimal PDF with one page per entry of `pages`.
fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    // 1: catalog, 2: page tree, 3: font, then a page/content pair per page.
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| 4 + 2 * i).collect();
    let kids = page_ids
        .iter()
        .map(|id| format!("{id} 0 R"))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{kids}] /Count {} >>",
            pages.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];
    for (lines, page_id) in pages.iter().zip(&page_ids) {
        let content: String = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let y = 720 - 20 * i;
                let escaped = line
                    .replace('\\', "\\\\")
                    .replace('(', "\\(")
                    .replace(')', "\\)");
                format!("BT /F1 12 Tf 72 {y} Td ({escaped}) Tj ET\n")
            })
            .collect();
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            page_id + 1
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ));
    }

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_offset = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.extend_from_slice(xref.as_bytes());
    pdf
}

fn write_pdf(dir: &TempDir, name: &str, pages: &[&[&str]]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, build_pdf(pages)).unwrap();
    path
}

fn run(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pagetext"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is UTF-8")
}

#[test]
fn multi_page_pdf_has_n_minus_one_separators() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(
        &dir,
        "three.pdf",
        &[&["First page"], &["Second page"], &["Third page"]],
    );

    let output = run(&[&path]);
    assert!(output.status.success(), "{output:?}");

    let text = stdout_text(&output);
    assert_eq!(text.matches(PAGE_BREAK).count(), 2);
    let segments: Vec<&str> = text.split(PAGE_BREAK).collect();
    assert!(segments[0].contains("First"));
    assert!(segments[1].contains("Second"));
    assert!(segments[2].contains("Third"));
    assert!(!text.ends_with(PAGE_BREAK));
}

#[test]
fn single_page_pdf_has_no_separator() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(&dir, "one.pdf", &[&["Hello", "World"]]);

    let output = run(&[&path]);
    assert!(output.status.success(), "{output:?}");

    let text = stdout_text(&output);
    assert!(!text.contains(PAGE_BREAK));
    let hello = text.lines().position(|l| l.contains("Hello")).unwrap();
    let world = text.lines().position(|l| l.contains("World")).unwrap();
    assert!(hello < world);
}

#[test]
fn layout_mode_indents_from_left_margin() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(&dir, "margin.pdf", &[&["Indented"]]);

    let text = stdout_text(&run(&[&path]));
    let row = text.lines().find(|l| l.contains("Indented")).unwrap();
    // 72pt margin at 7.25pt per column.
    assert!(row.starts_with("          Indented"), "{row:?}");
}

#[test]
fn page_without_text_is_empty_segment() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(&dir, "scan.pdf", &[&["Before"], &[], &["After"]]);

    let output = run(&[&path]);
    assert!(output.status.success(), "{output:?}");

    let text = stdout_text(&output);
    let segments: Vec<&str> = text.split(PAGE_BREAK).collect();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[1], "");
}

#[test]
fn only_blank_page_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(&dir, "blank.pdf", &[&[]]);

    let output = run(&[&path]);
    assert!(output.status.success(), "{output:?}");
    assert!(output.stdout.is_empty());
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(&dir, "same.pdf", &[&["Alpha beta", "gamma"], &["delta"]]);

    let first = run(&[&path]);
    let second = run(&[&path]);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn no_layout_flag_prints_plain_lines() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(&dir, "plain.pdf", &[&["Hello", "World"]]);

    let output = Command::new(env!("CARGO_BIN_EXE_pagetext"))
        .arg("--no-layout")
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout_text(&output), "Hello\nWorld");
}

#[test]
fn arguments_after_path_are_ignored() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(&dir, "extra.pdf", &[&["Hello"]]);

    let plain = run(&[&path]);
    let output = Command::new(env!("CARGO_BIN_EXE_pagetext"))
        .arg(&path)
        .args(["extra", "--whatever"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    assert_eq!(output.stdout, plain.stdout);
}

#[test]
fn path_starting_with_hyphen_is_a_path() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir, "-scan.pdf", &[&["Scanned"]]);

    let output = Command::new(env!("CARGO_BIN_EXE_pagetext"))
        .arg("-scan.pdf")
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    assert!(stdout_text(&output).contains("Scanned"));
}

#[test]
fn missing_argument_exits_with_usage() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "{stderr}");
}

#[test]
fn invalid_tolerance_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(&dir, "one.pdf", &[&["text"]]);

    let output = Command::new(env!("CARGO_BIN_EXE_pagetext"))
        .args(["--x-tolerance", "-1"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_file_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.pdf");

    let output = run(&[&path]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does-not-exist.pdf"), "{stderr}");
}

#[test]
fn corrupt_file_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.pdf");
    std::fs::write(&path, b"this is not a pdf").unwrap();

    let output = run(&[&path]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
