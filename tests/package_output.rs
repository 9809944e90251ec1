//! End-to-end checks on generated archives.
//!
//! Each test renders pages, writes a real archive and reads it back with
//! `PackageReader`.

use chrono::NaiveDate;
use docxgen::package::{
    ContentTypes, PackageReader, CORE_PROPS_PATH, DOCUMENT_PATH, ENTRY_ORDER, MAIN_DOCUMENT_TYPE,
    OFFICE_DOCUMENT_REL,
};
use docxgen::render::BLANK_LINE_TEXT;
use docxgen::{generate_bytes, generate_file, ContentSource, DocumentMetadata, Error, PageBlock};
use std::path::Path;

fn metadata() -> DocumentMetadata {
    DocumentMetadata::on_date(
        "Career Compass Full Proposal",
        "Team Career Compass",
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
    )
}

fn scenario_pages() -> Vec<PageBlock> {
    vec![
        PageBlock::new("Cover").with_lines(["Line A", ""]),
        PageBlock::new("End").with_line("Line B"),
    ]
}

fn read(pages: &[PageBlock]) -> PackageReader {
    PackageReader::from_bytes(generate_bytes(pages, &metadata()).unwrap()).unwrap()
}

#[test]
fn test_scenario_archive_layout() {
    let reader = read(&scenario_pages());

    assert_eq!(reader.entry_names(), ENTRY_ORDER.to_vec());

    let types = reader.content_types().unwrap();
    assert_eq!(types.defaults.len(), 2);
    assert_eq!(types.overrides.len(), 3);
    assert_eq!(types, ContentTypes::wordprocessing());
    assert_eq!(
        types.content_type_for(DOCUMENT_PATH),
        Some(MAIN_DOCUMENT_TYPE)
    );
}

#[test]
fn test_scenario_body_order() {
    let reader = read(&scenario_pages());
    let texts = reader.paragraph_texts().unwrap();
    assert_eq!(
        texts,
        vec![
            "Cover",
            BLANK_LINE_TEXT,
            "Line A",
            BLANK_LINE_TEXT,
            "",
            "End",
            BLANK_LINE_TEXT,
            "Line B",
        ]
    );

    let xml = reader.read_xml(DOCUMENT_PATH).unwrap();
    assert!(xml.ends_with("</w:sectPr></w:body></w:document>"));
}

#[test]
fn test_archive_completeness() {
    let reader = read(&scenario_pages());
    let report = reader.verify().unwrap();
    assert!(report.is_ok(), "{}", report.summary());

    let package_rels = reader.relationships("").unwrap();
    for rel in package_rels.iter() {
        assert!(reader.exists(&rel.target), "missing {}", rel.target);
    }
    assert_eq!(
        package_rels.get_by_type(OFFICE_DOCUMENT_REL)[0].target,
        DOCUMENT_PATH
    );
    assert!(reader.relationships(DOCUMENT_PATH).unwrap().is_empty());

    let types = reader.content_types().unwrap();
    for name in reader.entry_names() {
        assert!(types.content_type_for(&name).is_some(), "untyped {name}");
    }
}

#[test]
fn test_output_is_deterministic() {
    let pages = scenario_pages();
    let first = generate_bytes(&pages, &metadata()).unwrap();
    let second = generate_bytes(&pages, &metadata()).unwrap();
    assert_eq!(first, second);

    let later = metadata().with_date(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    let third = generate_bytes(&pages, &later).unwrap();
    assert_ne!(first, third);
}

#[test]
fn test_file_matches_memory_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("proposal.docx");
    generate_file(&scenario_pages(), &metadata(), &path).unwrap();

    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(on_disk, generate_bytes(&scenario_pages(), &metadata()).unwrap());
    assert!(PackageReader::open(&path).unwrap().verify().unwrap().is_ok());
}

#[test]
fn test_escaping_round_trip() {
    let samples = [
        "Q&A: <b>bold</b> isn't \"markup\"",
        "&amp; &lt; stay literal",
        "- leading dash and trailing space ",
        "1. Numbered — em dash, ünïcödé, 日本語, 🚀",
        "'single' & \"double\" > <",
    ];
    let page = PageBlock::new(samples[0])
        .with_subtitle(samples[1])
        .with_lines(samples[2..].iter().copied());

    let texts = read(&[page]).paragraph_texts().unwrap();
    assert_eq!(
        texts,
        vec![
            samples[0],
            BLANK_LINE_TEXT,
            samples[1],
            BLANK_LINE_TEXT,
            samples[2],
            samples[3],
            samples[4],
        ]
    );
}

#[test]
fn test_control_characters_are_encoding_errors() {
    for text in ["a\u{7}b", "bell\u{7}here\u{b}vt", "nul\u{0}"] {
        let pages = [PageBlock::new("Cover").with_line(text)];
        let err = generate_bytes(&pages, &metadata()).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)), "{text:?}: {err}");
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.docx");
    let pages = [PageBlock::new("Title\u{1b}[1m")];
    assert!(generate_file(&pages, &metadata(), &path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_page_break_count() {
    for n in 1..=4 {
        let pages: Vec<PageBlock> = (1..=n)
            .map(|i| PageBlock::new(format!("Page {i}")).with_line("body"))
            .collect();
        let xml = read(&pages).read_xml(DOCUMENT_PATH).unwrap();
        assert_eq!(xml.matches("<w:br w:type=\"page\"/>").count(), n - 1);
    }
}

#[test]
fn test_core_properties_carry_metadata() {
    let meta = metadata().with_last_modified_by("Editor & Co");
    let bytes = generate_bytes(&scenario_pages(), &meta).unwrap();
    let core = PackageReader::from_bytes(bytes)
        .unwrap()
        .read_xml(CORE_PROPS_PATH)
        .unwrap();

    assert!(core.contains("<dc:title>Career Compass Full Proposal</dc:title>"));
    assert!(core.contains("<cp:lastModifiedBy>Editor &amp; Co</cp:lastModifiedBy>"));
    assert!(core.contains("2025-01-31T00:00:00Z</dcterms:created>"));
}

#[test]
fn test_unwritable_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("out.docx");
    let err = generate_file(&scenario_pages(), &metadata(), &path).unwrap_err();
    assert!(matches!(err, Error::PackageWrite { .. }));
}

#[test]
fn test_demo_content_builds() {
    let demo = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/career_compass.json");
    let source = ContentSource::from_path(&demo).unwrap();
    assert_eq!(source.pages.len(), 18);

    let bytes = generate_bytes(&source.resolved_pages(), &source.metadata).unwrap();
    let reader = PackageReader::from_bytes(bytes).unwrap();
    assert!(reader.verify().unwrap().is_ok());
    assert!(reader
        .paragraph_texts()
        .unwrap()
        .iter()
        .any(|text| text == "Date: January 31, 2025"));

    let xml = reader.read_xml(DOCUMENT_PATH).unwrap();
    assert_eq!(xml.matches("<w:br w:type=\"page\"/>").count(), 17);
    assert!(reader
        .read_xml("docProps/app.xml")
        .unwrap()
        .contains("<Pages>18</Pages>"));
}

#[test]
fn test_created_only_source_dates_agree() {
    let source = ContentSource::from_json_str(
        r#"{
            "metadata": { "title": "Proposal", "author": "Team", "created": "2025-01-31T00:00:00Z" },
            "pages": [ { "title": "Cover", "lines": ["Date: {date}"] } ]
        }"#,
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("proposal.docx");
    docxgen::generate_from_source(&source, &path).unwrap();

    let reader = PackageReader::open(&path).unwrap();
    let core = reader.read_xml(CORE_PROPS_PATH).unwrap();
    assert!(core.contains("2025-01-31T00:00:00Z</dcterms:created>"));
    assert!(core.contains("2025-01-31T00:00:00Z</dcterms:modified>"));
    assert!(!core.contains("1980"));
    assert_eq!(
        reader.paragraph_texts().unwrap().last().map(String::as_str),
        Some("Date: January 31, 2025")
    );
}
