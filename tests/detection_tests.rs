//! Integration tests for content detection with the built-in definitions

use mimesniff::{
    ArchiveError, ArchiveReader, ByteSignature, Mime, MimeDetection, ParallelConfig,
    SignatureDefinition,
};
use pretty_assertions::assert_eq;
use regex::Regex;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::sync::Arc;
use zip::write::SimpleFileOptions;

fn zip_with(entries: &[&str]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for entry in entries {
        writer.start_file(*entry, options).unwrap();
        writer.write_all(b"<xml/>").unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn ids(found: &[SignatureDefinition]) -> Vec<&str> {
    found.iter().filter_map(|d| d.id.as_deref()).collect()
}

fn strings(mimes: &[Mime]) -> Vec<String> {
    mimes.iter().map(ToString::to_string).collect()
}

#[test]
fn test_jpeg_header_detected() {
    let detection = MimeDetection::new();
    let found = detection.detect(&[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, 0x4a, 0x46]);
    assert_eq!(ids(&found), vec!["jpeg"]);
    assert_eq!(strings(&Mime::detect(&[0xff, 0xd8, 0xff])), vec!["image/jpeg"]);
}

#[test]
fn test_openxml_document_beats_plain_zip() {
    let buffer = zip_with(&["[Content_Types].xml", "_rels/.rels", "word/document.xml"]);
    let found = MimeDetection::new().detect(&buffer);
    assert_eq!(ids(&found), vec!["word_openxml"]);
}

#[test]
fn test_zip_without_office_members_is_plain_zip() {
    let buffer = zip_with(&["README.md", "src/main.rs"]);
    let found = MimeDetection::new().detect(&buffer);
    assert_eq!(ids(&found), vec!["zip"]);
}

#[test]
fn test_legacy_office_header_ties_all_three() {
    let buffer = [0xd0, 0xcf, 0x11, 0xe0, 0xa1, 0xb1, 0x1a, 0xe1];
    assert_eq!(
        strings(&Mime::detect(&buffer)),
        vec!["application/word", "application/excel", "application/powerpoint"]
    );
}

#[test]
fn test_same_type_results_are_deduplicated_by_facade() {
    let buffer = b"%timeout = 30";
    let found = MimeDetection::new().detect(buffer);
    assert_eq!(ids(&found), vec!["configuration", "text"]);
    assert_eq!(strings(&Mime::detect(buffer)), vec!["text/plain"]);
}

#[test]
fn test_empty_and_unrecognized_buffers() {
    let detection = MimeDetection::new();
    assert!(detection.detect(&[]).is_empty());
    assert!(Mime::detect(&[]).is_empty());
    assert!(detection.detect(&[0x00, 0x01, 0x02, 0x03]).is_empty());
}

#[test]
fn test_unrelated_definitions_in_same_tier_keep_registration_order() {
    let detection = MimeDetection::from_definitions(vec![
        SignatureDefinition::new("application", "x-second")
            .with_magic(ByteSignature::bytes(b"AB")),
        SignatureDefinition::new("application", "x-first").with_magic(ByteSignature::bytes(b"A")),
        SignatureDefinition::new("text", "x-lower")
            .with_pattern(Regex::new("^AB").unwrap()),
    ]);

    let found = detection.detect(b"ABC");
    let subtypes: Vec<&str> = found.iter().map(|d| d.subtype.as_str()).collect();
    assert_eq!(subtypes, vec!["x-second", "x-first"]);
}

#[test]
fn test_extension_definitions_extend_builtins() {
    let detection = MimeDetection::new();
    let before = detection.len();
    detection.add_definitions([SignatureDefinition::new("application", "x-lzip")
        .with_id("lzip")
        .with_magic(ByteSignature::bytes(b"LZIP"))]);

    assert_eq!(detection.len(), before + 1);
    assert_eq!(ids(&detection.detect(b"LZIP\x01")), vec!["lzip"]);
    assert!(detection
        .known_types()
        .iter()
        .any(|m| m.to_string() == "application/x-lzip"));
}

struct BrokenReader;

impl ArchiveReader for BrokenReader {
    fn member_paths(&self, _buffer: &[u8]) -> Result<HashSet<String>, ArchiveError> {
        Err(ArchiveError::new("corrupt central directory"))
    }
}

#[test]
fn test_unreadable_archive_falls_back_to_magic_tier() {
    let buffer = zip_with(&["[Content_Types].xml", "word/document.xml"]);
    let detection = MimeDetection::new().with_archive_reader(Arc::new(BrokenReader));
    let found = detection.detect(&buffer);
    assert_eq!(
        ids(&found),
        vec!["zip", "word_openxml", "excel_openxml", "powerpoint"]
    );
}

#[test]
fn test_sequential_and_parallel_engines_agree() {
    let parallel = MimeDetection::new();
    let sequential = MimeDetection::new().with_parallel(ParallelConfig::sequential());
    let bounded = MimeDetection::new().with_parallel(ParallelConfig {
        enabled: true,
        max_concurrency: Some(2),
    });

    let samples: Vec<Vec<u8>> = vec![
        vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a],
        b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec(),
        b"<!DOCTYPE html><html></html>".to_vec(),
        b"fn main() {}".to_vec(),
        zip_with(&["[Content_Types].xml", "xl/workbook.xml"]),
    ];

    for sample in &samples {
        let expected = ids(&sequential.detect(sample))
            .into_iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        assert_eq!(ids(&parallel.detect(sample)), expected);
        assert_eq!(ids(&bounded.detect(sample)), expected);
    }
}
