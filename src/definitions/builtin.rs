//! Built-in signature definitions.
//!
//! The table is compiled once and handed to each engine by value, so engines
//! stay plain values built from built-ins plus caller extensions.
//!
//! Signatures that live at a non-zero offset (tar's `ustar` at byte 257) cannot
//! be expressed; such types are listed without facets and never detected.

use super::{literal, ByteSignature, MagicByte, SignatureDefinition};
use once_cell::sync::Lazy;
use regex::Regex;

/// Number of leading bytes decoded as text for pattern facets.
pub const BUFFER_CHECK_SIZE: usize = 128;

const ZIP_LOCAL_FILE: &[u8] = &[0x50, 0x4b, 0x03, 0x04];
const ZIP_END_OF_CENTRAL_DIR: &[u8] = &[0x50, 0x4b, 0x05, 0x06];
const ZIP_DATA_DESCRIPTOR: &[u8] = &[0x50, 0x4b, 0x07, 0x08];

/// OLE2 compound file header shared by legacy Office formats.
const COMPOUND_FILE: &[u8] = &[0xd0, 0xcf, 0x11, 0xe0];

const OPENXML_CONTENT_TYPES: &str = "[Content_Types].xml";

static BUILTINS: Lazy<Vec<SignatureDefinition>> = Lazy::new(build_table);

/// The built-in definitions in registration order.
pub fn builtin_definitions() -> Vec<SignatureDefinition> {
    BUILTINS.clone()
}

fn def(id: &str, mime_type: &str, subtype: &str) -> SignatureDefinition {
    SignatureDefinition::new(mime_type, subtype).with_id(id)
}

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("built-in pattern compiles")
}

fn zip_magic() -> ByteSignature {
    ByteSignature::Alternatives(vec![
        literal(ZIP_LOCAL_FILE),
        literal(ZIP_END_OF_CENTRAL_DIR),
        literal(ZIP_DATA_DESCRIPTOR),
    ])
}

/// `RIFF????<form>`: RIFF container with any chunk size.
fn riff(form: &[u8; 4]) -> Vec<MagicByte> {
    let mut sequence = literal(b"RIFF");
    sequence.extend([MagicByte::Any; 4]);
    sequence.extend(literal(form));
    sequence
}

fn build_table() -> Vec<SignatureDefinition> {
    let mut table = Vec::with_capacity(64);
    table.extend(images());
    table.extend(video());
    table.extend(audio());
    table.extend(compressed());
    table.extend(office());
    table.extend(code());
    table.extend(text());
    table
}

fn images() -> Vec<SignatureDefinition> {
    vec![
        def("jpeg", "image", "jpeg").with_magic(ByteSignature::bytes(&[0xff, 0xd8, 0xff])),
        def("png", "image", "png").with_magic(ByteSignature::bytes(&[0x89, 0x50, 0x4e, 0x47])),
        def("gif87a", "image", "gif").with_magic(ByteSignature::bytes(b"GIF87a")),
        def("gif89a", "image", "gif").with_magic(ByteSignature::bytes(b"GIF89a")),
        // little endian
        def("tif", "image", "tiff").with_magic(ByteSignature::bytes(&[0x49, 0x49, 0x2a, 0x00])),
        // big endian
        def("tif", "image", "tiff").with_magic(ByteSignature::bytes(&[0x4d, 0x4d, 0x00, 0x2a])),
        def("bitmap", "image", "bmp").with_magic(ByteSignature::bytes(&[0x42, 0x4d])),
        def("icon", "image", "icon").with_magic(ByteSignature::bytes(&[0x00, 0x00, 0x01, 0x00])),
        def("webp", "image", "webp").with_magic(ByteSignature::Alternatives(vec![
            literal(b"RIFFWEBP"),
            riff(b"WEBP"),
        ])),
        def("svg", "image", "svg").with_pattern(pattern(r"(?i)^\s*<\s*svg[^>]*>")),
    ]
}

fn video() -> Vec<SignatureDefinition> {
    vec![
        def("mp4", "video", "mp4").with_magic(ByteSignature::bytes(&[
            0x00, 0x00, 0x00, 0x1c, 0x66, 0x74, 0x79, 0x70,
        ])),
        def("quicktime", "video", "quicktime").with_magic(ByteSignature::bytes(&[
            0x00, 0x00, 0x00, 0x14, 0x66, 0x74, 0x79, 0x70,
        ])),
        def("avi", "video", "avi").with_magic(ByteSignature::bytes(b"RIFFAVI ")),
        def("mkv", "video", "mkv").with_magic(ByteSignature::bytes(&[0x1a, 0x45, 0xdf, 0xa3])),
        // EBML header, same as mkv
        def("webm", "video", "webm").with_magic(ByteSignature::bytes(&[0x1a, 0x45, 0xdf, 0xa3])),
        def("flv", "video", "flv").with_magic(ByteSignature::bytes(&[0x46, 0x4c, 0x56, 0x01])),
    ]
}

fn audio() -> Vec<SignatureDefinition> {
    vec![
        def("mp3", "audio", "mpeg").with_magic(ByteSignature::Alternatives(vec![
            literal(b"ID3"),
            literal(&[0xff, 0xfb]),
            literal(&[0xff, 0xf3]),
            literal(&[0xff, 0xf2]),
        ])),
        def("ogg", "audio", "ogg").with_magic(ByteSignature::bytes(b"OggS")),
        def("wav", "audio", "wav").with_magic(ByteSignature::Single(riff(b"WAVE"))),
    ]
}

fn compressed() -> Vec<SignatureDefinition> {
    vec![
        def("pdf", "application", "pdf").with_magic(ByteSignature::bytes(b"%PDF")),
        def("zip", "application", "zip").with_magic(zip_magic()),
        def("rar", "application", "rar").with_magic(ByteSignature::bytes(b"Rar!")),
        def("gzip", "application", "gzip").with_magic(ByteSignature::bytes(&[0x1f, 0x8b])),
        def("7z", "application", "7z").with_magic(ByteSignature::bytes(&[0x37, 0x7a, 0xbc, 0xaf])),
        // "ustar" lives at offset 257
        def("tar", "application", "tar"),
    ]
}

fn office() -> Vec<SignatureDefinition> {
    vec![
        def("word", "application", "word").with_magic(ByteSignature::bytes(COMPOUND_FILE)),
        def("excel", "application", "excel").with_magic(ByteSignature::bytes(COMPOUND_FILE)),
        def("powerpoint", "application", "powerpoint")
            .with_magic(ByteSignature::bytes(COMPOUND_FILE)),
        def("word_openxml", "application", "word_openxml")
            .with_magic(zip_magic())
            .with_members([OPENXML_CONTENT_TYPES, "word/document.xml"]),
        def("excel_openxml", "application", "excel_openxml")
            .with_magic(zip_magic())
            .with_members([OPENXML_CONTENT_TYPES, "xl/workbook.xml"]),
        def("powerpoint", "application", "powerpoint_openxml")
            .with_magic(zip_magic())
            .with_members([OPENXML_CONTENT_TYPES, "ppt/presentation.xml"]),
    ]
}

fn code() -> Vec<SignatureDefinition> {
    vec![
        def("shell", "application", "shell").with_pattern(pattern(r"^\s*#!")),
        def("json", "application", "json").with_pattern(pattern(r#"^\s*\{\s*"name""#)),
        def("xml", "application", "xml").with_pattern(pattern(r"(?i)^\s*(<?xml)")),
        def("javascript", "application", "javascript")
            .with_pattern(pattern(r"(?i)^\s*(import|const|let|var|function)")),
        def("php", "application", "php").with_pattern(pattern(r"(?i)^\s*<\?php")),
        def("yaml", "application", "yaml").with_pattern(pattern(r"(?i)^\s*---\s*$")),
        def("sql", "application", "sql").with_pattern(pattern(
            r"(?i)^\s*(SELECT|FROM|INSERT\s+INTO|UPDATE|DELETE|CREATE\s+TABLE)",
        )),
        def("powershell", "application", "powershell").with_pattern(pattern(r"^\s*%!")),
        def("batch", "application", "batch").with_pattern(pattern(r"^\s*#!")),
        def("pem", "application", "pem").with_pattern(pattern(r"^\s*(BEGIN|END)")),
        def("latex", "application", "latex")
            .with_pattern(pattern(r"(?i)^\s*(\\documentclass|\\begin|\\end)")),
        def("rtf", "application", "rtf")
            .with_magic(ByteSignature::bytes(br"{\rtf"))
            .with_pattern(pattern(r"(?i)^\{\\rtf")),
        def("html", "text", "html").with_pattern(pattern(r"(?i)^\s*(<!DOCTYPE\s+html|<html)")),
        def("ruby", "text", "ruby").with_pattern(pattern(r"(?i)^\s*(class|module|require)")),
        def("python", "text", "python").with_pattern(pattern(r"(?i)^\s*(def|class|import)")),
        def("java", "text", "java").with_pattern(pattern(r"(?i)^\s*(package|import)")),
        def("css", "text", "css"),
        def("csv", "text", "csv").with_pattern(pattern(r"(?i)^\s*[\w\s]+,[\w\s]+")),
        def("go", "text", "go")
            .with_pattern(pattern(r"(?i)^\s*(package|import|func|var|const)")),
        def("groovy", "text", "groovy")
            .with_pattern(pattern(r"(?i)^\s*(class|def|if|else|for|while)")),
        def("kotlin", "text", "kotlin")
            .with_pattern(pattern(r"(?i)^\s*(fun|val|var|class|import)")),
        def("rust", "text", "rust").with_pattern(pattern(r"(?i)^\s*(fn|struct|enum|impl|use)")),
        def("typescript", "text", "typescript").with_pattern(pattern(
            r"(?i)^\s*(interface|type|function|const|let|var|import|export)",
        )),
        def("swift", "text", "swift").with_pattern(pattern(r"^\s*(@|//)")),
        def("perl", "text", "perl").with_pattern(pattern(r"(?i)^\s*(use|package|my)")),
        def("c", "text", "c").with_pattern(pattern(r"^\s*(/\*|\*/|\*|#)")),
        def("cpp", "text", "cpp").with_pattern(pattern(r"^\s*(//|#)")),
        def("csharp", "text", "csharp")
            .with_pattern(pattern(r"(?i)^\s*(public|private|class|import)")),
        def("visualbasic", "text", "visualbasic")
            .with_pattern(pattern(r"(?i)^\s*(using|namespace|public)")),
        def("configuration", "text", "plain").with_pattern(pattern(r"^\s*%\w+\s*=")),
        def("ini", "text", "plain").with_pattern(pattern(r"^\s*;\s*module\s*=")),
        def("c-header", "text", "c_header")
            .with_pattern(pattern(r"(?i)^\s*#\s*(include|define)")),
        def("r", "text", "r")
            .with_pattern(pattern(r"(?i)^\s*(library|function|if|else|for|while)")),
    ]
}

fn text() -> Vec<SignatureDefinition> {
    vec![
        def("text", "text", "plain").with_pattern(pattern(r"^[\p{L}\p{N}\p{P}\p{S}\p{Z}\r\n]*$")),
        def("markdown", "text", "markdown").with_pattern(pattern(
            r"(?i)^\s*(#{1,6}\s+\w+|\*\s+\w+|-\s+\w+|\d+\.\s+\w+|\[.+\]\(http.+)",
        )),
    ]
}
