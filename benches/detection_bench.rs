//! Benchmarks for content detection comparing sequential vs parallel
//! evaluation of the built-in definitions.
//!
//! Inputs cover the three priority tiers: a magic-only match, an archive
//! that needs its member list read, and text that only patterns match.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mimesniff::{Mime, MimeDetection, ParallelConfig};
use std::hint::black_box;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

fn openxml_document() -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for entry in ["[Content_Types].xml", "_rels/.rels", "word/document.xml"] {
        writer.start_file(entry, options).unwrap();
        writer.write_all(&[b'x'; 512]).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn samples() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("jpeg", vec![0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, 0x4a, 0x46, 0x49, 0x46]),
        ("openxml", openxml_document()),
        (
            "source",
            b"use std::collections::HashMap;\n\nfn main() {\n    println!(\"hi\");\n}\n".to_vec(),
        ),
    ]
}

fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("detection");
    let parallel = MimeDetection::new();
    let sequential = MimeDetection::new().with_parallel(ParallelConfig::sequential());

    for (name, buffer) in samples() {
        group.throughput(Throughput::Bytes(buffer.len() as u64));
        group.bench_with_input(BenchmarkId::new("sequential", name), &buffer, |b, buf| {
            b.iter(|| sequential.detect(black_box(buf)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", name), &buffer, |b, buf| {
            b.iter(|| parallel.detect(black_box(buf)))
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("mime_parse", |b| {
        b.iter(|| Mime::parse(black_box("Text/HTML; Charset=\"UTF-8\"; q=0.9")))
    });
}

criterion_group!(benches, bench_detection, bench_parse);
criterion_main!(benches);
