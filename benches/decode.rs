use criterion::*;
use doctree::*;

record! {
    #[derive(Debug, PartialEq)]
    pub struct Package {
        name: String,
        version: String,
        downloads: u64,
        keywords: Vec<String>,
        license_file: Option<String>,
    }
}

fn package_doc() -> Document {
    let package = Package {
        name: "doctree".to_string(),
        version: "0.3.1".to_string(),
        downloads: 123_456,
        keywords: vec![
            "document".to_string(),
            "node".to_string(),
            "decode".to_string(),
        ],
        license_file: Some("LICENSE".to_string()),
    };
    Document::encode(&package).unwrap()
}

fn decode_benches(c: &mut Criterion) {
    let doc = package_doc();
    c.bench_function("decode record from document", |b| {
        b.iter(|| black_box(&doc).decode::<Package>())
    });

    let numbers = (0..256).collect::<Vec<i64>>();
    let doc = Document::encode(&numbers).unwrap();
    c.bench_function("decode sequence from document", |b| {
        b.iter(|| black_box(&doc).decode::<Vec<i64>>())
    });

    let package = package_doc();
    c.bench_function("encode record to document", |b| {
        b.iter(|| {
            let decoded: Package = package.decode().unwrap();
            Document::encode(black_box(&decoded))
        })
    });
}

criterion_group!(benches, decode_benches);
criterion_main!(benches);
