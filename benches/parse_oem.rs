use camino::Utf8Path;
use cic_parser::{parse, parse_file_as, Oem};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const SAMPLE: &str = "tests/data/OEM_test.txt";

/// Build an OEM file with `rows` one-minute records.
fn synthetic_oem(rows: usize) -> String {
    let mut content = String::from(
        "CIC_OEM_VERS = 1.0\n\
         CREATION_DATE = 2009-12-08T09:00:00.000\n\
         ORIGINATOR = CNES\n\
         META_START\n\
         OBJECT_NAME = CubeSat\n\
         OBJECT_ID = CubeSat\n\
         CENTER_NAME = EARTH\n\
         REF_FRAME = EME2000\n\
         TIME_SYSTEM = UTC\n\
         META_END\n",
    );
    for row in 0..rows {
        let seconds = (row % 1440) as f64 * 60.0;
        let day = 55173 + row / 1440;
        content.push_str(&format!(
            "{day} {seconds:.3} -2495.775 7055.077 -4.286 -7.573 -2.631 0.120\n"
        ));
    }
    content
}

fn bench_parse_sample_file(c: &mut Criterion) {
    let path = Utf8Path::new(SAMPLE);
    c.bench_function("parse_sample_file", |b| {
        b.iter(|| {
            let _ = parse_file_as::<Oem>(black_box(path));
        })
    });
}

fn bench_parse_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("oem_rows");

    for rows in [10, 100, 1_000, 10_000] {
        let content = synthetic_oem(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &content, |b, content| {
            b.iter(|| {
                let _ = parse(black_box(content.as_bytes()));
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse_sample_file, bench_parse_rows);
criterion_main!(benches);
