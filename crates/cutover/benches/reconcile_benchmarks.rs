//! Reconciliation performance benchmarks.
//!
//! Measures loading and the validation pipeline across extract sizes.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use cutover::{CountryAllowSet, FamilyConfig, FamilyInputs, Parser, Reconciler, Table};

const COUNTRIES: &[&str] = &["US", "GB", "DE", "FR", "JP", "BR", "AU", "CA"];

/// Generate a synthetic extract with Country, code and a few payload columns.
///
/// Every `stride`-th code is skipped so validation rejects some rows, and
/// every 50th row repeats the previous key.
fn generate_extract(rows: usize, stride: usize) -> String {
    let mut data = String::from("Country,Attribute Value Code,Attribute Value FP,Currency,Changed By\n");
    for row in 0..rows {
        if stride > 0 && row % stride == 0 {
            continue;
        }
        let id = if row % 50 == 49 { row - 1 } else { row };
        data.push_str(&format!(
            "{},CODE_{:06},{}.5,USD,user_{}\n",
            COUNTRIES[id % COUNTRIES.len()],
            id,
            id % 1000,
            id % 7
        ));
    }
    data
}

/// Replace the code of every 10th record with an online-service code.
fn with_online_codes(extract: &str) -> String {
    let online = cutover::config::ONLINE_CODES;
    extract
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || i % 10 != 0 {
                return format!("{}\n", line);
            }
            let mut fields: Vec<&str> = line.split(',').collect();
            fields[1] = online[(i / 10) % online.len()];
            format!("{}\n", fields.join(","))
        })
        .collect()
}

fn load(name: &str, data: &str) -> Table {
    Parser::new().parse_bytes(name, data.as_bytes()).unwrap()
}

/// Benchmark loading extracts of various sizes.
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_extract");

    for rows in [1_000, 10_000].iter() {
        let data = generate_extract(*rows, 0);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| black_box(load("I53 RF", data)))
        });
    }

    group.finish();
}

/// Benchmark the single-validator pipeline (family 53).
fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_i53");
    let config = FamilyConfig::default();
    let allow = CountryAllowSet::new(COUNTRIES[..4].iter().copied()).unwrap();

    for rows in [1_000, 10_000, 50_000].iter() {
        let inputs = FamilyInputs::I53 {
            rf: load("I53 RF", &generate_extract(*rows, 0)),
            hos35: load("I35 HOS", &generate_extract(*rows, 7)),
        };

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &inputs, |b, inputs| {
            let reconciler = Reconciler::new(&config);
            b.iter(|| black_box(reconciler.run(inputs, &allow).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark the transform-and-validate pipeline (family 52).
fn bench_transform_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_validate_i52");
    let config = FamilyConfig::default();
    let allow = CountryAllowSet::new(COUNTRIES.iter().copied()).unwrap();

    let rows = 10_000;
    let online = with_online_codes(&generate_extract(rows, 0));
    let inputs = FamilyInputs::I52 {
        rf52: load("I52 RF", &generate_extract(rows, 0)),
        rf51: load("I51 RF", &online),
        hos36: load("I36 HOS", &generate_extract(rows, 3)),
    };

    group.throughput(Throughput::Elements(rows as u64));
    group.bench_function("rows_10000", |b| {
        let reconciler = Reconciler::new(&config);
        b.iter(|| black_box(reconciler.run(&inputs, &allow).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_load,
    bench_validate,
    bench_transform_validate,
);
criterion_main!(benches);
