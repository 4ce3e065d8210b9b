use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::Utc;
use savemyspot_spots::{Coordinates, Spot, SpotCollection};

fn collection_of(size: usize) -> SpotCollection {
    let mut collection = SpotCollection::new();
    for i in 0..size {
        let coordinates = Coordinates::new(
            (i as f64 * 0.001) % 90.0,
            (i as f64 * -0.002) % 180.0,
        )
        .unwrap();
        let spot = Spot::create("", coordinates, collection.len(), Utc::now());
        collection = collection.with_prepended(spot).unwrap();
    }
    collection
}

/// Full-list encode/decode, which every save and load pays.
fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("spot_codec");

    for size in [10usize, 100, 1_000] {
        let collection = collection_of(size);
        let encoded = collection.to_json().unwrap();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("encode", size), &collection, |b, c| {
            b.iter(|| black_box(c.to_json().unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("decode", size), &encoded, |b, raw| {
            b.iter(|| black_box(SpotCollection::from_json(raw).unwrap()));
        });
    }

    group.finish();
}

/// Prepend and filter both copy the list; make sure that stays cheap.
fn bench_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("spot_mutations");
    let collection = collection_of(1_000);
    let middle = collection.as_slice()[500].id_typed().clone();

    group.bench_function("prepend_1000", |b| {
        b.iter(|| {
            let spot = Spot::from_parts(
                "bench-new".parse().unwrap(),
                "Bench",
                Coordinates::new(1.0, 1.0).unwrap(),
                "2024-05-01T12:00:00.000Z",
            );
            black_box(collection.with_prepended(spot).unwrap())
        });
    });

    group.bench_function("remove_1000", |b| {
        b.iter(|| black_box(collection.without(&middle)));
    });

    group.finish();
}

criterion_group!(benches, bench_codec, bench_mutations);
criterion_main!(benches);
