use criterion::{black_box, criterion_group, criterion_main, Criterion};
use strie::{BitVector, Patricia};

fn sorted_keys(n: usize) -> Vec<Vec<u8>> {
    // Dense numeric keys share long prefixes, the worst case for a plain
    // trie and the best case for tail compression.
    (0..n)
        .map(|i| format!("{i:08}").into_bytes())
        .collect()
}

fn bench_bitvector(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitvector");
    let mut bv = BitVector::new();
    for i in 0..64_000 {
        bv.add(i % 2 == 0); // 50% density
    }
    bv.build();

    group.bench_function("rank", |b| {
        b.iter(|| {
            for i in 0..64_000 {
                black_box(bv.rank(i));
            }
        })
    });

    group.bench_function("select", |b| {
        b.iter(|| {
            for k in 0..32_000 {
                black_box(bv.select(k));
            }
        })
    });
    group.finish();
}

fn bench_patricia(c: &mut Criterion) {
    let mut group = c.benchmark_group("patricia");
    let keys = sorted_keys(100_000);

    group.bench_function("build_100k", |b| {
        b.iter(|| {
            let mut index = Patricia::new();
            for key in &keys {
                index.add(key).unwrap();
            }
            index.build();
            black_box(index.n_nodes());
        })
    });

    let mut index = Patricia::new();
    for key in &keys {
        index.add(key).unwrap();
    }
    index.build();

    group.bench_function("lookup_100k", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(index.lookup(key));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_bitvector, bench_patricia);
criterion_main!(benches);
