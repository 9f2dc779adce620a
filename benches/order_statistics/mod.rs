use std::hint::black_box;

use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};
use weightavl::AvlTree;

use crate::Lfsr;

#[derive(Debug)]
struct BenchName {
    bench_name: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench_name), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("order_statistics");

    for n_values in [100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

/// Measure resolving the rank of every key in a tree of `n_values`, and
/// selecting every rank back to its key.
fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    // Generate the tree.
    let mut rand = Lfsr::default();
    let mut t = AvlTree::default();

    for _i in 0..n_values {
        t.insert(rand.next(), 42_usize);
    }

    let keys = t.keys().copied().collect::<Vec<_>>();

    g.throughput(Throughput::Elements(n_values as _));
    g.bench_function(
        BenchmarkId::from(BenchName {
            bench_name: "rank",
            n_values,
        }),
        |b| {
            b.iter(|| {
                for k in &keys {
                    black_box(t.rank(k).unwrap());
                }
            })
        },
    );

    g.throughput(Throughput::Elements(n_values as _));
    g.bench_function(
        BenchmarkId::from(BenchName {
            bench_name: "select",
            n_values,
        }),
        |b| {
            b.iter(|| {
                for i in 1..=n_values {
                    black_box(t.select(i).unwrap());
                }
            })
        },
    );
}
