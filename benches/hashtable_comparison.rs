use core::hash::BuildHasher;
use core::hint::black_box;
use std::collections::HashMap as StdHashMap;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashMap as HashbrownMap;
use probing_table::Key;
use probing_table::ProbingTable;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;

#[derive(Clone, Default)]
struct SipHashBuilder;

impl BuildHasher for SipHashBuilder {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new()
    }
}

trait BenchKey: Key + Clone {
    fn new(key: u64) -> Self;
}

impl BenchKey for u64 {
    fn new(key: u64) -> Self {
        black_box(key)
    }
}

impl BenchKey for String {
    fn new(key: u64) -> Self {
        black_box(format!("key_{:016X}", key))
    }
}

const SIZES: &[usize] = &[(1 << 10), (1 << 12), (1 << 14), (1 << 16)];

fn random_keys<K: BenchKey>(count: usize) -> Vec<K> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| K::new(rng.try_next_u64().unwrap()))
        .collect()
}

fn bench_insert_random<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "insert_random_{}",
        core::any::type_name::<K>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("probing_table/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| {
                    let mut table = ProbingTable::new();
                    for (i, key) in keys.into_iter().enumerate() {
                        black_box(table.insert(key, i).unwrap());
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut map = HashbrownMap::with_hasher(SipHashBuilder);
                    for (i, key) in keys.into_iter().enumerate() {
                        black_box(map.insert(key, i));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("std/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut map = StdHashMap::new();
                    for (i, key) in keys.into_iter().enumerate() {
                        black_box(map.insert(key, i));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_hit_miss<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "find_hit_miss_{}",
        core::any::type_name::<K>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let present = random_keys::<K>(size);
        let missing = random_keys::<K>(size);

        let mut table = ProbingTable::new();
        let mut hashbrown = HashbrownMap::with_hasher(SipHashBuilder);
        for (i, key) in present.iter().cloned().enumerate() {
            table.insert(key.clone(), i).unwrap();
            hashbrown.insert(key, i);
        }

        let mut probes = present.clone();
        probes.extend(missing);
        probes.shuffle(&mut SmallRng::from_os_rng());

        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_function(format!("probing_table/{size}"), |b| {
            b.iter(|| {
                for key in &probes {
                    black_box(table.find(key).unwrap());
                }
            })
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for key in &probes {
                    black_box(hashbrown.get(key));
                }
            })
        });
    }

    group.finish();
}

fn bench_delete<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("delete_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys::<K>(size);
        let mut table = ProbingTable::new();
        let mut hashbrown = HashbrownMap::with_hasher(SipHashBuilder);
        for (i, key) in keys.iter().cloned().enumerate() {
            table.insert(key.clone(), i).unwrap();
            hashbrown.insert(key, i);
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("probing_table/{size}"), |b| {
            b.iter_batched(
                || table.clone(),
                |mut table| {
                    for key in &keys {
                        black_box(table.delete(key).unwrap());
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || hashbrown.clone(),
                |mut map| {
                    for key in &keys {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

#[derive(Clone, Copy)]
enum Operation {
    Insert,
    Delete,
    Find,
}

fn bench_mixed_zipf<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("mixed_zipf_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let mut rng = SmallRng::from_os_rng();
        let op_distr = Zipf::new(3.0, 1.0).unwrap();
        let key_distr = Zipf::new(size as f64 * 2.0 - 1.0, 1.0).unwrap();

        let operations = (0..size * 3)
            .map(|_| {
                let op_choice: f64 = rng.sample(op_distr);
                let key = K::new(rng.sample(key_distr) as u64);
                let op = if op_choice <= 1.0 {
                    Operation::Find
                } else if op_choice <= 2.0 {
                    Operation::Insert
                } else {
                    Operation::Delete
                };
                (op, key)
            })
            .collect::<Vec<_>>();

        group.throughput(Throughput::Elements(operations.len() as u64));
        group.bench_function(format!("probing_table/{size}"), |b| {
            b.iter(|| {
                let mut table = ProbingTable::new();
                for (op, key) in &operations {
                    match op {
                        Operation::Insert => {
                            black_box(table.insert(key.clone(), ()).unwrap());
                        }
                        Operation::Delete => {
                            black_box(table.delete(key).unwrap());
                        }
                        Operation::Find => {
                            black_box(table.find(key).unwrap());
                        }
                    }
                }
                black_box(table)
            })
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                let mut map = HashbrownMap::with_hasher(SipHashBuilder);
                for (op, key) in &operations {
                    match op {
                        Operation::Insert => {
                            black_box(map.insert(key.clone(), ()));
                        }
                        Operation::Delete => {
                            black_box(map.remove(key));
                        }
                        Operation::Find => {
                            black_box(map.get(key));
                        }
                    }
                }
                black_box(map)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_random::<u64>,
    bench_insert_random::<String>,
    bench_find_hit_miss::<u64>,
    bench_find_hit_miss::<String>,
    bench_delete::<u64>,
    bench_delete::<String>,
    bench_mixed_zipf::<u64>,
    bench_mixed_zipf::<String>,
);

criterion_main!(benches);
