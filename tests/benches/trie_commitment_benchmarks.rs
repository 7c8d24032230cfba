//! # Trie Commitment Benchmarks
//!
//! | Path | Expectation |
//! |------|-------------|
//! | Pruning insert + accept | O(1) per block regardless of chain length |
//! | Pruning with forks | Rejects cost one dereference each |
//! | Archive insert | One commit per block |

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use qc_04_trie_commitment::{
    InMemoryTrieStore, TrieCommitConfig, TrieCommitmentApi, TrieCommitmentManager,
};
use rand::Rng;
use shared_types::{BlockHeader, Hash, SealedBlock, ZERO_HASH};
use std::sync::Arc;
use std::time::Duration;

const CHAIN_LENGTH: u64 = 10_000;

/// Linear chain with random state roots.
fn generate_chain(length: u64) -> Vec<SealedBlock> {
    let mut rng = rand::thread_rng();
    let mut parent_hash = ZERO_HASH;
    let mut parent_root = ZERO_HASH;
    (1..=length)
        .map(|height| {
            let state_root: Hash = rng.gen();
            let block = SealedBlock::seal(BlockHeader {
                height,
                parent_hash,
                state_root,
                parent_state_root: parent_root,
                timestamp: height,
            });
            parent_hash = block.hash();
            parent_root = state_root;
            block
        })
        .collect()
}

fn manager(config: TrieCommitConfig) -> TrieCommitmentManager<InMemoryTrieStore> {
    TrieCommitmentManager::new(config, Arc::new(InMemoryTrieStore::new()))
        .expect("valid benchmark config")
}

fn bench_pruning_accept_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-04-pruning-accept");
    group.measurement_time(Duration::from_secs(10));
    group.throughput(Throughput::Elements(CHAIN_LENGTH));

    let chain = generate_chain(CHAIN_LENGTH);
    for tip_buffer_size in [32usize, 128, 1024] {
        let config = TrieCommitConfig {
            pruning_enabled: true,
            tip_buffer_size,
            commit_interval: 4096,
        };
        group.bench_with_input(
            BenchmarkId::new("insert_accept", tip_buffer_size),
            &config,
            |b, config| {
                b.iter_batched(
                    || manager(config.clone()),
                    |mut m| {
                        for block in &chain {
                            m.insert_trie(block).expect("insert");
                            m.accept_trie(block).expect("accept");
                        }
                        black_box(m.accepted_count())
                    },
                    BatchSize::LargeInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_pruning_with_rejects(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-04-pruning-rejects");
    group.measurement_time(Duration::from_secs(10));

    // Odd heights rejected, even heights accepted
    let chain = generate_chain(CHAIN_LENGTH);
    group.throughput(Throughput::Elements(CHAIN_LENGTH));
    group.bench_function("half_rejected", |b| {
        b.iter_batched(
            || manager(TrieCommitConfig::default()),
            |mut m| {
                for block in &chain {
                    m.insert_trie(block).expect("insert");
                    if block.height() % 2 == 0 {
                        m.accept_trie(block).expect("accept");
                    } else {
                        m.reject_trie(block).expect("reject");
                    }
                }
                black_box(m.pending_count())
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

fn bench_archive_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-04-archive");
    group.measurement_time(Duration::from_secs(10));

    let chain = generate_chain(1_000);
    group.throughput(Throughput::Elements(chain.len() as u64));
    group.bench_function("insert_accept", |b| {
        b.iter_batched(
            || manager(TrieCommitConfig::archive()),
            |mut m| {
                for block in &chain {
                    m.insert_trie(block).expect("insert");
                    m.accept_trie(block).expect("accept");
                }
                black_box(m.accepted_count())
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_pruning_accept_path,
    bench_pruning_with_rejects,
    bench_archive_insert,
);

criterion_main!(benches);
