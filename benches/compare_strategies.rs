use std::time::Duration;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use hrsw::Stopwatch;
use human_duration::human_duration;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use graph_search::DuplicatePolicy;
use graph_search::HeuristicTable;
use graph_search::SearchEngine;
use graph_search::StateGraph;
use graph_search::Strategy;

/// Maximum time willing to wait for a single benchmark instance.
/// Experiments are carried out at least 5s and at least 100 times, so running a
/// 1s instance takes 1m40s.
const MAX_INSTANCE_TIME: Duration = Duration::from_secs(1);

const SIZES: [(u32, usize); 3] = [(100, 400), (1_000, 5_000), (10_000, 60_000)];

fn solve(
    engine: &SearchEngine,
    graph: &StateGraph<u32, u32>,
    h: &HeuristicTable<u32, u32>,
    target: u32,
) -> usize {
    match engine.run(graph, Some(h), 0, target) {
        Ok(result) => result.expanded_order().len(),
        Err(e) => {
            log::warn!("{e}");
            0
        }
    }
}

fn compare_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("Random graph search");

    for (num_states, num_edges) in SIZES {
        for seed in 0..3 {
            let instance_name = format!("{num_states}x{num_edges}:{seed}");
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let graph = StateGraph::random(&mut rng, num_states, num_edges, 10);
            let h = HeuristicTable::zero(&graph);
            let target = num_states - 1;

            for strategy in Strategy::ALL {
                let engine = SearchEngine::new(strategy, DuplicatePolicy::GraphSearch);

                let mut stopwatch = Stopwatch::new_started();
                let expanded = solve(&engine, &graph, &h, target);
                stopwatch.stop();
                let elapsed = stopwatch.elapsed();
                println!("{strategy} on {instance_name}: {expanded} expansions");
                if elapsed > MAX_INSTANCE_TIME {
                    log::warn!(
                        "Skipping {instance_name} as it takes too long with {strategy} ({})",
                        human_duration(&elapsed)
                    );
                    continue;
                }

                group.bench_with_input(
                    BenchmarkId::new(strategy.to_string(), &instance_name),
                    &graph,
                    |b, g| b.iter(|| solve(&engine, g, &h, target)),
                );
            }
        }
    }
    group.finish();
}

criterion_group!(benches, compare_strategies);
criterion_main!(benches);
