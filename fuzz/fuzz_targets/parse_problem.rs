#![no_main]

use libfuzzer_sys::fuzz_target;

use graph_search::DuplicatePolicy;
use graph_search::SearchEngine;
use graph_search::Strategy;
use graph_search::problem::Problem;

fuzz_target!(|data: &str| {
    let Ok(problem) = Problem::<i64>::try_from(data) else {
        return;
    };
    for strategy in Strategy::ALL {
        let engine =
            SearchEngine::new(strategy, DuplicatePolicy::GraphSearch).with_expansion_limit(10_000);
        if let Ok(result) = problem.solve(&engine) {
            if let Some(path) = result.path() {
                assert!(problem.graph().valid_path(path));
            }
        }
    }
});
