use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;

use anstream::adapter::strip_str;
use anstream::eprintln;
use anstream::println;
use clap::Parser;
use clap::ValueEnum;
use hrsw::Stopwatch;
use human_duration::human_duration;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use graph_search::SearchEngine;
use graph_search::problem::Problem;
use graph_search::report::Report;
use graph_search::strategy::DuplicatePolicy;
use graph_search::strategy::Strategy;

#[cfg(feature = "mem_profile")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;
#[cfg(all(not(feature = "mem_profile"), not(target_env = "msvc")))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Signed so that negative costs can be reported instead of failing to parse.
type CliCost = i64;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Tree,
    Graph,
    Both,
}

impl Mode {
    fn policies(self) -> &'static [DuplicatePolicy] {
        match self {
            Mode::Tree => &[DuplicatePolicy::TreeSearch],
            Mode::Graph => &[DuplicatePolicy::GraphSearch],
            Mode::Both => &DuplicatePolicy::ALL,
        }
    }
}

/// Runs graph-search strategies over problem files
#[derive(Parser, Debug)]
#[clap(long_version = graph_search::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Problem files. Runs the built-in problem when empty.
    #[arg()]
    pub problems: Vec<PathBuf>,

    /// Strategies to run, all of them by default.
    #[arg(short, long, value_enum)]
    pub strategy: Vec<Strategy>,

    #[arg(short, long, value_enum, default_value_t = Mode::Both)]
    mode: Mode,

    /// Give up after expanding this many states.
    #[arg(long, env = "SEARCH_EXPANSION_LIMIT")]
    pub expansion_limit: Option<usize>,

    /// Org-mode log of every run.
    #[arg(short, long, env = "SEARCH_LOG")]
    pub output: Option<PathBuf>,

    /// Print search counters after each report.
    #[arg(long)]
    pub stats: bool,

    /// Print every state with its estimate and outgoing edges before searching.
    #[arg(long)]
    pub show_problem: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

fn load(args: &Args) -> Vec<(String, Problem<CliCost>)> {
    if args.problems.is_empty() {
        return vec![("canonical".to_string(), Problem::canonical())];
    }

    let mut problems = vec![];
    for p in &args.problems {
        match Problem::try_from(p.as_path()) {
            Ok(problem) => problems.push((p.display().to_string(), problem)),
            Err(e) => eprintln!("{} {e}", "Skipping:".red()),
        }
    }
    problems
}

fn main() -> std::io::Result<()> {
    #[cfg(feature = "mem_profile")]
    let _profiler = dhat::Profiler::new_heap();

    let args = Args::parse();
    args.color.write_global();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let strategies: &[Strategy] = if args.strategy.is_empty() {
        &Strategy::ALL
    } else {
        &args.strategy
    };

    let mut log = match &args.output {
        Some(path) => {
            println!("Logging to {:?}", path.yellow());
            Some(BufWriter::new(File::create(path)?))
        }
        None => None,
    };

    for (name, problem) in load(&args) {
        println!("{} {problem}", name.bold());
        if args.show_problem {
            problem.write_states(anstream::stdout().lock())?;
            println!();
        }
        if let Some(out) = &mut log {
            writeln!(out, "* {name}")?;
            writeln!(out, "#+begin_example")?;
            problem.write_states(&mut *out)?;
            writeln!(out, "#+end_example")?;
        }

        for &strategy in strategies {
            for &policy in args.mode.policies() {
                let mut engine = SearchEngine::new(strategy, policy);
                if let Some(limit) = args.expansion_limit {
                    engine = engine.with_expansion_limit(limit);
                }

                let mut stopwatch = Stopwatch::new_started();
                let outcome = problem.solve(&engine);
                stopwatch.stop();
                let elapsed = human_duration(&stopwatch.elapsed());

                match outcome {
                    Ok(result) => {
                        let report = Report::new(strategy, policy, problem.graph(), &result);
                        println!("{report}  Took {elapsed}");
                        if args.stats {
                            result.write_stats(anstream::stdout().lock())?;
                        }
                        if let Some(out) = &mut log {
                            writeln!(out, "** {strategy} ({policy})")?;
                            let report = report.to_string();
                            writeln!(out, "#+begin_example\n{}#+end_example", strip_str(&report))?;
                            result.write_stats(&mut *out)?;
                        }
                    }
                    Err(e) => {
                        eprintln!(
                            "{} ({})\n  {} {e}",
                            strategy.bold(),
                            policy,
                            "Error:".red()
                        );
                        if let Some(out) = &mut log {
                            writeln!(out, "** {strategy} ({policy})\nError: {e}")?;
                        }
                    }
                }
                println!();
            }
        }
    }

    if let Some(out) = &mut log {
        out.flush()?;
    }
    Ok(())
}
