//! Search problems and their text format.
//!
//! ```text
//! # comment
//! state X          # isolated state
//! edge S A 3       # S -> A with cost 3
//! h S 7            # estimate for S
//! start S
//! target G
//! ```
use std::str::FromStr;
use std::str::SplitWhitespace;

use indoc::indoc;
use itertools::Itertools;
use thiserror::Error;

use crate::cost::Cost;
use crate::engine::SearchEngine;
use crate::error::SearchError;
use crate::heuristic::HeuristicTable;
use crate::result::SearchResult;
use crate::space::StateGraph;

/// The problem most tests and the CLI default to.
pub const CANONICAL_PROBLEM: &str = indoc! {"
    # A small graph with a consistent heuristic.
    edge S A 3
    edge S B 1
    edge A B 2
    edge A C 2
    edge B C 3
    edge C D 4
    edge C G 4
    edge D G 1

    h S 7
    h A 5
    h B 7
    h C 4
    h D 1
    h G 0

    start S
    target G
"};

/// A graph, optional heuristics, a start and a target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem<C>
where
    C: Cost,
{
    graph: StateGraph<String, C>,
    heuristics: Option<HeuristicTable<String, C>>,
    start: String,
    target: String,
}

impl<C> Problem<C>
where
    C: Cost,
{
    #[must_use]
    pub fn new(
        graph: StateGraph<String, C>,
        heuristics: Option<HeuristicTable<String, C>>,
        start: String,
        target: String,
    ) -> Self {
        Self {
            graph,
            heuristics,
            start,
            target,
        }
    }

    #[inline(always)]
    pub fn graph(&self) -> &StateGraph<String, C> {
        &self.graph
    }

    #[inline(always)]
    pub fn heuristics(&self) -> Option<&HeuristicTable<String, C>> {
        self.heuristics.as_ref()
    }

    #[inline(always)]
    pub fn start(&self) -> &str {
        &self.start
    }

    #[inline(always)]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Writes every state with its estimate and outgoing edges, in graph
    /// order.
    pub fn write_states<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        for s in self.graph.states() {
            let h = match self.heuristics().and_then(|t| t.get(s)) {
                Some(h) => h.to_string(),
                None => "-".to_string(),
            };
            let edges = self.graph.neighbours(s);
            if edges.is_empty() {
                writeln!(out, "{s}  h={h}  (terminal)")?;
            } else {
                let edges = edges.iter().map(|(to, c)| format!("{to} ({c})")).join(", ");
                writeln!(out, "{s}  h={h}  -> {edges}")?;
            }
        }
        Ok(())
    }

    pub fn solve(&self, engine: &SearchEngine) -> Result<SearchResult<String, C>, SearchError> {
        engine.run(
            &self.graph,
            self.heuristics(),
            self.start.clone(),
            self.target.clone(),
        )
    }
}

impl<C> Problem<C>
where
    C: Cost + From<u8>,
{
    /// The problem described by [`CANONICAL_PROBLEM`].
    pub fn canonical() -> Self {
        let edges = [
            ("S", "A", 3),
            ("S", "B", 1),
            ("A", "B", 2),
            ("A", "C", 2),
            ("B", "C", 3),
            ("C", "D", 4),
            ("C", "G", 4),
            ("D", "G", 1),
        ];
        let h = [("S", 7), ("A", 5), ("B", 7), ("C", 4), ("D", 1), ("G", 0)];

        Self::new(
            edges
                .into_iter()
                .map(|(from, to, c)| (from.to_string(), to.to_string(), C::from(c)))
                .collect(),
            Some(
                h.into_iter()
                    .map(|(s, v)| (s.to_string(), C::from(v)))
                    .collect(),
            ),
            "S".to_string(),
            "G".to_string(),
        )
    }
}

impl<C> std::fmt::Display for Problem<C>
where
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Problem({} -> {}, {} states, {} edges",
            self.start,
            self.target,
            self.graph.len(),
            self.graph.num_edges()
        )?;
        match &self.heuristics {
            Some(h) => write!(f, ", {} estimates)", h.len()),
            None => write!(f, ")"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProblemParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Unknown directive '{directive}' at line {line}")]
    UnknownDirective { line: usize, directive: String },
    #[error("Missing {what} for '{directive}' at line {line}")]
    MissingArgument {
        line: usize,
        directive: &'static str,
        what: &'static str,
    },
    #[error("Unexpected '{value}' after '{directive}' at line {line}")]
    TrailingArgument {
        line: usize,
        directive: &'static str,
        value: String,
    },
    #[error("Invalid cost '{value}' at line {line}")]
    InvalidCost { line: usize, value: String },
    #[error("No start state")]
    MissingStart,
    #[error("No target state")]
    MissingTarget,
    #[error("Second start state at line {line}")]
    DuplicateStart { line: usize },
    #[error("Second target state at line {line}")]
    DuplicateTarget { line: usize },
    #[error("I/O error when loading '{p}': {e}")]
    IOError {
        p: std::path::PathBuf,
        e: std::io::Error,
    },
}

/// The arguments of a single directive.
struct Arguments<'a> {
    line: usize,
    directive: &'static str,
    args: SplitWhitespace<'a>,
}

impl<'a> Arguments<'a> {
    fn next(&mut self, what: &'static str) -> Result<&'a str, ProblemParseError> {
        self.args
            .next()
            .ok_or(ProblemParseError::MissingArgument {
                line: self.line,
                directive: self.directive,
                what,
            })
    }

    fn cost<C: FromStr>(&mut self) -> Result<C, ProblemParseError> {
        let value = self.next("cost")?;
        value.parse().map_err(|_| ProblemParseError::InvalidCost {
            line: self.line,
            value: value.to_string(),
        })
    }

    fn end(mut self) -> Result<(), ProblemParseError> {
        match self.args.next() {
            None => Ok(()),
            Some(value) => Err(ProblemParseError::TrailingArgument {
                line: self.line,
                directive: self.directive,
                value: value.to_string(),
            }),
        }
    }
}

impl<C> std::convert::TryFrom<&str> for Problem<C>
where
    C: Cost + FromStr,
{
    type Error = ProblemParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut graph = StateGraph::<String, C>::new();
        let mut heuristics: Option<HeuristicTable<String, C>> = None;
        let mut start: Option<String> = None;
        let mut target: Option<String> = None;
        let mut directives = 0;

        for (i, raw) in s.lines().enumerate() {
            let line = i + 1;
            let content = raw.split('#').next().unwrap_or_default();
            let mut words = content.split_whitespace();
            let Some(word) = words.next() else {
                continue;
            };
            directives += 1;

            let directive = match word {
                "state" => "state",
                "edge" => "edge",
                "h" => "h",
                "start" => "start",
                "target" => "target",
                _ => {
                    return Err(ProblemParseError::UnknownDirective {
                        line,
                        directive: word.to_string(),
                    });
                }
            };
            let mut args = Arguments {
                line,
                directive,
                args: words,
            };

            match directive {
                "state" => {
                    let s = args.next("state")?;
                    args.end()?;
                    graph.add_state(s.to_string());
                }
                "edge" => {
                    let from = args.next("source state")?;
                    let to = args.next("destination state")?;
                    let c = args.cost()?;
                    args.end()?;
                    graph.add_edge(from.to_string(), to.to_string(), c);
                }
                "h" => {
                    let s = args.next("state")?;
                    let h = args.cost()?;
                    args.end()?;
                    heuristics.get_or_insert_with(HeuristicTable::new).insert(s.to_string(), h);
                }
                _ => {
                    let s = args.next("state")?;
                    args.end()?;
                    graph.add_state(s.to_string());
                    let (slot, duplicate) = if directive == "start" {
                        (&mut start, ProblemParseError::DuplicateStart { line })
                    } else {
                        (&mut target, ProblemParseError::DuplicateTarget { line })
                    };
                    if slot.is_some() {
                        return Err(duplicate);
                    }
                    *slot = Some(s.to_string());
                }
            }
        }

        if directives == 0 {
            return Err(ProblemParseError::EmptyInput);
        }
        let start = start.ok_or(ProblemParseError::MissingStart)?;
        let target = target.ok_or(ProblemParseError::MissingTarget)?;
        log::debug!(
            "Parsed {} states and {} edges",
            graph.len(),
            graph.num_edges()
        );

        Ok(Self::new(graph, heuristics, start, target))
    }
}

impl<C> std::convert::TryFrom<&std::path::Path> for Problem<C>
where
    C: Cost + FromStr,
{
    type Error = ProblemParseError;

    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        let s = std::fs::read_to_string(p).map_err(|e| ProblemParseError::IOError {
            p: p.to_path_buf(),
            e,
        })?;
        Self::try_from(s.as_str())
    }
}
