//! Error types for astar-viz

use crate::grid::{Cell, Connectivity};
use crate::heuristic::Heuristic;
use thiserror::Error;

/// Which endpoint of a search an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Errors raised by the search engine and its parts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid {role} cell {cell}: {reason}")]
    InvalidEndpoint {
        role: Endpoint,
        cell: Cell,
        reason: &'static str,
    },

    /// Internal guard. The engine checks for an empty frontier before extracting.
    #[error("extract_min called on an empty frontier")]
    EmptyFrontier,

    #[error("no path available: search has not succeeded")]
    NoPath,

    #[error("step called before start")]
    NotStarted,

    #[error("grid uses {grid:?} movement but the search is configured for {search:?}")]
    ConnectivityMismatch {
        grid: Connectivity,
        search: Connectivity,
    },

    #[error("{heuristic:?} heuristic is not admissible for {connectivity:?} movement")]
    InadmissibleHeuristic {
        heuristic: Heuristic,
        connectivity: Connectivity,
    },
}

/// Errors from building or parsing a grid layout
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown character {ch:?} at row {row}, col {col}")]
    UnknownChar { ch: char, row: usize, col: usize },

    #[error("layout has no {0} cell")]
    MissingEndpoint(Endpoint),

    #[error("layout has more than one {0} cell")]
    DuplicateEndpoint(Endpoint),

    #[error("{role} cell {cell} is out of bounds or blocked")]
    BadEndpoint { role: Endpoint, cell: Cell },

    #[error("obstacle density {0} is outside [0, 1]")]
    InvalidDensity(f64),

    #[error("grid dimensions {rows}x{cols} must be positive")]
    InvalidDimensions { rows: i32, cols: i32 },
}

/// Crate-level error
#[derive(Error, Debug)]
pub enum Error {
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
