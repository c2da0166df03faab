pub mod config;
pub mod engine;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod heuristic;
pub mod layout;
pub mod logging;
pub mod obstacles;
pub mod path;
pub mod trace;

pub use config::{Config, ConfigSource};
pub use engine::{SearchConfig, SearchEngine, SearchEvent, SearchNode, SearchStatus};
pub use error::{Error, LayoutError, Result, SearchError};
pub use frontier::PriorityFrontier;
pub use grid::{Cell, Connectivity, Cost, Grid};
pub use heuristic::Heuristic;
pub use layout::{CellState, GridLayout};
pub use obstacles::ObstacleGenerator;
pub use path::Path;
pub use trace::SearchTrace;
