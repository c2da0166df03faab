use crate::engine::{SearchConfig, SearchEngine, SearchEvent, SearchStatus};
use crate::error::{Result, SearchError};
use crate::grid::{Cell, Grid};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::info;

/// Inputs and event sequence of one search run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTrace {
    pub rows: i32,
    pub cols: i32,
    pub config: SearchConfig,
    /// Blocked cells in row-major order
    pub blocked: Vec<Cell>,
    pub start: Cell,
    pub goal: Cell,
    pub status: SearchStatus,
    pub events: Vec<SearchEvent>,
}

impl SearchTrace {
    /// Capture the engine's current run
    pub fn record(engine: &SearchEngine) -> Self {
        let grid = engine.grid();
        SearchTrace {
            rows: grid.rows,
            cols: grid.cols,
            config: *engine.config(),
            blocked: grid.blocked_cells(),
            start: engine.start_cell(),
            goal: engine.goal_cell(),
            status: engine.status(),
            events: engine.trace().to_vec(),
        }
    }

    /// Rebuild the grid this trace was recorded on
    pub fn grid(&self) -> Grid {
        Grid::with_blocked(self.rows, self.cols, &self.blocked)
            .with_connectivity(self.config.connectivity)
    }

    /// Run the same search again from scratch
    pub fn replay(&self) -> std::result::Result<SearchTrace, SearchError> {
        let mut engine = SearchEngine::new(self.config);
        engine.start(self.grid(), self.start, self.goal)?;
        engine.run_to_completion()?;
        Ok(SearchTrace::record(&engine))
    }

    /// Index of the first event where two traces diverge, or `None` if identical
    pub fn first_divergence(&self, other: &SearchTrace) -> Option<usize> {
        let shared = self.events.len().min(other.events.len());
        (0..shared)
            .find(|&i| self.events[i] != other.events[i])
            .or_else(|| (self.events.len() != other.events.len()).then_some(shared))
    }

    pub fn matches(&self, other: &SearchTrace) -> bool {
        self.first_divergence(other).is_none()
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("Saved search trace ({} events) to {}", self.events.len(), path);
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let trace: SearchTrace = serde_json::from_str(&json)?;
        Ok(trace)
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let visited = self
            .events
            .iter()
            .filter(|e| matches!(e, SearchEvent::Visited { .. }))
            .count();
        let frontier_updates = self
            .events
            .iter()
            .filter(|e| matches!(e, SearchEvent::FrontierUpdated { .. }))
            .count();
        let outcome = self
            .events
            .iter()
            .rev()
            .find_map(|e| match e {
                SearchEvent::SearchSucceeded { path, total_cost } => Some(format!(
                    "path of {} cells, cost {}",
                    path.len(),
                    total_cost
                )),
                SearchEvent::SearchFailed => Some("no path".to_string()),
                _ => None,
            })
            .unwrap_or_else(|| "unfinished".to_string());

        format!(
            "Grid: {}x{}, {} blocked, {:?}\n\
             Start: {}  Goal: {}\n\
             Events: {} ({} visited, {} frontier updates)\n\
             Outcome: {:?}, {}",
            self.rows,
            self.cols,
            self.blocked.len(),
            self.config,
            self.start,
            self.goal,
            self.events.len(),
            visited,
            frontier_updates,
            self.status,
            outcome
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Connectivity;

    fn finished_trace() -> SearchTrace {
        let grid = Grid::with_blocked(4, 4, &[Cell::new(1, 1), Cell::new(2, 1)]);
        let mut engine = SearchEngine::new(SearchConfig::new(Connectivity::FourWay));
        engine.start(grid, Cell::new(0, 0), Cell::new(3, 3)).unwrap();
        engine.run_to_completion().unwrap();
        SearchTrace::record(&engine)
    }

    #[test]
    fn records_inputs_and_outcome() {
        let trace = finished_trace();
        assert_eq!(trace.blocked, vec![Cell::new(1, 1), Cell::new(2, 1)]);
        assert_eq!(trace.status, SearchStatus::Succeeded);
        assert!(matches!(
            trace.events.last(),
            Some(SearchEvent::SearchSucceeded { total_cost: 6, .. })
        ));
    }

    #[test]
    fn replay_matches_recording() {
        let trace = finished_trace();
        let again = trace.replay().unwrap();
        assert!(trace.matches(&again));
        assert_eq!(trace, again);
    }

    #[test]
    fn divergence_is_reported() {
        let trace = finished_trace();
        let mut other = trace.clone();
        other.events.truncate(3);
        assert_eq!(trace.first_divergence(&other), Some(3));
        other.events[1] = SearchEvent::SearchFailed;
        assert_eq!(trace.first_divergence(&other), Some(1));
    }

    #[test]
    fn json_file_survives_save_and_load() {
        let trace = finished_trace();
        let path = std::env::temp_dir().join("astar_viz_trace_unit.json");
        let path = path.to_string_lossy().to_string();
        trace.save_to_file(&path).unwrap();
        let loaded = SearchTrace::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, trace);
    }

    #[test]
    fn summary_mentions_outcome() {
        let summary = finished_trace().summary();
        assert!(summary.contains("Grid: 4x4, 2 blocked"));
        assert!(summary.contains("path of 7 cells, cost 6"));
    }
}
