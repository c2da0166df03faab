use crate::engine::SearchConfig;
use crate::error::{Error, Result};
use crate::grid::{Cell, Connectivity};
use crate::heuristic::Heuristic;
use crate::layout::GridLayout;
use crate::obstacles::ObstacleGenerator;
use serde::Deserialize;
use std::fs;
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub obstacles: ObstaclesConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_rows")]
    pub rows: i32,
    #[serde(default = "default_cols")]
    pub cols: i32,
    #[serde(default)]
    pub connectivity: Connectivity,
    /// Text layout to load instead of generating obstacles
    #[serde(default)]
    pub layout_file: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchSection {
    /// Defaults to the connectivity's own heuristic when unset
    #[serde(default)]
    pub heuristic: Option<Heuristic>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default)]
    pub start_row: i32,
    #[serde(default)]
    pub start_col: i32,
    /// Bottom-right corner when unset
    #[serde(default)]
    pub goal_row: Option<i32>,
    #[serde(default)]
    pub goal_col: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObstaclesConfig {
    #[serde(default = "default_density")]
    pub density: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Per-cell number drawn on visited and frontier cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMode {
    /// Cost so far from the start
    #[default]
    GScore,
    /// Cost so far plus the estimate to the goal
    FScore,
    Hidden,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "default_line_width")]
    pub line_width: f32,
    #[serde(default = "default_steps_per_frame")]
    pub steps_per_frame: u32,
    #[serde(default)]
    pub label_mode: LabelMode,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default = "default_trace_path")]
    pub trace_path: String,
}

// Default values
fn default_rows() -> i32 { 15 }
fn default_cols() -> i32 { 30 }
fn default_density() -> f64 { 0.4 }
fn default_window_title() -> String { "A* Pathfinding".to_string() }
fn default_cell_size() -> f32 { 40.0 }
fn default_line_width() -> f32 { 3.0 }
fn default_steps_per_frame() -> u32 { 1 }
fn default_bg_r() -> u8 { 80 }
fn default_bg_g() -> u8 { 80 }
fn default_bg_b() -> u8 { 80 }
fn default_log_filter() -> String { "astar_viz=info".to_string() }
fn default_trace_path() -> String { "search_trace.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            connectivity: Connectivity::default(),
            layout_file: None,
        }
    }
}

impl Default for ObstaclesConfig {
    fn default() -> Self {
        Self {
            density: default_density(),
            seed: None,
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            cell_size: default_cell_size(),
            line_width: default_line_width(),
            steps_per_frame: default_steps_per_frame(),
            label_mode: LabelMode::default(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            trace_path: default_trace_path(),
        }
    }
}

/// Where a loaded configuration came from
#[derive(Debug)]
pub enum ConfigSource {
    File(String),
    Missing(String),
    /// The file exists but did not parse; defaults are used instead
    Invalid { path: String, error: Error },
}

impl ConfigSource {
    /// Report the outcome. Call after `logging::init` so warnings are not lost.
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded configuration from {}", path),
            ConfigSource::Missing(path) => {
                info!("No {} found, using default configuration", path)
            }
            ConfigSource::Invalid { path, error } => {
                warn!("Failed to parse {}: {}. Using default configuration", path, error)
            }
        }
    }
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> (Self, ConfigSource) {
        Self::load_from(CONFIG_FILE)
    }

    /// Read `path` without logging; pass the returned source to `ConfigSource::log`
    /// once a subscriber is installed.
    pub fn load_from(path: &str) -> (Self, ConfigSource) {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => (config, ConfigSource::File(path.to_string())),
                Err(error) => (
                    Config::default(),
                    ConfigSource::Invalid {
                        path: path.to_string(),
                        error,
                    },
                ),
            },
            Err(_) => (Config::default(), ConfigSource::Missing(path.to_string())),
        }
    }

    /// Strict parse, for callers that want to see the error
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn search_config(&self) -> Result<SearchConfig> {
        let base = SearchConfig::new(self.grid.connectivity);
        match self.search.heuristic {
            Some(heuristic) => Ok(base.with_heuristic(heuristic)?),
            None => Ok(base),
        }
    }

    pub fn start_cell(&self) -> Cell {
        Cell::new(self.endpoints.start_row, self.endpoints.start_col)
    }

    pub fn goal_cell(&self) -> Cell {
        Cell::new(
            self.endpoints.goal_row.unwrap_or(self.grid.rows - 1),
            self.endpoints.goal_col.unwrap_or(self.grid.cols - 1),
        )
    }

    pub fn obstacle_generator(&self) -> Result<ObstacleGenerator> {
        Ok(ObstacleGenerator::new(
            self.obstacles.density,
            self.obstacles.seed,
        )?)
    }

    /// The layout to search: the layout file when configured, random obstacles otherwise
    pub fn build_layout(&self) -> Result<GridLayout> {
        if let Some(path) = &self.grid.layout_file {
            info!("Loading grid layout from {}", path);
            return GridLayout::load_from_file(path, self.grid.connectivity);
        }

        self.obstacle_generator()?
            .layout(
                self.grid.rows,
                self.grid.cols,
                self.grid.connectivity,
                self.start_cell(),
                self.goal_cell(),
            )
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.grid.rows, 15);
        assert_eq!(config.grid.cols, 30);
        assert_eq!(config.grid.connectivity, Connectivity::FourWay);
        assert_eq!(config.visual.label_mode, LabelMode::GScore);
        assert_eq!(config.start_cell(), Cell::new(0, 0));
        assert_eq!(config.goal_cell(), Cell::new(14, 29));
        assert_eq!(config.search_config().unwrap().heuristic, Heuristic::Manhattan);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [grid]
            rows = 8
            connectivity = "eight_way"

            [obstacles]
            seed = 99

            [visual]
            label_mode = "f_score"
            "#,
        )
        .unwrap();
        assert_eq!(config.grid.rows, 8);
        assert_eq!(config.grid.cols, 30);
        assert_eq!(config.obstacles.seed, Some(99));
        assert_eq!(config.obstacles.density, 0.4);
        assert_eq!(config.visual.label_mode, LabelMode::FScore);
        assert_eq!(config.goal_cell(), Cell::new(7, 29));
        assert_eq!(config.search_config().unwrap().heuristic, Heuristic::Octile);
    }

    #[test]
    fn inadmissible_heuristic_is_an_error() {
        let config = Config::from_toml_str(
            r#"
            [grid]
            connectivity = "eight_way"
            [search]
            heuristic = "manhattan"
            "#,
        )
        .unwrap();
        assert!(matches!(config.search_config(), Err(Error::Search(_))));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(matches!(
            Config::from_toml_str("[grid\nrows = "),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let (config, source) = Config::load_from("definitely/not/here.toml");
        assert_eq!(config.grid.rows, 15);
        assert!(matches!(source, ConfigSource::Missing(_)));
    }

    #[derive(Clone, Default)]
    struct SharedBuf(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn malformed_file_warns_after_logging_starts() {
        let path = std::env::temp_dir().join("astar_viz_bad_config.toml");
        let path = path.to_string_lossy().to_string();
        fs::write(&path, "[grid\nrows = ").unwrap();
        let (config, source) = Config::load_from(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(config.grid.rows, 15);
        assert!(matches!(source, ConfigSource::Invalid { error: Error::Config(_), .. }));

        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || source.log());

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("Failed to parse"));
        assert!(output.contains(&path));
    }

    #[test]
    fn seeded_layout_is_reproducible() {
        let config = Config::from_toml_str("[obstacles]\nseed = 5\n").unwrap();
        let a = config.build_layout().unwrap();
        let b = config.build_layout().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.start, Cell::new(0, 0));
        assert_eq!(a.goal, Cell::new(14, 29));
    }
}
