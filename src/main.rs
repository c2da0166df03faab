use arboard::Clipboard;
use astar_viz::config::{Config, LabelMode, VisualConfig};
use astar_viz::{logging, Cell, CellState, GridLayout, SearchEngine, SearchStatus, SearchTrace};
use macroquad::prelude::*;

const FRONTIER_COLOR: Color = Color::new(0.0, 0.78, 0.0, 1.0);
const VISITED_COLOR: Color = Color::new(0.78, 0.0, 0.0, 1.0);
const PATH_COLOR: Color = Color::new(0.0, 0.59, 0.78, 1.0);

/// Window size in pixels for a grid of `rows x cols`
fn screen_size(visual: &VisualConfig, rows: i32, cols: i32) -> (f32, f32) {
    let pitch = visual.cell_size + visual.line_width;
    (
        pitch * cols as f32 + visual.line_width,
        pitch * rows as f32 + visual.line_width,
    )
}

/// Visualization state
struct VisState {
    config: Config,
    layout: GridLayout,
    engine: SearchEngine,
    paused: bool,
    /// Bumped on every regenerate so a fixed seed still yields new grids
    generation: u64,
}

impl VisState {
    fn new(config: Config) -> astar_viz::Result<Self> {
        let layout = config.build_layout()?;
        let engine = SearchEngine::new(config.search_config()?);
        let mut state = VisState {
            config,
            layout,
            engine,
            paused: false,
            generation: 0,
        };
        state.restart();
        Ok(state)
    }

    /// Throw away the current run and search the current layout from scratch
    fn restart(&mut self) {
        if let Err(e) = self
            .engine
            .start(self.layout.grid.clone(), self.layout.start, self.layout.goal)
        {
            tracing::error!("Failed to start search: {}", e);
        }
    }

    fn regenerate(&mut self) {
        self.generation += 1;
        let mut generator = match self.config.obstacle_generator() {
            Ok(generator) => generator,
            Err(e) => {
                tracing::error!("Invalid obstacle settings: {}", e);
                return;
            }
        };
        generator.seed = generator.seed.map(|s| s.wrapping_add(self.generation));

        match generator.layout(
            self.layout.grid.rows,
            self.layout.grid.cols,
            self.layout.grid.connectivity(),
            self.layout.start,
            self.layout.goal,
        ) {
            Ok(layout) => {
                self.layout = layout;
                self.restart();
            }
            Err(e) => tracing::error!("Failed to regenerate grid: {}", e),
        }
    }

    fn cell_at_mouse(&self, mouse_x: f32, mouse_y: f32) -> Cell {
        let pitch = self.config.visual.cell_size + self.config.visual.line_width;
        let col = ((mouse_x - self.config.visual.line_width) / pitch).floor() as i32;
        let row = ((mouse_y - self.config.visual.line_width) / pitch).floor() as i32;
        Cell::new(row, col)
    }

    fn handle_click(&mut self, mouse_x: f32, mouse_y: f32) {
        let cell = self.cell_at_mouse(mouse_x, mouse_y);
        if self.layout.toggle_blocked(cell) {
            tracing::info!("Toggled obstacle at {}", cell);
            self.restart();
        }
    }

    fn update(&mut self) {
        if self.paused {
            return;
        }
        for _ in 0..self.config.visual.steps_per_frame {
            if self.engine.status() != SearchStatus::Running {
                break;
            }
            if let Err(e) = self.engine.step() {
                tracing::error!("Search step failed: {}", e);
                break;
            }
        }
    }

    fn copy_to_clipboard(&self) {
        let text = self.layout.to_text();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(text) {
                    tracing::warn!("Failed to copy to clipboard: {}", e);
                } else {
                    tracing::info!("Grid layout copied to clipboard");
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => tracing::warn!("Failed to access clipboard: {}", e),
        }
    }

    fn save_trace(&self) {
        let path = &self.config.logging.trace_path;
        if let Err(e) = SearchTrace::record(&self.engine).save_to_file(path) {
            tracing::error!("Failed to save trace to {}: {}", path, e);
        }
    }

    fn cell_color(&self, cell: Cell) -> Color {
        let on_path = self.engine.path().is_some_and(|p| p.contains(&cell));
        match self.layout.cell_state(cell) {
            CellState::Start | CellState::Goal => PATH_COLOR,
            CellState::Blocked => BLACK,
            CellState::Free if on_path => PATH_COLOR,
            CellState::Free => {
                let visited = self.engine.node(cell).is_some_and(|n| n.visited);
                if visited {
                    VISITED_COLOR
                } else if self.engine.is_in_frontier(cell) {
                    FRONTIER_COLOR
                } else {
                    WHITE
                }
            }
        }
    }

    fn label(&self, cell: Cell) -> Option<String> {
        match self.layout.cell_state(cell) {
            CellState::Start => return Some("A".to_string()),
            CellState::Goal => return Some("B".to_string()),
            CellState::Blocked => return None,
            CellState::Free => {}
        }
        let node = self.engine.node(cell)?;
        let value = match self.config.visual.label_mode {
            LabelMode::GScore => node.g_score,
            LabelMode::FScore => node.f_score,
            LabelMode::Hidden => None,
        }?;
        Some(value.to_string())
    }

    fn draw(&self) {
        let visual = &self.config.visual;
        clear_background(Color::from_rgba(
            visual.background_r,
            visual.background_g,
            visual.background_b,
            255,
        ));

        let pitch = visual.cell_size + visual.line_width;
        let font_size = (visual.cell_size * 0.5).max(10.0);

        for row in 0..self.layout.grid.rows {
            for col in 0..self.layout.grid.cols {
                let cell = Cell::new(row, col);
                let px = visual.line_width + col as f32 * pitch;
                let py = visual.line_width + row as f32 * pitch;
                draw_rectangle(px, py, visual.cell_size, visual.cell_size, self.cell_color(cell));

                if let Some(text) = self.label(cell) {
                    let dims = measure_text(&text, None, font_size as u16, 1.0);
                    draw_text(
                        &text,
                        px + (visual.cell_size - dims.width) / 2.0,
                        py + (visual.cell_size + dims.offset_y) / 2.0,
                        font_size,
                        BLACK,
                    );
                }
            }
        }

        let status = match self.engine.status() {
            SearchStatus::Succeeded => match self.engine.path() {
                Some(path) => format!("Path found: {} cells, cost {}", path.len(), path.total_cost),
                None => "Path found".to_string(),
            },
            SearchStatus::Failed => "No path".to_string(),
            SearchStatus::Running if self.paused => "Paused".to_string(),
            SearchStatus::Running => format!("Searching... step {}", self.engine.steps_taken()),
            SearchStatus::Idle => "Idle".to_string(),
        };
        let info = format!(
            "{}  |  Space: pause  N: step  R: new grid  Click: toggle wall  C: copy  T: save trace  Esc: quit",
            status
        );
        let dims = measure_text(&info, None, 16, 1.0);
        draw_rectangle(0.0, 0.0, dims.width + 12.0, 22.0, Color::new(0.0, 0.0, 0.0, 0.7));
        draw_text(&info, 6.0, 16.0, 16.0, WHITE);
    }
}

fn window_conf() -> Conf {
    let (config, _) = Config::load();
    let (width, height) = screen_size(&config.visual, config.grid.rows, config.grid.cols);
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: width as i32,
        window_height: height as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let (config, source) = Config::load();
    logging::init(&config.logging);
    source.log();

    let mut state = match VisState::new(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to set up search: {}", e);
            return;
        }
    };

    // A layout file can differ in size from the configured grid
    let (width, height) = screen_size(
        &state.config.visual,
        state.layout.grid.rows,
        state.layout.grid.cols,
    );
    request_new_screen_size(width, height);

    loop {
        if is_mouse_button_pressed(MouseButton::Left) {
            let (mouse_x, mouse_y) = mouse_position();
            state.handle_click(mouse_x, mouse_y);
        }
        if is_key_pressed(KeyCode::Space) {
            state.paused = !state.paused;
        }
        if is_key_pressed(KeyCode::N) && state.paused {
            if let Err(e) = state.engine.step() {
                tracing::error!("Search step failed: {}", e);
            }
        }
        if is_key_pressed(KeyCode::R) {
            state.regenerate();
        }
        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }
        if is_key_pressed(KeyCode::T) {
            state.save_trace();
        }
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.update();
        state.draw();

        next_frame().await
    }
}
