mod chart;
mod screens;

use anyhow::{Context, Result};
use btc_dashboard_core::{DashboardConfig, DashboardData, DashboardView, DateLookup};
use btc_dashboard_data::DashboardLoader;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::time::Duration;

/// Message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// Main application state
pub struct App {
    pub config: DashboardConfig,
    pub loader: DashboardLoader,
    pub data: DashboardData,
    pub lookup: DateLookup,
    pub view: DashboardView,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
}

impl App {
    /// Builds the first render pass with the default lookup selection.
    ///
    /// # Errors
    /// Returns an error if the view cannot be built from `data`.
    pub fn new(
        config: DashboardConfig,
        loader: DashboardLoader,
        data: DashboardData,
    ) -> Result<Self> {
        let lookup = DateLookup::new(&data.forecast);
        let view = DashboardView::build(&data, &config, &lookup)?;
        Ok(Self {
            config,
            loader,
            data,
            lookup,
            view,
            status: None,
            should_quit: false,
        })
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(DateLookup::select_previous),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(DateLookup::select_next),
            KeyCode::Home | KeyCode::Char('g') => self.move_selection(DateLookup::select_first),
            KeyCode::End | KeyCode::Char('G') => self.move_selection(DateLookup::select_last),
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
    }

    fn move_selection(&mut self, transition: fn(&mut DateLookup)) {
        let before = self.lookup.selected();
        transition(&mut self.lookup);
        if self.lookup.selected() == before {
            return;
        }
        match DashboardView::build(&self.data, &self.config, &self.lookup) {
            Ok(view) => self.view = view,
            Err(e) => self.status = Some(StatusMessage::Error(format!("Render failed: {e}"))),
        }
    }

    /// Re-reads every input file. On failure the previous data stays on screen.
    pub fn reload(&mut self) {
        let data = match self.loader.load() {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Reload failed: {}", e);
                self.status = Some(StatusMessage::Error(format!("Reload failed: {e}")));
                return;
            }
        };

        let mut lookup = DateLookup::new(&data.forecast);
        if let Some(date) = self.lookup.selected() {
            lookup.select(date);
        }

        match DashboardView::build(&data, &self.config, &lookup) {
            Ok(view) => {
                tracing::info!("Dashboard data reloaded");
                self.data = data;
                self.lookup = lookup;
                self.view = view;
                self.status = Some(StatusMessage::Info("Data reloaded".to_string()));
            }
            Err(e) => {
                tracing::warn!("Reload failed: {}", e);
                self.status = Some(StatusMessage::Error(format!("Reload failed: {e}")));
            }
        }
    }
}

/// Loads the data, then runs the interactive dashboard until the user quits.
///
/// # Errors
/// Returns an error if the data cannot be loaded or the terminal cannot be driven.
pub fn run(config: DashboardConfig) -> Result<()> {
    // Load before touching the terminal so fatal errors print normally
    let loader = DashboardLoader::new(config.paths.clone());
    let data = loader.load().context("Failed to load dashboard data")?;
    let mut app = App::new(config, loader, data)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| screens::render(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use btc_dashboard_core::{
        ArtifactFormat, ForecastRecord, LookupOutcome, ModelArtifact, PathsConfig, SentimentLabel,
        SentimentRecord,
    };
    use chrono::{Duration as Days, NaiveDate};
    use std::path::PathBuf;

    pub(crate) fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Days::days(offset)
    }

    pub(crate) fn sample_app() -> App {
        let data = DashboardData {
            model: ModelArtifact {
                path: PathBuf::from("xgb_model.pkl"),
                format: ArtifactFormat::Pickle { protocol: 4 },
                size_bytes: 64,
            },
            sentiment: vec![
                SentimentRecord::new(
                    "ETF inflows",
                    "Inflows hit a record.",
                    day(0),
                    SentimentLabel::Positive,
                ),
                SentimentRecord::new(
                    "Exchange hack",
                    "Funds drained.",
                    day(1),
                    SentimentLabel::Negative,
                ),
            ],
            forecast: (0..30)
                .map(|i| ForecastRecord {
                    forecast_date: day(i),
                    predicted_price: 40_000.0 + i as f64,
                })
                .collect(),
            actual_prices: None,
        };
        let loader = DashboardLoader::new(PathsConfig {
            data_dir: PathBuf::from("/nonexistent/btc-dashboard"),
            ..PathsConfig::default()
        });
        App::new(DashboardConfig::default(), loader, data).unwrap()
    }

    fn lookup_display(app: &App) -> String {
        match &app.view.lookup {
            LookupOutcome::Price { display, .. } => display.clone(),
            LookupOutcome::NoForecast { notice } => notice.clone(),
        }
    }

    #[test]
    fn test_navigation_rebuilds_view() {
        let mut app = sample_app();
        assert_eq!(lookup_display(&app), "$40,000.00");

        for _ in 0..14 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.view.selected_date, Some(day(14)));
        assert_eq!(lookup_display(&app), "$40,014.00");

        app.handle_key(KeyCode::Char('k'));
        assert_eq!(app.view.selected_date, Some(day(13)));

        app.handle_key(KeyCode::End);
        assert_eq!(app.view.selected_date, Some(day(29)));
        app.handle_key(KeyCode::Home);
        assert_eq!(app.view.selected_date, Some(day(0)));
    }

    #[test]
    fn test_failed_reload_keeps_previous_data() {
        let mut app = sample_app();
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Char('r'));

        assert!(matches!(app.status, Some(StatusMessage::Error(_))));
        assert_eq!(app.data.forecast.len(), 30);
        assert_eq!(app.view.selected_date, Some(day(1)));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = sample_app();
        app.handle_key(KeyCode::Char('x'));
        assert!(!app.should_quit);
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = sample_app();
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit);
    }
}
