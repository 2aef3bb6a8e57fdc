//! TUI application: wires the session controller to the terminal
//! collaborators and runs the event loop.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::cli::AppConfig;
use crate::core::error::JournalError;
use crate::core::ports::Locator;
use crate::core::session::{SessionController, SessionState};
use crate::core::workout::Coordinates;
use crate::data::SqliteStore;
use crate::ui::{
    map::MapPanel,
    surface::{TerminalList, TerminalMap},
    theme::Theme,
    widgets::{FormPanel, FormState, StatusBar, WorkoutListPanel},
    HelpOverlay,
};

/// Which panel is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPanel {
    Map,
    Workouts,
}

impl FocusedPanel {
    fn next(self) -> Self {
        match self {
            FocusedPanel::Map => FocusedPanel::Workouts,
            FocusedPanel::Workouts => FocusedPanel::Map,
        }
    }
}

/// Position source fed from the command line; stands in for a device fix
struct ConfiguredLocator {
    position: Option<Coordinates>,
}

impl Locator for ConfiguredLocator {
    fn current_position(&self) -> Result<Coordinates, JournalError> {
        self.position.ok_or_else(|| JournalError::LocationUnavailable {
            reason: "pass --lat and --lng to place the map".to_string(),
        })
    }
}

type Session = SessionController<TerminalMap, TerminalList, SqliteStore>;

/// Application state
pub struct App {
    session: Session,
    theme: Theme,

    // UI state
    focused: FocusedPanel,
    cursor: Coordinates,
    selected: usize,
    form: Option<FormState>,
    show_help: bool,

    // Exit flag
    should_quit: bool,

    // Error message to display (non-fatal)
    error_message: Option<String>,
}

impl App {
    /// Create a new App instance
    pub fn new(config: AppConfig) -> Result<Self> {
        let kv = SqliteStore::open(&config.db_path)?;
        let map = TerminalMap::new(config.zoom);
        let list = TerminalList::new();
        let mut session = SessionController::new(map, list, kv, config.zoom);

        let locator = ConfiguredLocator {
            position: config.position.map(|(lat, lng)| Coordinates::new(lat, lng)),
        };
        let error_message = session.initialize(&locator).err().map(|e| e.to_string());

        let cursor = session.map().center;
        let mut app = App {
            session,
            theme: Theme::default(),
            focused: FocusedPanel::Map,
            cursor,
            selected: 0,
            form: None,
            show_help: false,
            should_quit: false,
            error_message,
        };
        app.sync_form();
        Ok(app)
    }

    /// Open or close the form to match the controller's state
    fn sync_form(&mut self) {
        match self.session.state() {
            SessionState::Composing { prefill, .. } => {
                if self.form.is_none() {
                    self.form = Some(FormState::new(prefill.as_ref()));
                }
            }
            SessionState::Idle => self.form = None,
        }
    }

    /// Set an error message to display (non-fatal)
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    /// Id of the selected (non-fading) list entry
    fn selected_id(&self) -> Option<String> {
        self.session
            .list()
            .active_ids()
            .get(self.selected)
            .map(|id| id.to_string())
    }

    /// Periodic upkeep between input events
    fn tick(&mut self) {
        self.session.list_mut().tick(Instant::now());
        let len = self.session.list().active_len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Handle keyboard input
    fn handle_input(&mut self, key: KeyCode) -> Result<()> {
        // The open form captures everything
        if self.form.is_some() {
            self.handle_form_input(key);
            return Ok(());
        }

        // Global shortcuts
        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::F(1) => {
                self.show_help = !self.show_help;
                return Ok(());
            }
            KeyCode::Esc if self.show_help => {
                self.show_help = false;
                return Ok(());
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focused = self.focused.next();
                return Ok(());
            }
            _ => {}
        }

        if self.show_help {
            return Ok(());
        }

        match self.focused {
            FocusedPanel::Map => self.handle_map_navigation(key),
            FocusedPanel::Workouts => self.handle_list_navigation(key),
        }
        Ok(())
    }

    fn handle_form_input(&mut self, key: KeyCode) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc => {
                self.session.cancel();
                self.form = None;
                self.error_message = None;
            }
            KeyCode::Enter => {
                let input = form.input();
                match self.session.submit(&input) {
                    Ok(()) => {
                        self.form = None;
                        self.error_message = None;
                    }
                    Err(err) => self.error_message = Some(err.to_string()),
                }
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left | KeyCode::Right if form.focused == 0 => form.toggle_kind(),
            KeyCode::Char('t') => form.toggle_kind(),
            KeyCode::Char(c) => form.push_char(c),
            KeyCode::Backspace => form.backspace(),
            _ => {}
        }
    }

    fn handle_map_navigation(&mut self, key: KeyCode) {
        let lng_step = self.session.map().span_deg() / 20.0;
        let lat_step = lng_step / 2.0;
        match key {
            KeyCode::Left | KeyCode::Char('h') => self.cursor.lng -= lng_step,
            KeyCode::Right | KeyCode::Char('l') => self.cursor.lng += lng_step,
            KeyCode::Up | KeyCode::Char('k') => self.cursor.lat += lat_step,
            KeyCode::Down | KeyCode::Char('j') => self.cursor.lat -= lat_step,
            KeyCode::Char('+') | KeyCode::Char('=') => self.session.map_mut().zoom_in(),
            KeyCode::Char('-') => self.session.map_mut().zoom_out(),
            KeyCode::Enter => {
                self.session.map_click(self.cursor);
                self.error_message = None;
                self.sync_form();
            }
            _ => {}
        }
    }

    fn handle_list_navigation(&mut self, key: KeyCode) {
        let len = self.session.list().active_len();
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                if len > 0 {
                    self.selected = (self.selected + 1) % len;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if len > 0 {
                    self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
                }
            }
            KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    if let Err(err) = self.session.focus(&id) {
                        self.set_error(err.to_string());
                    } else {
                        self.cursor = self.session.map().center;
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_id() {
                    // Stale ids are benign: the list may still show a fading
                    // entry whose workout is already gone
                    if let Err(err) = self.session.delete(&id) {
                        self.set_error(err.to_string());
                    }
                }
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_id() {
                    match self.session.edit(&id) {
                        Ok(()) => {
                            self.error_message = None;
                            self.sync_form();
                        }
                        Err(err) => self.set_error(err.to_string()),
                    }
                }
            }
            _ => {}
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Body
                Constraint::Length(2), // Status bar
            ])
            .split(size);

        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(40),    // Map
                Constraint::Length(52), // Workouts
            ])
            .split(main_chunks[0]);

        let map_panel = MapPanel::new(self.session.map(), self.cursor, &self.theme);
        map_panel.render(frame, body_chunks[0], self.focused == FocusedPanel::Map);

        let list_panel = WorkoutListPanel::new(
            self.session.list().entries(),
            self.selected,
            &self.theme,
        );
        list_panel.render(frame, body_chunks[1], self.focused == FocusedPanel::Workouts);

        let status_bar = StatusBar::new(
            self.form.is_some(),
            self.session.store().len(),
            self.error_message.as_deref(),
            &self.theme,
        );
        status_bar.render(frame, main_chunks[1]);

        if let Some(form) = &self.form {
            let panel = FormPanel::new(form, &self.theme);
            panel.render(frame, size);
        }

        if self.show_help {
            let help = HelpOverlay::new(&self.theme);
            help.render(frame, size);
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() {
    // Best effort cleanup since we may be mid-panic
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Run the TUI application
pub fn run(config: AppConfig) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        restore_terminal();
        return Err(e).context("Failed to setup terminal");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            restore_terminal();
            return Err(e).context("Failed to create terminal");
        }
    };

    // Create app - if this fails, restore terminal first
    let mut app = match App::new(config) {
        Ok(a) => a,
        Err(e) => {
            restore_terminal();
            return Err(e).context("Failed to initialize application");
        }
    };

    let result = run_main_loop(&mut terminal, &mut app);

    // Always restore terminal, regardless of result
    restore_terminal();
    terminal.show_cursor().ok();

    result
}

/// Main application loop
fn run_main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    loop {
        terminal.draw(|f| app.render(f))?;

        app.tick();

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = app.handle_input(key.code) {
                    // Log error but don't crash
                    app.set_error(format!("Input error: {e}"));
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
