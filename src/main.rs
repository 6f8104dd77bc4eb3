mod answer_parser;
mod auth;
mod config;
mod errors;
mod log_util;
mod question_store;
mod quiz_session;
mod scoring;
#[cfg(test)]
mod test_support;
mod ui_renderer;
mod view_managers;

use auth::{Authenticator, EnvAuthenticator};
use color_eyre::{Result, eyre::WrapErr};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dotenvy::dotenv;
use log_util::log_debug;
use question_store::QuestionStore;
use quiz_session::{QuizSession, SessionPhase};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{DefaultTerminal, Frame};
use std::{collections::BTreeSet, time::Duration};
use ui_renderer::UiRenderer;
use view_managers::{LoginForm, LoginManager, QuestionManager, SummaryManager, TagsManager};

fn main() -> color_eyre::Result<()> {
    dotenv().ok();
    color_eyre::install()?;
    let config_error = config::initialize().err();
    let bank_path = &config::current().question_bank_path;
    let store = QuestionStore::load(bank_path).wrap_err_with(|| {
        format!(
            "cannot start without a question bank ({})",
            bank_path.display()
        )
    })?;
    log_debug(&format!(
        "App: loaded {} question(s) across {} tag(s) from {}",
        store.len(),
        store.all_tags().len(),
        bank_path.display()
    ));

    let bank_is_empty = store.is_empty();
    let mut app = App::from_environment(store);
    if bank_is_empty {
        App::push_error(
            &mut app.error,
            format!("Question bank {} has no questions.", bank_path.display()),
        );
    }
    if let Some(err) = config_error {
        App::push_error(
            &mut app.error,
            format!("Configuration load failed: {}", err),
        );
    }

    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

/// The terminal front end: owns the quiz session and the per-screen input state.
pub struct App {
    /// Is the application running?
    pub(crate) running: bool,
    /// Read-only question bank loaded at startup.
    pub(crate) store: QuestionStore,
    /// Single source of truth for which screen is shown.
    pub(crate) session: QuizSession,
    pub(crate) authenticator: Box<dyn Authenticator>,
    pub(crate) rng: StdRng,
    pub(crate) login_form: LoginForm,
    /// Cursor position in the tag list.
    pub(crate) tag_index: usize,
    pub(crate) selected_tags: BTreeSet<String>,
    /// Cursor position among the current question's choices.
    pub(crate) choice_index: usize,
    /// Result of the latest submit on the current question.
    pub(crate) feedback: Option<String>,
    /// Any recoverable error to show in the status panel.
    pub(crate) error: Option<String>,
    pub(crate) status: Option<String>,
}

impl App {
    /// Build the app with credentials from the environment and the configured shuffle seed.
    pub fn from_environment(store: QuestionStore) -> Self {
        let mut aggregated_error: Option<String> = None;
        let authenticator = match EnvAuthenticator::from_env() {
            Ok(authenticator) => authenticator,
            Err(err) => {
                Self::push_error(
                    &mut aggregated_error,
                    format!("Authentication unavailable: {}", err),
                );
                EnvAuthenticator::default()
            }
        };
        let rng = match config::current().shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut app = Self::with_parts(store, Box::new(authenticator), rng);
        app.error = aggregated_error;
        app
    }

    pub(crate) fn with_parts(
        store: QuestionStore,
        authenticator: Box<dyn Authenticator>,
        rng: StdRng,
    ) -> Self {
        Self {
            running: false,
            store,
            session: QuizSession::new(),
            authenticator,
            rng,
            login_form: LoginForm::default(),
            tag_index: 0,
            selected_tags: BTreeSet::new(),
            choice_index: 0,
            feedback: None,
            error: None,
            status: None,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.running = true;
        let tick_rate = Duration::from_millis(120);
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(tick_rate)?;
        }
        log_debug("App: exiting");
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        UiRenderer::new(self).render(frame);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self, tick_rate: Duration) -> Result<()> {
        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and dispatches them to the manager for the current phase.
    pub(crate) fn on_key_event(&mut self, key: KeyEvent) {
        let phase = self.session.phase();
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc)
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (KeyModifiers::NONE, KeyCode::Char('q')) if self.session.is_authenticated() => {
                self.quit()
            }
            _ => match phase {
                SessionPhase::Unauthenticated => LoginManager::new(self).handle_key(key),
                SessionPhase::SelectingTags => TagsManager::new(self).handle_key(key),
                SessionPhase::AnsweringQuestion => QuestionManager::new(self).handle_key(key),
                SessionPhase::Summary => SummaryManager::new(self).handle_key(key),
            },
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }

    /// Append a message to an optional error slot. Startup diagnostics only; key handlers replace `error`.
    pub(crate) fn push_error(slot: &mut Option<String>, message: String) {
        if let Some(existing) = slot {
            existing.push_str(" | ");
            existing.push_str(&message);
        } else {
            *slot = Some(message);
        }
    }
}
