use crate::{App, log_util::log_debug};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(crate) struct TagsManager<'a> {
    app: &'a mut App,
}

impl<'a> TagsManager<'a> {
    pub(crate) fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Down | KeyCode::Char('j')) => self.select_next(),
            (KeyModifiers::NONE, KeyCode::Up | KeyCode::Char('k')) => self.select_previous(),
            (KeyModifiers::NONE, KeyCode::Char(' ')) => self.toggle_current(),
            (KeyModifiers::NONE, KeyCode::Char('a')) => self.select_all(),
            (KeyModifiers::NONE, KeyCode::Char('x')) => self.clear_selection(),
            (KeyModifiers::NONE, KeyCode::Enter) => self.start_quiz(),
            _ => {}
        }
    }

    fn select_next(&mut self) {
        let total = self.app.store.all_tags().len();
        if total == 0 {
            self.app.tag_index = 0;
            return;
        }
        self.app.tag_index = (self.app.tag_index + 1) % total;
    }

    fn select_previous(&mut self) {
        let total = self.app.store.all_tags().len();
        if total == 0 {
            self.app.tag_index = 0;
            return;
        }
        if self.app.tag_index == 0 {
            self.app.tag_index = total - 1;
        } else {
            self.app.tag_index -= 1;
        }
    }

    fn toggle_current(&mut self) {
        let Some(tag) = self.app.store.all_tags().get(self.app.tag_index).cloned() else {
            return;
        };
        if !self.app.selected_tags.remove(&tag) {
            self.app.selected_tags.insert(tag);
        }
    }

    fn select_all(&mut self) {
        self.app.selected_tags = self.app.store.all_tags().iter().cloned().collect();
    }

    fn clear_selection(&mut self) {
        self.app.selected_tags.clear();
    }

    fn start_quiz(&mut self) {
        let app = &mut *self.app;
        match app
            .session
            .start_quiz(&app.store, &app.selected_tags, &mut app.rng)
        {
            Ok(count) => {
                app.choice_index = 0;
                app.feedback = None;
                app.error = None;
                app.status = Some(format!("Started quiz with {} question(s).", count));
            }
            Err(err) => {
                app.error = Some(err.to_string());
                log_debug(&format!("App: quiz start rejected: {}", err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{quiz_session::SessionPhase, test_support};
    use crossterm::event::KeyCode;

    #[test]
    fn repeated_empty_starts_show_the_error_once() {
        let mut app = test_support::logged_in_app();

        app.on_key_event(test_support::key(KeyCode::Enter));
        app.on_key_event(test_support::key(KeyCode::Enter));
        app.on_key_event(test_support::key(KeyCode::Enter));

        assert_eq!(app.session.phase(), SessionPhase::SelectingTags);
        assert_eq!(
            app.error.as_deref(),
            Some("No questions available for the selected tags.")
        );
    }

    #[test]
    fn toggles_tags_under_the_cursor() {
        let mut app = test_support::logged_in_app();

        app.on_key_event(test_support::key(KeyCode::Char(' ')));
        app.on_key_event(test_support::key(KeyCode::Down));
        app.on_key_event(test_support::key(KeyCode::Char(' ')));
        app.on_key_event(test_support::key(KeyCode::Char(' ')));

        let selected: Vec<&str> = app.selected_tags.iter().map(String::as_str).collect();
        assert_eq!(selected, vec!["cardio"]);
    }

    #[test]
    fn cursor_wraps_around() {
        let mut app = test_support::logged_in_app();

        app.on_key_event(test_support::key(KeyCode::Up));

        assert_eq!(app.tag_index, app.store.all_tags().len() - 1);
    }

    #[test]
    fn starting_without_tags_reports_no_questions() {
        let mut app = test_support::logged_in_app();

        app.on_key_event(test_support::key(KeyCode::Enter));

        assert_eq!(app.session.phase(), SessionPhase::SelectingTags);
        assert_eq!(
            app.error.as_deref(),
            Some("No questions available for the selected tags.")
        );
    }

    #[test]
    fn starts_quiz_with_selected_tags() {
        let mut app = test_support::logged_in_app();

        app.on_key_event(test_support::key(KeyCode::Char('a')));
        app.on_key_event(test_support::key(KeyCode::Enter));

        assert_eq!(app.session.phase(), SessionPhase::AnsweringQuestion);
        assert_eq!(app.session.selection().len(), app.store.len());
        assert!(app.error.is_none());
    }

    #[test]
    fn clear_empties_the_selection() {
        let mut app = test_support::logged_in_app();

        app.on_key_event(test_support::key(KeyCode::Char('a')));
        app.on_key_event(test_support::key(KeyCode::Char('x')));

        assert!(app.selected_tags.is_empty());
    }
}
