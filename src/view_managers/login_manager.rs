use crate::{App, log_util::log_debug};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum LoginField {
    #[default]
    Username,
    Password,
}

/// Text entered on the login screen. The password is never rendered in clear.
#[derive(Debug, Clone, Default)]
pub(crate) struct LoginForm {
    pub(crate) username: String,
    password: String,
    pub(crate) field: LoginField,
}

impl LoginForm {
    pub(crate) fn toggle_field(&mut self) {
        self.field = match self.field {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) {
        match self.field {
            LoginField::Username => self.username.push(ch),
            LoginField::Password => self.password.push(ch),
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.field {
            LoginField::Username => self.username.pop(),
            LoginField::Password => self.password.pop(),
        };
    }

    pub(crate) fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }

    fn take_password(&mut self) -> String {
        std::mem::take(&mut self.password)
    }
}

pub(crate) struct LoginManager<'a> {
    app: &'a mut App,
}

impl<'a> LoginManager<'a> {
    pub(crate) fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down) => {
                self.app.login_form.toggle_field()
            }
            (_, KeyCode::Enter) => self.on_enter(),
            (_, KeyCode::Backspace) => self.app.login_form.backspace(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(ch)) => {
                self.app.login_form.push_char(ch)
            }
            _ => {}
        }
    }

    fn on_enter(&mut self) {
        if self.app.login_form.field == LoginField::Username {
            self.app.login_form.field = LoginField::Password;
            return;
        }
        self.attempt_login();
    }

    fn attempt_login(&mut self) {
        let app = &mut *self.app;
        let password = app.login_form.take_password();
        match app.session.login(
            app.authenticator.as_ref(),
            &app.login_form.username,
            &password,
        ) {
            Ok(()) => {
                app.error = None;
                app.status = Some("Logged in successfully!".to_string());
            }
            Err(err) => {
                app.error = Some(err.to_string());
                app.status = None;
                log_debug("App: login attempt failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{quiz_session::SessionPhase, test_support};

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.on_key_event(test_support::key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn logs_in_with_valid_credentials() {
        let mut app = test_support::app();

        type_text(&mut app, "reviewer");
        app.on_key_event(test_support::key(KeyCode::Enter));
        type_text(&mut app, "s3cret");
        app.on_key_event(test_support::key(KeyCode::Enter));

        assert_eq!(app.session.phase(), SessionPhase::SelectingTags);
        assert_eq!(app.status.as_deref(), Some("Logged in successfully!"));
        assert!(app.error.is_none());
    }

    #[test]
    fn rejects_invalid_credentials_and_clears_password() {
        let mut app = test_support::app();

        type_text(&mut app, "reviewer");
        app.on_key_event(test_support::key(KeyCode::Tab));
        type_text(&mut app, "guess");
        app.on_key_event(test_support::key(KeyCode::Enter));

        assert_eq!(app.session.phase(), SessionPhase::Unauthenticated);
        assert_eq!(app.error.as_deref(), Some("Invalid credentials"));
        assert_eq!(app.login_form.masked_password(), "");
        assert_eq!(app.login_form.username, "reviewer");
    }

    #[test]
    fn repeated_failed_logins_show_the_error_once() {
        let mut app = test_support::app();
        app.on_key_event(test_support::key(KeyCode::Tab));

        for _ in 0..2 {
            type_text(&mut app, "guess");
            app.on_key_event(test_support::key(KeyCode::Enter));
        }

        assert_eq!(app.session.phase(), SessionPhase::Unauthenticated);
        assert_eq!(app.error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn q_is_typed_rather_than_quitting() {
        let mut app = test_support::app();

        type_text(&mut app, "qa");

        assert!(app.running);
        assert_eq!(app.login_form.username, "qa");
    }

    #[test]
    fn masks_password_and_supports_backspace() {
        let mut form = LoginForm::default();
        form.toggle_field();
        for ch in "abcd".chars() {
            form.push_char(ch);
        }
        form.backspace();

        assert_eq!(form.masked_password(), "***");
        assert!(form.username.is_empty());
    }
}
