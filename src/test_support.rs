use crate::{
    App,
    auth::EnvAuthenticator,
    question_store::{Question, QuestionStore},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{SeedableRng, rngs::StdRng};

pub(crate) fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn question(id: &str, answer: &str, tag: &str) -> Question {
    Question {
        id: id.to_string(),
        stem_raw: format!("Question {id}? A: first B: second C: third"),
        answer: answer.to_string(),
        tag: tag.to_string(),
    }
}

pub(crate) fn sample_store() -> QuestionStore {
    QuestionStore::from_questions(vec![
        question("c1", "A", "cardio"),
        question("r1", "B", "renal"),
        question("c2", "C", "cardio"),
    ])
}

pub(crate) fn app_with_store(store: QuestionStore) -> App {
    let mut app = App::with_parts(
        store,
        Box::new(EnvAuthenticator::new("reviewer", "s3cret")),
        StdRng::seed_from_u64(11),
    );
    app.running = true;
    app
}

pub(crate) fn app() -> App {
    app_with_store(sample_store())
}

pub(crate) fn logged_in_app() -> App {
    let mut app = app();
    log_in(&mut app);
    app
}

pub(crate) fn answering_app() -> App {
    let mut app = logged_in_app();
    app.selected_tags = app.store.all_tags().iter().cloned().collect();
    app.on_key_event(key(KeyCode::Enter));
    app
}

/// Logged in and answering a single question that has no choice markers.
pub(crate) fn degraded_app() -> App {
    let store = QuestionStore::from_questions(vec![Question {
        id: "free-text".to_string(),
        stem_raw: "Describe the Frank-Starling mechanism.".to_string(),
        answer: "A".to_string(),
        tag: "cardio".to_string(),
    }]);
    let mut app = app_with_store(store);
    log_in(&mut app);
    app.selected_tags.insert("cardio".to_string());
    app.on_key_event(key(KeyCode::Enter));
    app
}

fn log_in(app: &mut App) {
    let App {
        session,
        authenticator,
        ..
    } = app;
    session.login(authenticator.as_ref(), "reviewer", "s3cret").unwrap();
}
