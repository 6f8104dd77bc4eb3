use crate::{App, quiz_session::SessionPhase, view_managers::LoginField};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Gauge, List, ListItem, ListState, Paragraph, Wrap},
};

const APP_TITLE: &str = "Quiz Application";
const UNTAGGED_LABEL: &str = "(untagged)";

pub(crate) struct UiRenderer<'a> {
    app: &'a mut App,
}

impl<'a> UiRenderer<'a> {
    pub(crate) fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub(crate) fn render(&mut self, frame: &mut Frame) {
        match self.app.session.phase() {
            SessionPhase::Unauthenticated => self.render_login(frame),
            SessionPhase::SelectingTags => self.render_tags(frame),
            SessionPhase::AnsweringQuestion => self.render_question(frame),
            SessionPhase::Summary => self.render_summary(frame),
        }
    }

    fn render_login(&mut self, frame: &mut Frame) {
        let app = &*self.app;
        let layout = Self::screen_layout(frame.area());
        Self::render_header(frame, layout[0], "Login", "Enter your username and password.");

        let items = vec![
            ListItem::new(format!("Username: {}", app.login_form.username)),
            ListItem::new(format!("Password: {}", app.login_form.masked_password())),
        ];
        let mut list_state = ListState::default();
        list_state.select(Some(match app.login_form.field {
            LoginField::Username => 0,
            LoginField::Password => 1,
        }));

        frame.render_stateful_widget(
            List::new(items)
                .block(Block::bordered().title(Line::from("Credentials")))
                .highlight_symbol("▶ ")
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED)),
            layout[1],
            &mut list_state,
        );

        let mut status_lines = Self::status_prefix(app);
        status_lines.push("Tab switches field. Enter logs in. Esc or Ctrl-C to quit.".to_string());
        Self::render_status(frame, layout[2], status_lines);
    }

    fn render_tags(&mut self, frame: &mut Frame) {
        let app = &mut *self.app;
        let layout = Self::screen_layout(frame.area());
        Self::render_header(
            frame,
            layout[0],
            "Select Tags",
            &format!("{} question(s) in the bank", app.store.len()),
        );

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(layout[1]);

        let tag_counts = app.store.tag_counts();
        let list_items: Vec<ListItem> = if tag_counts.is_empty() {
            vec![ListItem::new("The question bank has no tags.")]
        } else {
            tag_counts
                .iter()
                .map(|(tag, count)| {
                    let marker = if app.selected_tags.contains(tag) {
                        "[x]"
                    } else {
                        "[ ]"
                    };
                    ListItem::new(format!("{} {} ({})", marker, Self::tag_label(tag), count))
                })
                .collect()
        };

        app.tag_index = app.tag_index.min(tag_counts.len().saturating_sub(1));
        let mut list_state = ListState::default();
        if !tag_counts.is_empty() {
            list_state.select(Some(app.tag_index));
        }

        frame.render_stateful_widget(
            List::new(list_items)
                .block(Block::bordered().title(Line::from("Choose tags")))
                .highlight_symbol("▶ ")
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED)),
            body[0],
            &mut list_state,
        );

        let count_text = if app.selected_tags.is_empty() {
            "No tags selected".to_string()
        } else {
            format!(
                "Total questions: {}",
                app.store.count_for_tags(&app.selected_tags)
            )
        };
        frame.render_widget(
            Paragraph::new(count_text)
                .wrap(Wrap { trim: false })
                .block(Block::bordered().title(Line::from("Selection"))),
            body[1],
        );

        let mut status_lines = Self::status_prefix(app);
        status_lines.push(
            "↑/↓ or j/k move. Space toggles, a selects all, x clears. Enter starts the quiz."
                .to_string(),
        );
        Self::render_status(frame, layout[2], status_lines);
    }

    fn render_question(&mut self, frame: &mut Frame) {
        let app = &mut *self.app;
        let layout = Self::screen_layout(frame.area());
        let Some(view) = app.session.current_question() else {
            return;
        };

        Self::render_header(
            frame,
            layout[0],
            &format!("Question {} of {}", view.position + 1, view.total),
            &format!("Tag: {}", Self::tag_label(&view.tag)),
        );

        let main_sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(3)])
            .split(layout[1]);

        let option_count = view.parsed.choices.len();
        let mut option_lines = Vec::new();
        if option_count == 0 {
            option_lines.push(String::from("- No answer options available"));
            app.choice_index = 0;
        } else {
            let selected = app.choice_index.min(option_count - 1);
            for (index, choice) in view.parsed.choices.iter().enumerate() {
                let prefix = if index == selected { "▶" } else { " " };
                let marker = if view.recorded_answer.as_deref() == Some(choice.letter.as_str()) {
                    "[•]"
                } else {
                    "[ ]"
                };
                option_lines.push(format!("{} {} {}", prefix, marker, choice.label()));
            }
            app.choice_index = selected;
        }

        let mut question_text = format!(
            "{}\n\nSelect your answer:\n{}",
            view.parsed.stem,
            option_lines.join("\n")
        );
        if let Some(recorded) = view
            .recorded_answer
            .as_deref()
            .and_then(|letter| view.parsed.choice(letter))
        {
            question_text.push_str(&format!("\n\nYour answer: {}", recorded.label()));
        }
        if let Some(feedback) = app.feedback.as_deref() {
            question_text.push_str(&format!("\n\nFeedback: {}", feedback));
        }

        frame.render_widget(
            Paragraph::new(question_text)
                .wrap(Wrap { trim: false })
                .block(Block::bordered().title(Line::from("Question"))),
            main_sections[0],
        );

        let ratio = (view.position + 1) as f64 / view.total as f64;
        frame.render_widget(
            Gauge::default()
                .block(Block::bordered().title(Line::from("Progress")))
                .ratio(ratio.clamp(0.0, 1.0))
                .label(format!("{}/{}", view.position + 1, view.total)),
            main_sections[1],
        );

        let mut status_lines = Self::status_prefix(app);
        status_lines.push(
            "j/k or A–E choose. Enter/s submits. p/← previous, n/→ next. q to quit.".to_string(),
        );
        Self::render_status(frame, layout[2], status_lines);
    }

    fn render_summary(&mut self, frame: &mut Frame) {
        let app = &*self.app;
        let layout = Self::screen_layout(frame.area());
        Self::render_header(frame, layout[0], "Quiz Summary", "Press n to start a new quiz.");

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(layout[1]);

        let score = app.session.score();
        let totals = format!(
            "Total Questions: {}\nAnswered Questions: {}\nCorrect Answers: {}\nIncorrect Answers: {}\nPercentage Correct: {}",
            score.total,
            score.answered,
            score.correct,
            score.incorrect,
            score.percent_label()
        );
        frame.render_widget(
            Paragraph::new(totals).block(Block::bordered().title(Line::from("Score"))),
            body[0],
        );

        let review_items: Vec<ListItem> = app
            .session
            .selection()
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let line = match app.session.answers().get(&index) {
                    Some(letter) if *letter == question.answer => {
                        format!("{}. {} - {} ✓", index + 1, question.id, letter)
                    }
                    Some(letter) => format!(
                        "{}. {} - {} ✗ (correct: {})",
                        index + 1,
                        question.id,
                        letter,
                        question.answer
                    ),
                    None => format!("{}. {} - skipped", index + 1, question.id),
                };
                ListItem::new(line)
            })
            .collect();
        frame.render_widget(
            List::new(review_items).block(Block::bordered().title(Line::from("Review"))),
            body[1],
        );

        let mut status_lines = Self::status_prefix(app);
        status_lines.push("Press n or Enter for a new quiz. q, Esc, or Ctrl-C to quit.".to_string());
        Self::render_status(frame, layout[2], status_lines);
    }

    fn screen_layout(area: Rect) -> std::rc::Rc<[Rect]> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(6),
                Constraint::Length(5),
            ])
            .split(area)
    }

    fn render_header(frame: &mut Frame, area: Rect, screen: &str, detail: &str) {
        let header_title = Line::from(format!("{} • {}", APP_TITLE, screen))
            .bold()
            .blue()
            .centered();
        frame.render_widget(
            Paragraph::new(detail.to_string())
                .block(Block::bordered().title(header_title))
                .centered(),
            area,
        );
    }

    fn render_status(frame: &mut Frame, area: Rect, status_lines: Vec<String>) {
        frame.render_widget(
            Paragraph::new(status_lines.join("\n"))
                .wrap(Wrap { trim: false })
                .block(Block::bordered().title(Line::from("Status"))),
            area,
        );
    }

    fn status_prefix(app: &App) -> Vec<String> {
        let mut status_lines = Vec::new();
        if let Some(error) = &app.error {
            status_lines.push(format!("Error: {}", error));
        }
        if let Some(status) = &app.status {
            status_lines.push(status.clone());
        }
        status_lines
    }

    fn tag_label(tag: &str) -> &str {
        if tag.is_empty() { UNTAGGED_LABEL } else { tag }
    }
}
