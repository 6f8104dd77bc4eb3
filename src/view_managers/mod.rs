pub mod login_manager;
pub mod question_manager;
pub mod summary_manager;
pub mod tags_manager;

pub(crate) use login_manager::{LoginField, LoginForm, LoginManager};
pub(crate) use question_manager::QuestionManager;
pub(crate) use summary_manager::SummaryManager;
pub(crate) use tags_manager::TagsManager;
