pub mod action;
pub mod browser_state;
pub mod pagination;
pub mod question_browser;
pub mod quiz;

pub use action::QuestionAction;
pub use browser_state::{BrowserState, DisplayMode};
pub use pagination::{PageLink, Pagination, PAGE_SIZE};
pub use question_browser::{
    Outcome, QuestionBrowser, ADD_FAILED_NOTICE, DELETE_CONFIRMATION, REQUEST_FAILED_NOTICE,
};
pub use quiz::{QuizSession, QUESTIONS_PER_PLAY};
