pub mod category;
pub mod question;
pub mod requests;
pub mod responses;

pub use category::Category;
pub use question::Question;
pub use requests::{NewQuestion, QuizRequest};
pub use responses::{
    CategoriesResponse, CategoryQuestionsResponse, CreateQuestionResponse, CurrentCategory,
    ErrorEnvelope, QuestionPageResponse, QuizResponse, SearchResponse,
};
