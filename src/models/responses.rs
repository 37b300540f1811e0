//! 后端响应结构
//!
//! 只声明实际会用到的字段，其余字段（`success`、`next_page` 等）忽略。

use super::{Category, Question};
use serde::Deserialize;

/// `GET /questions?page={n}` 的响应
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionPageResponse {
    pub list_of_questions: Vec<Question>,
    pub total_questions: u32,
    pub categories: Vec<Category>,
}

/// `GET /categories/{id}/questions` 的响应
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryQuestionsResponse {
    pub questions: Vec<Question>,
    pub total_questions: u32,
    pub current_category: CurrentCategory,
}

/// `POST /questions?search={term}` 的响应
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub questions: Vec<Question>,
    pub total_questions: u32,
}

/// `GET /categories` 的响应
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

/// `POST /questions`（新建题目）的响应
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestionResponse {
    pub question_created: u32,
    pub total_questions: u32,
}

/// `POST /quizzes` 的响应
///
/// 没有剩余题目时 `question` 为 `null`；`total_questions` 是剩余可抽的题目数。
#[derive(Debug, Clone, Deserialize)]
pub struct QuizResponse {
    pub question: Option<Question>,
    pub total_questions: u32,
}

/// `current_category` 字段
///
/// 后端返回整数 id，也兼容完整的分类对象。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CurrentCategory {
    Id(u32),
    Full(Category),
}

impl CurrentCategory {
    pub fn id(&self) -> u32 {
        match self {
            CurrentCategory::Id(id) => *id,
            CurrentCategory::Full(category) => category.id,
        }
    }

    /// 解析为完整分类：优先使用响应里的对象，其次在已知分类中查找
    pub fn resolve(&self, known: &[Category]) -> Category {
        match self {
            CurrentCategory::Full(category) => category.clone(),
            CurrentCategory::Id(id) => Category::find(known, *id)
                .cloned()
                .unwrap_or_else(|| Category::unlabeled(*id)),
        }
    }
}

/// 后端的错误响应体 `{success: false, error, message}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorEnvelope {
    /// 显示用的错误描述：优先 `message`，没有时退回错误码
    pub fn into_message(self) -> Option<String> {
        self.message
            .or_else(|| self.error.map(|code| format!("error {}", code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_response_ignores_extra_fields() {
        let json = r#"{
            "success": true,
            "list_of_questions": [
                {"id": 2, "question": "Q", "answer": "A", "category": 1, "difficulty": 2}
            ],
            "total_questions": 19,
            "categories": [{"id": 1, "type": "Science"}],
            "items_per_page": 10,
            "next_page": "http://127.0.0.1:5000/questions?page=2"
        }"#;

        let response: QuestionPageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.list_of_questions.len(), 1);
        assert_eq!(response.total_questions, 19);
        assert_eq!(response.categories[0].label, "Science");
    }

    #[test]
    fn test_current_category_as_id() {
        let json = r#"{"questions": [], "total_questions": 0, "current_category": 5}"#;
        let response: CategoryQuestionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.current_category, CurrentCategory::Id(5));

        let known = vec![Category::new(5, "Sports")];
        assert_eq!(response.current_category.resolve(&known), Category::new(5, "Sports"));
        assert_eq!(response.current_category.resolve(&[]), Category::unlabeled(5));
    }

    #[test]
    fn test_current_category_as_object() {
        let json = r#"{"questions": [], "total_questions": 0, "current_category": {"id": 2, "type": "Art"}}"#;
        let response: CategoryQuestionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.current_category.id(), 2);
        assert_eq!(response.current_category.resolve(&[]), Category::new(2, "Art"));
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let json = r#"{"questions": []}"#;
        assert!(serde_json::from_str::<SearchResponse>(json).is_err());
    }

    #[test]
    fn test_error_envelope() {
        let json = r#"{"success": false, "error": 404, "message": "Not found."}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error, Some(404));
        assert_eq!(envelope.message.as_deref(), Some("Not found."));
    }

    #[test]
    fn test_error_envelope_without_message_uses_code() {
        let envelope: ErrorEnvelope = serde_json::from_str(r#"{"success": false, "error": 422}"#).unwrap();
        assert_eq!(envelope.into_message().as_deref(), Some("error 422"));

        let empty: ErrorEnvelope = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(empty.into_message(), None);
    }

    #[test]
    fn test_categories_response() {
        let json = r#"{"categories": [{"id": 1, "type": "Science"}, {"id": 2, "type": "Art"}], "success": true}"#;
        let response: CategoriesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.categories, vec![Category::new(1, "Science"), Category::new(2, "Art")]);
    }

    #[test]
    fn test_create_question_response() {
        let json = r#"{
            "success": true,
            "question_created": 24,
            "questions": [],
            "total_questions": 20,
            "search": null
        }"#;
        let response: CreateQuestionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.question_created, 24);
        assert_eq!(response.total_questions, 20);
    }

    #[test]
    fn test_quiz_response_with_and_without_question() {
        let json = r#"{
            "success": true,
            "question": {"id": 12, "question": "Q", "answer": "A", "category": 3, "difficulty": 2},
            "total_questions": 4
        }"#;
        let response: QuizResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.question.map(|q| q.id), Some(12));
        assert_eq!(response.total_questions, 4);

        let done: QuizResponse =
            serde_json::from_str(r#"{"success": true, "question": null, "total_questions": 0}"#).unwrap();
        assert!(done.question.is_none());
    }
}
