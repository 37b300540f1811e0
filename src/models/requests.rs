//! 发往后端的请求体

use super::Category;
use serde::Serialize;

/// `POST /questions` 新建题目的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewQuestion {
    #[serde(rename = "question")]
    pub prompt_text: String,
    #[serde(rename = "answer")]
    pub answer_text: String,
    #[serde(rename = "category")]
    pub category_id: u32,
    pub difficulty: u8,
}

impl NewQuestion {
    /// 难度的取值范围
    pub const DIFFICULTY_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

    pub fn new(
        prompt_text: impl Into<String>,
        answer_text: impl Into<String>,
        category_id: u32,
        difficulty: u8,
    ) -> Self {
        Self {
            prompt_text: prompt_text.into(),
            answer_text: answer_text.into(),
            category_id,
            difficulty,
        }
    }
}

/// `POST /quizzes` 的请求体
///
/// `quiz_category.id == 0` 表示不限分类。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizRequest {
    pub previous_questions: Vec<u32>,
    pub quiz_category: Category,
}

impl QuizRequest {
    /// 不限分类时使用的 id
    pub const ALL_CATEGORIES: u32 = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_question_uses_backend_field_names() {
        let body = serde_json::to_value(NewQuestion::new("Who?", "Me", 2, 4)).unwrap();
        assert_eq!(
            body,
            json!({"question": "Who?", "answer": "Me", "category": 2, "difficulty": 4})
        );
    }

    #[test]
    fn test_quiz_request_shape() {
        let request = QuizRequest {
            previous_questions: vec![3, 9],
            quiz_category: Category::new(QuizRequest::ALL_CATEGORIES, "All"),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"previous_questions": [3, 9], "quiz_category": {"id": 0, "type": "All"}})
        );
    }
}
