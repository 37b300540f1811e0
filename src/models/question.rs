use serde::{Deserialize, Serialize};

/// 单道题目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    /// 题干，后端字段名为 `question`
    #[serde(rename = "question")]
    pub prompt_text: String,
    /// 答案，后端字段名为 `answer`
    #[serde(rename = "answer")]
    pub answer_text: String,
    /// 所属分类 id，后端字段名为 `category`
    #[serde(rename = "category")]
    pub category_id: u32,
    pub difficulty: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{
            "id": 9,
            "question": "What boxer's original name is Cassius Clay?",
            "answer": "Muhammad Ali",
            "category": 4,
            "difficulty": 1
        }"#;

        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.id, 9);
        assert_eq!(question.answer_text, "Muhammad Ali");
        assert_eq!(question.category_id, 4);
        assert_eq!(question.difficulty, 1);
    }
}
