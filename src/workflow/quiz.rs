//! 答题流程 - 流程层
//!
//! 每轮最多 `QUESTIONS_PER_PLAY` 道题，从后端逐道随机抽取，
//! 已出过的题目 id 随请求一起发送，保证同一轮内不重复。
//! 与 `QuestionBrowser` 的状态互不影响。

use tracing::{debug, info};

use crate::clients::TriviaApi;
use crate::error::ApiResult;
use crate::models::{Category, Question, QuizRequest};

/// 每轮的题目数
pub const QUESTIONS_PER_PLAY: usize = 5;

/// 一轮答题
#[derive(Debug, Clone)]
pub struct QuizSession {
    category: Category,
    previous_questions: Vec<u32>,
    current: Option<Question>,
    num_correct: u32,
    exhausted: bool,
}

impl QuizSession {
    /// 只从 `category` 中抽题
    pub fn new(category: Category) -> Self {
        Self {
            category,
            previous_questions: Vec::new(),
            current: None,
            num_correct: 0,
            exhausted: false,
        }
    }

    /// 不限分类
    pub fn all_categories() -> Self {
        Self::new(Category::new(QuizRequest::ALL_CATEGORIES, "All"))
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn num_correct(&self) -> u32 {
        self.num_correct
    }

    /// 已经出过的题目数
    pub fn asked(&self) -> usize {
        self.previous_questions.len()
    }

    pub fn current(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// 题数已满，或后端没有可抽的题目
    pub fn is_finished(&self) -> bool {
        self.current.is_none() && (self.exhausted || self.asked() >= QUESTIONS_PER_PLAY)
    }

    /// 抽下一道题
    ///
    /// 本轮结束时返回 `Ok(None)`，不再发请求。请求失败时会话保持原样，可以重试。
    pub async fn next_question<A: TriviaApi>(&mut self, api: &A) -> ApiResult<Option<&Question>> {
        if self.is_finished() {
            return Ok(None);
        }

        let request = QuizRequest {
            previous_questions: self.previous_questions.clone(),
            quiz_category: self.category.clone(),
        };
        let response = api.next_quiz_question(&request).await?;
        debug!(
            "分类 {} 剩余 {} 道可抽题目",
            self.category.label, response.total_questions
        );

        match response.question {
            Some(question) => {
                self.previous_questions.push(question.id);
                self.current = Some(question);
            }
            None => {
                info!("🏁 分类 {} 没有更多题目", self.category.label);
                self.exhausted = true;
                self.current = None;
            }
        }
        Ok(self.current.as_ref())
    }

    /// 提交当前题目的答案，返回是否答对；没有当前题目时返回 `None`
    pub fn submit_answer(&mut self, guess: &str) -> Option<bool> {
        let question = self.current.take()?;
        let correct = answer_matches(&question.answer_text, guess);
        if correct {
            self.num_correct += 1;
        }
        Some(correct)
    }
}

/// 答案里的每个词都出现在回答中即算对（忽略大小写和标点）
pub fn answer_matches(answer: &str, guess: &str) -> bool {
    let guess = normalize(guess);
    if guess.is_empty() {
        return false;
    }
    normalize(answer)
        .split_whitespace()
        .all(|word| guess.contains(word))
}

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
