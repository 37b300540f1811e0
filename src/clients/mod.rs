//! 基础设施层：与后端 API 的交互
//!
//! `TriviaApi` 描述"我能向后端请求什么"，`TriviaClient` 是基于 reqwest 的实现。
//! 流程层只依赖 trait，测试中可以替换为内存实现。

pub mod trivia_client;

pub use trivia_client::TriviaClient;

use crate::error::ApiResult;
use crate::models::{
    CategoriesResponse, CategoryQuestionsResponse, CreateQuestionResponse, NewQuestion,
    QuestionPageResponse, QuizRequest, QuizResponse, SearchResponse,
};
use std::future::Future;

/// 题库后端 API
pub trait TriviaApi {
    /// `GET /questions?page={page}`
    fn list_questions(&self, page: u32)
        -> impl Future<Output = ApiResult<QuestionPageResponse>> + Send;

    /// `GET /categories/{category_id}/questions`
    fn questions_by_category(
        &self,
        category_id: u32,
    ) -> impl Future<Output = ApiResult<CategoryQuestionsResponse>> + Send;

    /// `POST /questions?search={term}`，请求体 `{"search": term}`
    fn search_questions(&self, term: &str)
        -> impl Future<Output = ApiResult<SearchResponse>> + Send;

    /// `DELETE /questions/{question_id}`
    fn delete_question(&self, question_id: u32) -> impl Future<Output = ApiResult<()>> + Send;

    /// `GET /categories`
    fn list_categories(&self) -> impl Future<Output = ApiResult<CategoriesResponse>> + Send;

    /// `POST /questions`，请求体为新题目
    fn create_question(
        &self,
        question: &NewQuestion,
    ) -> impl Future<Output = ApiResult<CreateQuestionResponse>> + Send;

    /// `POST /quizzes`：从指定分类中随机抽一道没出过的题
    fn next_quiz_question(
        &self,
        request: &QuizRequest,
    ) -> impl Future<Output = ApiResult<QuizResponse>> + Send;
}
