//! 题库 API 客户端
//!
//! 封装所有与题库后端相关的 HTTP 调用

use crate::clients::TriviaApi;
use crate::config::Config;
use crate::error::{ApiError, ApiResult, ConfigError};
use crate::models::{
    CategoriesResponse, CategoryQuestionsResponse, CreateQuestionResponse, ErrorEnvelope,
    NewQuestion, QuestionPageResponse, QuizRequest, QuizResponse, SearchResponse,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// 题库 API 客户端
#[derive(Debug, Clone)]
pub struct TriviaClient {
    client: reqwest::Client,
    base_url: String,
}

impl TriviaClient {
    /// 创建新的题库客户端
    ///
    /// 客户端开启 cookie 存储，后端下发的会话 cookie 会随后续请求一起发送。
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        if let Some(token) = &config.api_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ConfigError::EnvVarParseFailed {
                    var_name: "TRIVIA_API_TOKEN".to_string(),
                    value: "<hidden>".to_string(),
                    expected_type: "header value".to_string(),
                })?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ConfigError::HttpClientBuildFailed)?;

        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 发送请求，检查状态码并解析 JSON
    async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let body = self.send(endpoint, request).await?;
        parse_body(endpoint, &body)
    }

    /// 发送请求，返回成功响应的原始文本
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> ApiResult<String> {
        debug!("请求 {}", endpoint);

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        debug!("响应 {} -> {}", endpoint, status);

        check_status(endpoint, status, &body)?;
        Ok(body)
    }
}

impl TriviaApi for TriviaClient {
    async fn list_questions(&self, page: u32) -> ApiResult<QuestionPageResponse> {
        let endpoint = format!("/questions?page={}", page);
        let request = self
            .client
            .get(self.url("/questions"))
            .query(&[("page", page)]);
        self.send_json(&endpoint, request).await
    }

    async fn questions_by_category(&self, category_id: u32) -> ApiResult<CategoryQuestionsResponse> {
        let endpoint = format!("/categories/{}/questions", category_id);
        let request = self.client.get(self.url(&endpoint));
        self.send_json(&endpoint, request).await
    }

    async fn search_questions(&self, term: &str) -> ApiResult<SearchResponse> {
        let endpoint = format!("/questions?search={}", term);
        let request = self
            .client
            .post(self.url("/questions"))
            .query(&[("search", term)])
            .json(&json!({ "search": term }));
        self.send_json(&endpoint, request).await
    }

    async fn delete_question(&self, question_id: u32) -> ApiResult<()> {
        let endpoint = format!("/questions/{}", question_id);
        let request = self.client.delete(self.url(&endpoint));
        // 响应体（被删除的 id、剩余题目）不需要
        self.send(&endpoint, request).await.map(|_| ())
    }

    async fn list_categories(&self) -> ApiResult<CategoriesResponse> {
        let request = self.client.get(self.url("/categories"));
        self.send_json("/categories", request).await
    }

    async fn create_question(&self, question: &NewQuestion) -> ApiResult<CreateQuestionResponse> {
        let request = self.client.post(self.url("/questions")).json(question);
        self.send_json("/questions", request).await
    }

    async fn next_quiz_question(&self, request: &QuizRequest) -> ApiResult<QuizResponse> {
        let builder = self.client.post(self.url("/quizzes")).json(request);
        self.send_json("/quizzes", builder).await
    }
}

/// 非 2xx 视为失败；能解析出后端错误信封时带上其中的 message
fn check_status(endpoint: &str, status: StatusCode, body: &str) -> ApiResult<()> {
    if status.is_success() {
        return Ok(());
    }

    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(ErrorEnvelope::into_message);

    Err(ApiError::BadStatus {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        message,
    })
}

fn parse_body<T: DeserializeOwned>(endpoint: &str, body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|source| ApiError::JsonParseFailed {
        endpoint: endpoint.to_string(),
        source,
    })
}
