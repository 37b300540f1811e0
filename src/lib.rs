//! # Trivia Browser
//!
//! 题库浏览客户端：分页浏览、按分类筛选、搜索、增删题目，以及答题
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 持有 HTTP 客户端，只暴露后端接口
//! - `TriviaApi` - 后端能力的抽象，`TriviaClient` 是 reqwest 实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 与用户的终端交互
//! - `Prompter` - 确认删除、显示失败提示
//! - `ConsoleInput` - 交互循环与确认共用的异步行读取器
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 题目浏览状态机
//! - `BrowserState` - 不可变状态快照
//! - `QuestionBrowser` - 决定请求什么、如何写入状态（带请求序号）
//! - `QuizSession` - 一轮答题，独立于浏览状态
//!
//! ### ④ 编排层（App）
//! - `app` - 终端交互循环，解析命令并渲染状态
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{TriviaApi, TriviaClient};
pub use config::{Config, ResponseOrdering};
pub use error::{ApiError, AppError, AppResult, TransitionError};
pub use models::{Category, NewQuestion, Question, QuizRequest};
pub use services::{ConsoleInput, ConsolePrompter, Prompter};
pub use workflow::{
    BrowserState, DisplayMode, Outcome, QuestionAction, QuestionBrowser, QuizSession,
};
