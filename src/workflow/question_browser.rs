//! 题目浏览流程 - 流程层
//!
//! 核心职责：决定向后端请求什么，以及如何把响应写入状态
//!
//! 所有操作都以 `&self` 调用，可以并发等待。每个会改写状态的请求
//! 在发出前领取一个递增的序号；响应返回时，只有序号仍是最新的才会被应用
//! （`ResponseOrdering::LastArrival` 下不做这个检查）。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::clients::TriviaApi;
use crate::config::ResponseOrdering;
use crate::error::{ApiError, TransitionError};
use crate::models::NewQuestion;
use crate::services::Prompter;
use crate::workflow::action::QuestionAction;
use crate::workflow::browser_state::{BrowserState, DisplayMode};
use crate::workflow::pagination::Pagination;

/// 请求失败时显示给用户的提示
pub const REQUEST_FAILED_NOTICE: &str = "Unable to load questions. Please try your request again";

/// 新建题目失败时的提示
pub const ADD_FAILED_NOTICE: &str = "Unable to add question. Please try your request again";

/// 删除前的确认提示
pub const DELETE_CONFIRMATION: &str = "are you sure you want to delete the question?";

/// 一次操作的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 响应已写入状态
    Applied,
    /// 响应到达时已有更新的请求发出，响应被丢弃
    Superseded,
    /// 请求失败，已提示用户，状态未变
    Failed,
    /// 用户取消了操作，没有发出请求
    Declined,
}

/// 题目浏览器
///
/// - 持有唯一的状态值，外部只能读取快照或订阅变化
/// - 只依赖 `TriviaApi` 与 `Prompter` 两种能力
pub struct QuestionBrowser<A, P> {
    api: A,
    prompter: P,
    ordering: ResponseOrdering,
    state: watch::Sender<Arc<BrowserState>>,
    latest_request: AtomicU64,
}

impl<A: TriviaApi, P: Prompter> QuestionBrowser<A, P> {
    /// 创建新的浏览器，状态为空
    pub fn new(api: A, prompter: P, ordering: ResponseOrdering) -> Self {
        let (state, _) = watch::channel(Arc::new(BrowserState::default()));
        Self {
            api,
            prompter,
            ordering,
            state,
            latest_request: AtomicU64::new(0),
        }
    }

    /// 当前状态快照
    pub fn state(&self) -> Arc<BrowserState> {
        self.state.borrow().clone()
    }

    /// 订阅状态变化（每次应用响应后通知，用于重新渲染）
    pub fn subscribe(&self) -> watch::Receiver<Arc<BrowserState>> {
        self.state.subscribe()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// 首次加载：第 1 页的全部题目
    pub async fn initialize(&self) -> Outcome {
        info!("🚀 加载第 1 页题目...");
        self.fetch_all_page(1).await
    }

    /// 回到全部题目模式，重新加载当前页
    pub async fn show_all(&self) -> Outcome {
        let page = self.state().page();
        info!("📋 显示全部题目 (第 {} 页)", page);
        self.fetch_all_page(page).await
    }

    /// 翻页
    ///
    /// 只在全部题目模式下有效，页码必须在 `[1, max(1, 总页数)]` 内；
    /// 否则直接返回错误，不发请求。
    pub async fn select_page(&self, page: u32) -> Result<Outcome, TransitionError> {
        let state = self.state();
        if *state.mode() != DisplayMode::AllPaged {
            return Err(TransitionError::NotPaged);
        }

        let max_page = state.pagination().max_selectable_page();
        if page == 0 || page > max_page {
            return Err(TransitionError::PageOutOfRange { page, max_page });
        }

        info!("📄 翻到第 {}/{} 页", page, max_page);
        Ok(self.fetch_all_page(page).await)
    }

    /// 按分类筛选
    pub async fn select_category(&self, category_id: u32) -> Outcome {
        let ticket = self.next_ticket();
        info!("🗂️ 加载分类 #{} 的题目...", category_id);

        match self.api.questions_by_category(category_id).await {
            Ok(response) => {
                debug!(
                    "分类 #{} 返回 {} 道题目 (共 {} 道)",
                    category_id,
                    response.questions.len(),
                    response.total_questions
                );
                if response.current_category.id() != category_id {
                    warn!(
                        "请求分类 #{}，后端返回的当前分类为 #{}",
                        category_id,
                        response.current_category.id()
                    );
                }
                self.apply(ticket, |state| state.with_category(category_id, response))
            }
            Err(e) => self.fail(e),
        }
    }

    /// 提交搜索
    pub async fn submit_search(&self, term: &str) -> Outcome {
        let ticket = self.next_ticket();
        info!("🔍 搜索 \"{}\"...", term);

        match self.api.search_questions(term).await {
            Ok(response) => {
                debug!(
                    "搜索 \"{}\" 返回 {} 道题目 (共 {} 道)",
                    term,
                    response.questions.len(),
                    response.total_questions
                );
                self.apply(ticket, |state| state.with_search(term, response))
            }
            Err(e) => self.fail(e),
        }
    }

    /// 删除题目
    ///
    /// 需要用户确认。删除成功后总是重新加载全部题目的当前页，
    /// 不论之前处于哪种显示模式。
    pub async fn delete_question(&self, question_id: u32) -> Outcome {
        if !self.prompter.confirm(DELETE_CONFIRMATION).await {
            info!("用户取消删除题目 {}", question_id);
            return Outcome::Declined;
        }

        info!("🗑️ 删除题目 {}...", question_id);
        if let Err(e) = self.api.delete_question(question_id).await {
            return self.fail(e);
        }
        info!("✓ 题目 {} 已删除", question_id);

        let page = self.page_after_delete();
        self.fetch_all_page(page).await
    }

    /// 新建题目
    ///
    /// 成功后与删除一样重新加载全部题目的当前页。
    pub async fn add_question(&self, question: &NewQuestion) -> Outcome {
        info!("➕ 新建题目 (分类 #{}, 难度 {})...", question.category_id, question.difficulty);
        match self.api.create_question(question).await {
            Ok(created) => info!(
                "✓ 题目 {} 已创建 (共 {} 道)",
                created.question_created, created.total_questions
            ),
            Err(e) => return self.fail_with(e, ADD_FAILED_NOTICE),
        }

        let page = self.state().page();
        self.fetch_all_page(page).await
    }

    /// 分发单道题目上的操作
    pub async fn dispatch(&self, question_id: u32, action: QuestionAction) -> Outcome {
        match action {
            QuestionAction::Delete => self.delete_question(question_id).await,
        }
    }

    // ========== 内部方法 ==========

    async fn fetch_all_page(&self, page: u32) -> Outcome {
        let ticket = self.next_ticket();

        match self.api.list_questions(page).await {
            Ok(response) => {
                debug!(
                    "第 {} 页返回 {} 道题目 (共 {} 道, {} 个分类)",
                    page,
                    response.list_of_questions.len(),
                    response.total_questions,
                    response.categories.len()
                );
                self.apply(ticket, |state| state.with_all_page(page, response))
            }
            Err(e) => self.fail(e),
        }
    }

    /// 删除后要重新加载的页码
    ///
    /// 按最近一次全部题目的总数计算：如果删掉的是最后一页唯一的题目，
    /// 退回到新的最后一页。与当前显示模式无关。
    fn page_after_delete(&self) -> u32 {
        let state = self.state();
        let remaining = state.paged_total().saturating_sub(1);
        state
            .page()
            .min(Pagination::new(remaining, state.page()).max_selectable_page())
    }

    fn next_ticket(&self) -> u64 {
        self.latest_request.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// 应用一次响应；检查序号与替换状态在同一把锁内完成
    fn apply(&self, ticket: u64, transition: impl FnOnce(&BrowserState) -> BrowserState) -> Outcome {
        let applied = self.state.send_if_modified(|current| {
            if self.ordering == ResponseOrdering::Sequenced
                && self.latest_request.load(Ordering::SeqCst) != ticket
            {
                return false;
            }
            *current = Arc::new(transition(&**current));
            true
        });

        if applied {
            Outcome::Applied
        } else {
            debug!("丢弃过期响应 (请求序号 {})", ticket);
            Outcome::Superseded
        }
    }

    fn fail(&self, error: ApiError) -> Outcome {
        self.fail_with(error, REQUEST_FAILED_NOTICE)
    }

    fn fail_with(&self, error: ApiError, notice: &str) -> Outcome {
        warn!("❌ 请求失败: {}", error);
        self.prompter.alert(notice);
        Outcome::Failed
    }
}
