//! 题目浏览状态
//!
//! 状态是不可变快照：字段只能通过本模块的转换函数产生新值，
//! 由 `QuestionBrowser` 整体替换。

use crate::models::{
    Category, CategoryQuestionsResponse, Question, QuestionPageResponse, SearchResponse,
};
use crate::workflow::pagination::Pagination;
use std::fmt::Display;

/// 当前显示的题目来自哪种检索方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayMode {
    /// 分页浏览全部题目
    AllPaged,
    /// 某个分类下的题目
    ByCategory(u32),
    /// 搜索结果
    BySearch(String),
}

impl Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayMode::AllPaged => write!(f, "全部题目"),
            DisplayMode::ByCategory(id) => write!(f, "分类 #{}", id),
            DisplayMode::BySearch(term) => write!(f, "搜索 \"{}\"", term),
        }
    }
}

/// 题目浏览状态快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserState {
    items: Vec<Question>,
    page: u32,
    total_items: u32,
    /// 最近一次分页浏览全部题目时的总数
    paged_total: u32,
    categories: Vec<Category>,
    active_category: Option<Category>,
    active_search: Option<String>,
    mode: DisplayMode,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_items: 0,
            paged_total: 0,
            categories: Vec::new(),
            active_category: None,
            active_search: None,
            mode: DisplayMode::AllPaged,
        }
    }
}

impl BrowserState {
    pub fn items(&self) -> &[Question] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    /// 最近一次分页浏览全部题目时的总数（不随分类、搜索变化）
    pub fn paged_total(&self) -> u32 {
        self.paged_total
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn active_category(&self) -> Option<&Category> {
        self.active_category.as_ref()
    }

    pub fn active_search(&self) -> Option<&str> {
        self.active_search.as_deref()
    }

    pub fn mode(&self) -> &DisplayMode {
        &self.mode
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.total_items, self.page)
    }

    /// 按 id 查分类名称
    pub fn category_label(&self, category_id: u32) -> Option<&str> {
        Category::find(&self.categories, category_id).map(|c| c.label.as_str())
    }

    // ========== 状态转换 ==========

    /// 分页浏览全部题目的响应
    ///
    /// 每次都把 `active_category` 设为返回的第一个分类。
    pub(crate) fn with_all_page(&self, page: u32, response: QuestionPageResponse) -> Self {
        let active_category = response.categories.first().cloned();
        Self {
            items: response.list_of_questions,
            page,
            total_items: response.total_questions,
            paged_total: response.total_questions,
            categories: response.categories,
            active_category,
            active_search: self.active_search.clone(),
            mode: DisplayMode::AllPaged,
        }
    }

    /// 按分类查询的响应
    ///
    /// 页码不重置，只在超出新结果的页数时收紧到最后一页。
    pub(crate) fn with_category(&self, category_id: u32, response: CategoryQuestionsResponse) -> Self {
        let active_category = response.current_category.resolve(&self.categories);
        Self {
            items: response.questions,
            page: self.page_within(response.total_questions),
            total_items: response.total_questions,
            active_category: Some(active_category),
            mode: DisplayMode::ByCategory(category_id),
            ..self.clone_without_items()
        }
    }

    /// 搜索的响应；`active_category` 保持不变，页码同 `with_category`
    pub(crate) fn with_search(&self, term: &str, response: SearchResponse) -> Self {
        Self {
            items: response.questions,
            page: self.page_within(response.total_questions),
            total_items: response.total_questions,
            active_search: Some(term.to_string()),
            mode: DisplayMode::BySearch(term.to_string()),
            ..self.clone_without_items()
        }
    }

    fn page_within(&self, total_items: u32) -> u32 {
        self.page
            .min(Pagination::new(total_items, self.page).max_selectable_page())
    }

    // 旧的题目列表马上会被替换，不必复制
    fn clone_without_items(&self) -> Self {
        Self {
            items: Vec::new(),
            page: self.page,
            total_items: self.total_items,
            paged_total: self.paged_total,
            categories: self.categories.clone(),
            active_category: self.active_category.clone(),
            active_search: self.active_search.clone(),
            mode: self.mode.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CurrentCategory;

    fn question(id: u32, category_id: u32) -> Question {
        Question {
            id,
            prompt_text: format!("question {}", id),
            answer_text: format!("answer {}", id),
            category_id,
            difficulty: 1,
        }
    }

    fn categories() -> Vec<Category> {
        vec![
            Category::new(1, "Science"),
            Category::new(2, "Art"),
            Category::new(3, "Geography"),
        ]
    }

    fn loaded_state() -> BrowserState {
        BrowserState::default().with_all_page(
            2,
            QuestionPageResponse {
                list_of_questions: (11..=20).map(|id| question(id, 1)).collect(),
                total_questions: 25,
                categories: categories(),
            },
        )
    }

    #[test]
    fn test_default_state() {
        let state = BrowserState::default();
        assert_eq!(state.page(), 1);
        assert_eq!(state.total_items(), 0);
        assert!(state.items().is_empty());
        assert_eq!(state.mode(), &DisplayMode::AllPaged);
        assert!(state.active_category().is_none());
    }

    #[test]
    fn test_all_page_selects_first_category() {
        let state = loaded_state();
        assert_eq!(state.page(), 2);
        assert_eq!(state.items().len(), 10);
        assert_eq!(state.total_items(), 25);
        assert_eq!(state.active_category(), Some(&Category::new(1, "Science")));
    }

    #[test]
    fn test_category_replaces_items() {
        let state = loaded_state().with_category(
            3,
            CategoryQuestionsResponse {
                questions: vec![question(30, 3), question(31, 3)],
                total_questions: 2,
                current_category: CurrentCategory::Id(3),
            },
        );

        assert_eq!(state.mode(), &DisplayMode::ByCategory(3));
        assert_eq!(
            state.items().iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![30, 31]
        );
        assert_eq!(state.total_items(), 2);
        assert_eq!(state.paged_total(), 25);
        assert_eq!(state.active_category(), Some(&Category::new(3, "Geography")));
        assert_eq!(state.categories().len(), 3);
    }

    #[test]
    fn test_category_keeps_page_that_still_exists() {
        let state = loaded_state().with_category(
            1,
            CategoryQuestionsResponse {
                questions: (1..=10).map(|id| question(id, 1)).collect(),
                total_questions: 14,
                current_category: CurrentCategory::Id(1),
            },
        );
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn test_smaller_result_pulls_page_back() {
        let state = loaded_state().with_category(
            3,
            CategoryQuestionsResponse {
                questions: vec![question(30, 3)],
                total_questions: 1,
                current_category: CurrentCategory::Id(3),
            },
        );
        assert_eq!(state.page(), 1);
        let active: Vec<u32> = state
            .pagination()
            .links()
            .iter()
            .filter(|l| l.active)
            .map(|l| l.number)
            .collect();
        assert_eq!(active, vec![1]);

        let empty = loaded_state().with_search(
            "nothing",
            SearchResponse {
                questions: Vec::new(),
                total_questions: 0,
            },
        );
        assert_eq!(empty.page(), 1);
    }

    #[test]
    fn test_search_keeps_active_category() {
        let before = loaded_state().with_category(
            2,
            CategoryQuestionsResponse {
                questions: vec![question(40, 2)],
                total_questions: 1,
                current_category: CurrentCategory::Id(2),
            },
        );
        let after = before.with_search(
            "history",
            SearchResponse {
                questions: vec![question(1, 1), question(2, 3), question(3, 2)],
                total_questions: 3,
            },
        );

        assert_eq!(after.items().len(), 3);
        assert_eq!(after.total_items(), 3);
        assert_eq!(after.page(), before.page());
        assert_eq!(after.active_category(), before.active_category());
        assert_eq!(after.active_search(), Some("history"));
        assert_eq!(after.mode(), &DisplayMode::BySearch("history".to_string()));
    }

    #[test]
    fn test_all_page_keeps_stored_search() {
        let searched = loaded_state().with_search(
            "title",
            SearchResponse {
                questions: vec![question(1, 1)],
                total_questions: 1,
            },
        );
        let back = searched.with_all_page(
            1,
            QuestionPageResponse {
                list_of_questions: vec![question(1, 1)],
                total_questions: 25,
                categories: categories(),
            },
        );
        assert_eq!(back.mode(), &DisplayMode::AllPaged);
        assert_eq!(back.active_search(), Some("title"));
    }

    #[test]
    fn test_category_label() {
        let state = loaded_state();
        assert_eq!(state.category_label(2), Some("Art"));
        assert_eq!(state.category_label(9), None);
    }
}
