//! 分页控件
//!
//! 分页信息不单独存储，而是由题目总数和当前页推导出来。

/// 每页题目数
pub const PAGE_SIZE: u32 = 10;

/// 一个页码链接
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub number: u32,
    pub active: bool,
}

/// 由 `total_items` 和 `current_page` 推导出的分页控件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    total_items: u32,
    current_page: u32,
}

impl Pagination {
    pub fn new(total_items: u32, current_page: u32) -> Self {
        Self {
            total_items,
            current_page,
        }
    }

    /// 页码链接数量：ceil(total_items / PAGE_SIZE)
    pub fn page_count(&self) -> u32 {
        self.total_items.div_ceil(PAGE_SIZE)
    }

    /// 允许选择的最大页码；没有题目时仍然允许第 1 页
    pub fn max_selectable_page(&self) -> u32 {
        self.page_count().max(1)
    }

    pub fn links(&self) -> Vec<PageLink> {
        (1..=self.page_count())
            .map(|number| PageLink {
                number,
                active: number == self.current_page,
            })
            .collect()
    }
}
