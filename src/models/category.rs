use serde::{Deserialize, Serialize};

/// 题目分类
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    /// 分类名称，后端字段名为 `type`
    #[serde(rename = "type")]
    pub label: String,
}

impl Category {
    pub fn new(id: u32, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    /// 后端只给出了 id、本地分类列表里又找不到时使用
    pub fn unlabeled(id: u32) -> Self {
        Self {
            id,
            label: format!("#{}", id),
        }
    }

    /// 在分类列表中按 id 查找
    pub fn find(categories: &[Category], id: u32) -> Option<&Category> {
        categories.iter().find(|c| c.id == id)
    }
}
