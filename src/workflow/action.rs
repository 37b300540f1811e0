use std::fmt::Display;

/// 单道题目上可以触发的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionAction {
    Delete,
}

impl QuestionAction {
    /// 解析操作标签，不认识的标签返回 `None`（调用方直接忽略）
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "DELETE" => Some(QuestionAction::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionAction::Delete => "DELETE",
        }
    }
}

impl Display for QuestionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
