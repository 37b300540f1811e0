//! 用户交互服务 - 业务能力层
//!
//! 只负责"确认"和"提示"两种能力，不关心流程

use crate::services::console_input::ConsoleInput;
use std::future::Future;
use tokio::io::{AsyncBufRead, BufReader, Stdin};
use tracing::warn;

/// 与用户的交互
///
/// 职责：
/// - `confirm`：询问用户是否继续，等待用户的选择
/// - `alert`：显示一条必须被看到的提示
pub trait Prompter {
    fn confirm(&self, message: &str) -> impl Future<Output = bool> + Send;
    fn alert(&self, message: &str);
}

/// 终端实现：提示写到 stderr，确认从终端输入读取 y/N
pub struct ConsolePrompter<R = BufReader<Stdin>> {
    input: ConsoleInput<R>,
}

impl<R> ConsolePrompter<R> {
    pub fn new(input: ConsoleInput<R>) -> Self {
        Self { input }
    }
}

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new(ConsoleInput::stdin())
    }
}

impl<R: AsyncBufRead + Unpin + Send> Prompter for ConsolePrompter<R> {
    async fn confirm(&self, message: &str) -> bool {
        match self.input.read_line(&format!("{} [y/N] ", message)).await {
            Ok(Some(answer)) => is_affirmative(&answer),
            Ok(None) => false,
            Err(e) => {
                warn!("⚠️ 读取确认输入失败: {}", e);
                false
            }
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("⚠️ {}", message);
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompter_reading(input: &'static [u8]) -> ConsolePrompter<BufReader<&'static [u8]>> {
        ConsolePrompter::new(ConsoleInput::new(BufReader::new(input)))
    }

    #[test]
    fn test_affirmative_answers() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("  YES "));
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative("no"));
    }

    #[tokio::test]
    async fn test_confirm_reads_answer() {
        let prompter = prompter_reading(b"y\nn\n");
        assert!(prompter.confirm("delete?").await);
        assert!(!prompter.confirm("delete?").await);
        // 输入结束视为否
        assert!(!prompter.confirm("delete?").await);
    }
}
