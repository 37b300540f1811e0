//! 终端输入服务 - 业务能力层
//!
//! 交互循环和确认提示都从同一个 stdin 读取，共用一个行读取器。

use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// 按行读取终端输入（非阻塞）
///
/// 克隆后仍指向同一个读取器。
pub struct ConsoleInput<R = BufReader<Stdin>> {
    lines: Arc<Mutex<Lines<R>>>,
}

impl ConsoleInput {
    /// 读取进程的标准输入
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> ConsoleInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: Arc::new(Mutex::new(reader.lines())),
        }
    }

    /// 打印提示后读取一行；输入结束时返回 `Ok(None)`
    pub async fn read_line(&self, prompt: &str) -> io::Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;
        self.lines.lock().await.next_line().await
    }
}

impl<R> Clone for ConsoleInput<R> {
    fn clone(&self) -> Self {
        Self {
            lines: Arc::clone(&self.lines),
        }
    }
}
