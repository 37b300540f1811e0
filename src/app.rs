use crate::clients::{TriviaApi, TriviaClient};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{Category, NewQuestion, QuizRequest};
use crate::services::{ConsoleInput, ConsolePrompter};
use crate::utils::logging::{log_startup, truncate_text};
use crate::workflow::{
    BrowserState, Outcome, QuestionAction, QuestionBrowser, QuizSession, QUESTIONS_PER_PLAY,
};
use std::fmt::Write as _;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

const HELP: &str = "\
命令:
  all               显示全部题目（当前页）
  page N            翻到第 N 页
  category ID       按分类筛选
  search TERM       搜索题干
  delete ID         删除题目
  action ID TAG     对题目执行操作（目前只支持 DELETE）
  add Q | A | CATEGORY | DIFFICULTY
                    新建题目（难度 1-5）
  categories        列出全部分类
  quiz [CATEGORY]   开始一轮答题（不填分类则不限）
  show              重新显示当前状态
  help              显示帮助
  quit              退出";

/// 应用主结构
pub struct App {
    browser: QuestionBrowser<TriviaClient, ConsolePrompter>,
    input: ConsoleInput,
    updates: watch::Receiver<Arc<BrowserState>>,
}

impl App {
    /// 初始化应用并加载第一页
    pub async fn initialize(config: Config) -> AppResult<Self> {
        log_startup(&config);

        let input = ConsoleInput::stdin();
        let client = TriviaClient::new(&config)?;
        let prompter = ConsolePrompter::new(input.clone());
        let browser = QuestionBrowser::new(client, prompter, config.response_ordering);
        let updates = browser.subscribe();

        if browser.initialize().await != Outcome::Applied {
            warn!("⚠️ 首页加载失败，可以输入 all 重试");
        }

        Ok(Self {
            browser,
            input,
            updates,
        })
    }

    /// 运行交互循环，直到输入 quit 或 EOF
    pub async fn run(&mut self) -> AppResult<()> {
        println!("{}", render_state(&self.updates.borrow_and_update()));
        println!("输入 help 查看命令");

        while let Some(line) = self.input.read_line("> ").await? {
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    println!("{}", message);
                    continue;
                }
            };

            if command == Command::Quit {
                break;
            }
            match self.execute(command).await {
                Ok(()) => {}
                Err(e @ AppError::Io(_)) => return Err(e),
                Err(e) => {
                    debug!("命令失败: {:?}", e);
                    println!("{}", e);
                }
            }
            self.render_if_changed();
        }

        info!("👋 退出");
        Ok(())
    }

    /// 执行一条命令
    ///
    /// 浏览器操作自己提示失败；这里返回的错误由交互循环显示。
    async fn execute(&self, command: Command) -> AppResult<()> {
        let outcome = match command {
            Command::All => self.browser.show_all().await,
            Command::Page(page) => self.browser.select_page(page).await?,
            Command::Category(id) => self.browser.select_category(id).await,
            Command::Search(term) => self.browser.submit_search(&term).await,
            Command::Add(question) => self.browser.add_question(&question).await,
            Command::Action { question_id, tag } => match QuestionAction::parse(&tag) {
                Some(action) => self.browser.dispatch(question_id, action).await,
                None => {
                    debug!("忽略未知操作 {} (题目 {})", tag, question_id);
                    return Ok(());
                }
            },
            Command::Categories => return self.print_categories().await,
            Command::Quiz(category_id) => return self.play_quiz(category_id).await,
            Command::Show => {
                println!("{}", render_state(&self.browser.state()));
                return Ok(());
            }
            Command::Help => {
                println!("{}", HELP);
                return Ok(());
            }
            Command::Quit => return Ok(()),
        };
        debug!("命令结果: {:?}", outcome);
        Ok(())
    }

    async fn print_categories(&self) -> AppResult<()> {
        let response = self.browser.api().list_categories().await?;
        for category in &response.categories {
            println!("  {:>3}. {}", category.id, category.label);
        }
        Ok(())
    }

    /// 一轮答题：逐道出题、读取答案、显示对错，最后显示得分
    async fn play_quiz(&self, category_id: Option<u32>) -> AppResult<()> {
        let api = self.browser.api();
        let mut session = match category_id {
            None | Some(QuizRequest::ALL_CATEGORIES) => QuizSession::all_categories(),
            Some(id) => {
                let categories = api.list_categories().await?.categories;
                match Category::find(&categories, id) {
                    Some(category) => QuizSession::new(category.clone()),
                    None => {
                        println!("没有 id 为 {} 的分类", id);
                        return Ok(());
                    }
                }
            }
        };
        info!("🎯 开始答题: {}", session.category().label);

        loop {
            let question = match session.next_question(api).await? {
                Some(question) => question.clone(),
                None => break,
            };
            println!(
                "\n第 {}/{} 题: {}",
                session.asked(),
                QUESTIONS_PER_PLAY,
                question.prompt_text
            );

            let Some(guess) = self.input.read_line("答案> ").await? else {
                break;
            };
            match session.submit_answer(&guess) {
                Some(true) => println!("✓ 回答正确"),
                Some(false) => println!("✗ 回答错误，正确答案: {}", question.answer_text),
                None => {}
            }
        }

        println!("本轮得分: {}/{}", session.num_correct(), session.asked());
        Ok(())
    }

    fn render_if_changed(&mut self) {
        if self.updates.has_changed().unwrap_or(false) {
            println!("{}", render_state(&self.updates.borrow_and_update()));
        }
    }
}

// ========== 命令解析 ==========

/// 终端命令
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    All,
    Page(u32),
    Category(u32),
    Search(String),
    Action { question_id: u32, tag: String },
    Add(NewQuestion),
    Categories,
    Quiz(Option<u32>),
    Show,
    Help,
    Quit,
}

impl Command {
    /// 解析一行输入；空行返回 `Ok(None)`
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "all" => Command::All,
            "page" => Command::Page(parse_number(rest, "page N")?),
            "category" => Command::Category(parse_number(rest, "category ID")?),
            "search" => Command::Search(rest.to_string()),
            "delete" => Command::Action {
                question_id: parse_number(rest, "delete ID")?,
                tag: QuestionAction::Delete.as_str().to_string(),
            },
            "action" => {
                let (id, tag) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "用法: action ID TAG".to_string())?;
                Command::Action {
                    question_id: parse_number(id, "action ID TAG")?,
                    tag: tag.trim().to_ascii_uppercase(),
                }
            }
            "add" => Command::Add(parse_new_question(rest)?),
            "categories" => Command::Categories,
            "quiz" if rest.is_empty() => Command::Quiz(None),
            "quiz" => Command::Quiz(Some(parse_number(rest, "quiz [CATEGORY]")?)),
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("未知命令: {}（输入 help 查看命令）", other)),
        };
        Ok(Some(command))
    }
}

fn parse_number<T: std::str::FromStr>(text: &str, usage: &str) -> Result<T, String> {
    text.trim()
        .parse()
        .map_err(|_| format!("用法: {}", usage))
}

/// `题干 | 答案 | 分类 | 难度`
fn parse_new_question(text: &str) -> Result<NewQuestion, String> {
    const USAGE: &str = "add 题干 | 答案 | 分类 | 难度";

    let parts: Vec<&str> = text.split('|').map(str::trim).collect();
    let &[prompt, answer, category, difficulty] = parts.as_slice() else {
        return Err(format!("用法: {}", USAGE));
    };
    if prompt.is_empty() || answer.is_empty() {
        return Err("题干和答案不能为空".to_string());
    }

    let category_id = parse_number(category, USAGE)?;
    let difficulty: u8 = parse_number(difficulty, USAGE)?;
    if !NewQuestion::DIFFICULTY_RANGE.contains(&difficulty) {
        return Err(format!("难度必须在 1 到 5 之间，收到 {}", difficulty));
    }
    Ok(NewQuestion::new(prompt, answer, category_id, difficulty))
}

// ========== 渲染 ==========

/// 把状态渲染为终端文本：分类菜单、题目列表、分页
fn render_state(state: &BrowserState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "分类:");
    for category in state.categories() {
        let marker = if state.active_category().map(|c| c.id) == Some(category.id) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(out, " {} {:>3}. {}", marker, category.id, category.label);
    }
    if let Some(term) = state.active_search() {
        let _ = writeln!(out, "上次搜索: \"{}\"", term);
    }

    let _ = writeln!(out, "{}", "─".repeat(60));
    let _ = writeln!(
        out,
        "题目 ({}, 共 {} 道):",
        state.mode(),
        state.total_items()
    );
    if state.items().is_empty() {
        let _ = writeln!(out, "  (无)");
    }
    for question in state.items() {
        let category = state.category_label(question.category_id).unwrap_or("?");
        let _ = writeln!(
            out,
            "  [{}] {}",
            question.id,
            truncate_text(&question.prompt_text, 70)
        );
        let _ = writeln!(
            out,
            "       答案: {} | 分类: {} | 难度: {}",
            question.answer_text, category, question.difficulty
        );
    }

    let _ = writeln!(out, "{}", "─".repeat(60));
    let _ = write!(out, "分页:");
    for link in state.pagination().links() {
        if link.active {
            let _ = write!(out, " [{}]", link.number);
        } else {
            let _ = write!(out, " {}", link.number);
        }
    }
    out
}
