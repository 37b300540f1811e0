use anyhow::Result;
use trivia_browser::utils::logging;
use trivia_browser::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let mut app = App::initialize(config).await?;
    app.run().await?;

    Ok(())
}
