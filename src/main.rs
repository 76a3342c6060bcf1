use anyhow::Result;
use resume_analyze_submit::utils::logging;
use resume_analyze_submit::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置（优先 config.toml，其次环境变量）
    let config = if std::path::Path::new("config.toml").exists() {
        Config::from_file("config.toml")?
    } else {
        Config::from_env()
    };

    // 初始化并运行应用
    App::initialize(config).run().await?;

    Ok(())
}
