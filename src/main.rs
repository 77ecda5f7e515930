use anyhow::Result;
use scam_quiz_corpus::utils::logging;
use scam_quiz_corpus::{App, Config};

fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config)?.run()?;

    Ok(())
}
