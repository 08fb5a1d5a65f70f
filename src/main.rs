use anyhow::Result;
use dotenv::dotenv;
use env_logger::Env;

use retailcalcbot::bot::start_bot;
use retailcalcbot::config::Settings;
use retailcalcbot::utils::Logger;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载环境变量
    dotenv().ok();

    // 初始化日志，RUST_LOG 未设置时默认 info
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    Logger::log_operation_start("RetailCalcBot", "Initializing application");

    // 加载配置
    let settings = match Settings::new() {
        Ok(s) => {
            Logger::log_operation_success("Configuration", "Settings loaded successfully");
            s
        }
        Err(e) => {
            Logger::log_operation_failure("Configuration", &e.to_string());
            return Err(e.into());
        }
    };

    Logger::log_settings(&settings);

    // 占位 token 时 start_bot 直接返回，不会创建客户端
    if let Err(e) = start_bot(settings).await {
        let stage = if e.is_fatal() {
            "Configuration validation"
        } else {
            "TelegramBot"
        };
        Logger::log_operation_failure(stage, &e.to_string());
        return Err(e.into());
    }

    Ok(())
}
