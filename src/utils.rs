use log::{error, info};

use crate::config::{Settings, UpdateMode};

/// 日志记录工具
pub struct Logger;

impl Logger {
    pub fn log_operation_start(operation: &str, details: &str) {
        info!("🚀 Starting {}: {}", operation, details);
    }

    pub fn log_operation_success(operation: &str, details: &str) {
        info!("✅ {} completed successfully: {}", operation, details);
    }

    pub fn log_operation_failure(operation: &str, error: &str) {
        error!("❌ {} failed: {}", operation, error);
    }

    /// 打印生效的配置，token 只显示前缀
    pub fn log_settings(settings: &Settings) {
        info!("📊 Configuration:");
        info!("  - Bot Token: {}", mask_token(&settings.bot_token));
        info!("  - Mini App URL: {}", settings.webapp_url);
        match &settings.mode {
            UpdateMode::Polling => info!("  - Mode: polling"),
            UpdateMode::Webhook { url, addr } => {
                info!("  - Mode: webhook {} (listen {})", url, addr)
            }
        }
        info!("  - Support: {}", settings.support_contact);
        if let Some(api_url) = &settings.api_url {
            info!("  - Bot API server: {}", api_url);
        }
    }
}

/// `123456:ABC-DEF` -> `123456:***`
pub fn mask_token(token: &str) -> String {
    match token.split_once(':') {
        Some((id, _)) => format!("{id}:***"),
        None => "***".to_string(),
    }
}
