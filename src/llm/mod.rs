//! LLM 层：客户端抽象与实现（OpenAI 兼容 / DeepSeek / Mock）

pub mod mock;
pub mod openai;
pub mod traits;

pub use mock::MockLlmClient;
pub use openai::OpenAiClient;
pub use traits::{LlmClient, Message, Role};

use crate::config::RankingSection;

/// DeepSeek 提供 OpenAI 兼容接口
pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
pub const DEEPSEEK_CHAT: &str = "deepseek-chat";

/// 按配置创建重排序用的 LLM 客户端
///
/// - provider = deepseek：优先 `DEEPSEEK_API_KEY`，模型默认 deepseek-chat
/// - 其他：`OPENAI_API_KEY`，base_url 可指向任意 OpenAI 兼容端点
pub fn create_client(cfg: &RankingSection) -> OpenAiClient {
    if cfg.provider == "deepseek" {
        let api_key = std::env::var("DEEPSEEK_API_KEY")
            .ok()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .unwrap_or_else(|| "sk-placeholder".to_string());
        let model = cfg.model.clone().unwrap_or_else(|| DEEPSEEK_CHAT.to_string());
        let base_url = cfg.base_url.as_deref().unwrap_or(DEEPSEEK_BASE_URL);
        return OpenAiClient::new(Some(base_url), &model, Some(api_key.as_str()));
    }

    let model = cfg.model.clone().unwrap_or_else(|| "gpt-4o-mini".to_string());
    OpenAiClient::new(cfg.base_url.as_deref(), &model, None)
}
