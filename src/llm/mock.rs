//! Mock LLM 客户端（用于测试，无需 API）
//!
//! 返回构造时给定的固定回复，便于测试重排序的解析与回退逻辑。

use async_trait::async_trait;

use crate::llm::{LlmClient, Message};

/// Mock 客户端：固定回复
#[derive(Debug, Default)]
pub struct MockLlmClient {
    response: String,
}

impl MockLlmClient {
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _messages: &[Message]) -> Result<String, String> {
        Ok(self.response.clone())
    }
}
