//! 请求与结果信封
//!
//! ActionResult 无论成败都带 requestId，成功负载与错误文案二选一（由枚举保证，
//! 不会两者皆有或皆无）。requestId 仅用于结果关联，不做幂等。

use serde_json::{json, Map, Value};
use uuid::Uuid;

/// 生成请求标识
pub fn new_request_id() -> String {
    format!("req_{}", Uuid::new_v4().simple())
}

/// 一次已解析、待执行的动作请求；由 Dispatcher 创建并独占
#[derive(Debug, Clone)]
pub struct ActionRequest {
    pub id: String,
    pub action: String,
    pub args: Map<String, Value>,
}

/// 结果负载：成功数据或错误文案，二者必居其一
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    Error(String),
}

/// 统一结果信封
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    pub request_id: String,
    pub outcome: Outcome,
}

impl ActionResult {
    pub fn success(request_id: impl Into<String>, data: Value) -> Self {
        Self {
            request_id: request_id.into(),
            outcome: Outcome::Success(data),
        }
    }

    pub fn error(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            outcome: Outcome::Error(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }

    pub fn data(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Success(data) => Some(data),
            Outcome::Error(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success(_) => None,
            Outcome::Error(message) => Some(message),
        }
    }

    /// 调用方信封：{"requestId", "success", "data" | "error"}
    pub fn to_json(&self) -> Value {
        match &self.outcome {
            Outcome::Success(data) => json!({
                "requestId": self.request_id,
                "success": true,
                "data": data,
            }),
            Outcome::Error(message) => json!({
                "requestId": self.request_id,
                "success": false,
                "error": message,
            }),
        }
    }
}
