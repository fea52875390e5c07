//! 调度错误类型
//!
//! 四类错误在 Dispatcher 边界统一转为结果信封：理解失败 / 未知动作 / 参数校验失败 / 远端调用失败。
//! 仅远端失败对调用方脱敏（Display 固定为通用文案，底层原因只进日志）。

use thiserror::Error;

use crate::catalog::CatalogError;

/// 参数校验失败：字段名 + 问题描述（如 "query is required"）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} {problem}")]
pub struct ValidationError {
    pub field: String,
    pub problem: String,
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            problem: "is required".to_string(),
        }
    }

    pub fn invalid(field: impl Into<String>, expected: &str) -> Self {
        Self {
            field: field.into(),
            problem: format!("must be {expected}"),
        }
    }
}

/// 单次 dispatch 过程中可能出现的错误
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("could not understand the request")]
    Understanding,

    /// 防御分支：注册表按名称查找，分类器正常时不应出现
    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("catalog request failed")]
    Remote(#[from] CatalogError),
}
