//! 目录客户端：远端目录 API 的协作方封装
//!
//! Dispatcher 只依赖 CatalogClient trait；HTTP 实现见 http，测试桩见 mock。

pub mod http;
pub mod mock;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpCatalogClient;
pub use mock::MockCatalogClient;
pub use types::{ItemDetail, ItemSummary};

/// 目录调用错误；Dispatcher 对外统一脱敏为通用文案，此处细节仅进日志
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("item not found: {0}")]
    NotFound(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

/// 目录客户端 trait：搜索一页结果 / 查询单品详情
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn search(
        &self,
        query: &str,
        page: u32,
        region: &str,
    ) -> Result<Vec<ItemSummary>, CatalogError>;

    async fn item_detail(&self, identifier: &str, region: &str)
        -> Result<ItemDetail, CatalogError>;
}
