//! Mock 目录客户端（用于测试，无需网络）
//!
//! 预置每个操作的固定响应或统一失败，并用原子计数器记录调用次数，
//! 供测试断言「未发起远端调用」。

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::catalog::types::{ItemDetail, ItemSummary};
use crate::catalog::{CatalogClient, CatalogError};

/// Mock 客户端：固定响应 + 调用计数
#[derive(Default)]
pub struct MockCatalogClient {
    items: Vec<ItemSummary>,
    detail: Option<ItemDetail>,
    fail: bool,
    pub search_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl MockCatalogClient {
    pub fn with_items(items: Vec<ItemSummary>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn with_detail(detail: ItemDetail) -> Self {
        Self {
            detail: Some(detail),
            ..Self::default()
        }
    }

    /// 所有调用都失败（模拟网络 / 远端错误）
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst) + self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogClient for MockCatalogClient {
    async fn search(
        &self,
        _query: &str,
        _page: u32,
        _region: &str,
    ) -> Result<Vec<ItemSummary>, CatalogError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CatalogError::Decode("simulated catalog failure".to_string()));
        }
        Ok(self.items.clone())
    }

    async fn item_detail(
        &self,
        identifier: &str,
        _region: &str,
    ) -> Result<ItemDetail, CatalogError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CatalogError::Decode("simulated catalog failure".to_string()));
        }
        match &self.detail {
            Some(detail) => Ok(detail.clone()),
            None => Err(CatalogError::NotFound(identifier.to_string())),
        }
    }
}
