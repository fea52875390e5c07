//! 相关性重排序（可选协作方）
//!
//! 用 LLM 对一页搜索结果按相关性打分并重排，条目附带 relevance_score / relevance_reason；
//! 任何失败都返回 Err，由调用方回退到原始顺序，绝不影响 dispatch 的正确性。

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::catalog::ItemSummary;
use crate::llm::{LlmClient, Message};

/// 重排序 trait：输入查询与一页结果，输出重排后的副本；Err 表示放弃本次重排
#[async_trait]
pub trait Reranker: Send + Sync {
    async fn rerank(
        &self,
        query: &str,
        items: &[ItemSummary],
    ) -> Result<Vec<ItemSummary>, String>;
}

/// LLM 打分条目：{"index": 0, "score": 95, "reason": "..."}
#[derive(Debug, Deserialize)]
struct Ranking {
    index: usize,
    score: f64,
    #[serde(default)]
    reason: Option<String>,
}

/// 基于 LLM 的重排序器
pub struct LlmReranker {
    llm: Arc<dyn LlmClient>,
}

impl LlmReranker {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    fn build_prompt(query: &str, items: &[ItemSummary]) -> String {
        let digest: Vec<_> = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                json!({
                    "index": index,
                    "title": item.product_title,
                    "price": item.product_price,
                    "rating": item.product_star_rating,
                })
            })
            .collect();
        format!(
            "Given this search query: \"{}\"\n\n\
             Rank these products by relevance (0-100 score):\n{}\n\n\
             Return JSON array with format: [{{\"index\": 0, \"score\": 95, \"reason\": \"...\"}}, ...]\n\
             Return only valid JSON, no markdown.",
            query,
            serde_json::to_string_pretty(&digest).unwrap_or_else(|_| "[]".to_string())
        )
    }
}

/// 去掉 LLM 偶尔包裹的 ```json 围栏
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

#[async_trait]
impl Reranker for LlmReranker {
    async fn rerank(
        &self,
        query: &str,
        items: &[ItemSummary],
    ) -> Result<Vec<ItemSummary>, String> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let messages = vec![Message::user(Self::build_prompt(query, items))];
        let response = self.llm.complete(&messages).await?;

        let mut rankings: Vec<Ranking> = serde_json::from_str(strip_code_fences(&response))
            .map_err(|e| format!("ranking parse error: {e}"))?;
        rankings.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut ranked = Vec::with_capacity(items.len());
        for ranking in rankings {
            let item = match items.get(ranking.index) {
                Some(item) => item,
                // 越界 index 丢弃，不让一条坏输出废掉整页
                None => continue,
            };
            let mut item = item.clone();
            item.extra
                .insert("relevance_score".to_string(), json!(ranking.score));
            if let Some(reason) = ranking.reason {
                item.extra
                    .insert("relevance_reason".to_string(), json!(reason));
            }
            ranked.push(item);
        }
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlmClient;

    fn item(asin: &str, title: &str) -> ItemSummary {
        ItemSummary {
            asin: asin.to_string(),
            product_title: title.to_string(),
            ..ItemSummary::default()
        }
    }

    fn reranker(response: &str) -> LlmReranker {
        LlmReranker::new(Arc::new(MockLlmClient::with_response(response)))
    }

    #[tokio::test]
    async fn test_rerank_orders_by_score_and_annotates() {
        let items = vec![item("A1", "Cheap Earbuds"), item("A2", "Pro Earbuds")];
        let response = r#"[
            {"index": 0, "score": 40, "reason": "budget option"},
            {"index": 1, "score": 90, "reason": "best match"}
        ]"#;

        let ranked = reranker(response).rerank("earbuds", &items).await.unwrap();

        assert_eq!(ranked[0].asin, "A2");
        assert_eq!(ranked[1].asin, "A1");
        assert_eq!(ranked[0].extra["relevance_score"], json!(90.0));
        assert_eq!(ranked[0].extra["relevance_reason"], json!("best match"));
    }

    #[tokio::test]
    async fn test_rerank_strips_markdown_fences() {
        let items = vec![item("A1", "Earbuds")];
        let response = "```json\n[{\"index\": 0, \"score\": 77}]\n```";

        let ranked = reranker(response).rerank("earbuds", &items).await.unwrap();

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].extra["relevance_score"], json!(77.0));
    }

    #[tokio::test]
    async fn test_rerank_rejects_unparseable_reply() {
        let items = vec![item("A1", "Earbuds")];

        let err = reranker("sorry, I cannot rank these")
            .rerank("earbuds", &items)
            .await
            .unwrap_err();
        assert!(err.contains("ranking parse error"));
    }

    #[tokio::test]
    async fn test_rerank_skips_out_of_range_indices() {
        let items = vec![item("A1", "Earbuds")];
        let response = r#"[{"index": 7, "score": 99}, {"index": 0, "score": 10}]"#;

        let ranked = reranker(response).rerank("earbuds", &items).await.unwrap();

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].asin, "A1");
    }

    #[tokio::test]
    async fn test_rerank_empty_page_short_circuits() {
        let ranked = reranker("ignored").rerank("earbuds", &[]).await.unwrap();
        assert!(ranked.is_empty());
    }
}
