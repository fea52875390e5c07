//! 目录 HTTP 客户端
//!
//! GET {base}/search 与 {base}/product-details，请求带 API Key 头与超时；
//! 响应为 { status, data } 信封。search 缺 data.products 视为空页，
//! detail 缺 data 视为响应损坏。API Key 取环境变量 RAPIDAPI_KEY。

use reqwest::Client;
use serde::Deserialize;

use crate::catalog::types::{ItemDetail, ItemSummary};
use crate::catalog::{CatalogClient, CatalogError};
use crate::config::CatalogSection;

/// 远端目录响应信封
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    status: Option<String>,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    #[serde(default)]
    products: Vec<ItemSummary>,
}

/// HTTP 目录客户端：每次调用一个 GET 请求，超时与端点由配置决定
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
    language: Option<String>,
}

impl HttpCatalogClient {
    pub fn new(cfg: &CatalogSection) -> Self {
        let api_key = std::env::var("RAPIDAPI_KEY").unwrap_or_default();
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .default_headers({
                let mut h = reqwest::header::HeaderMap::new();
                if let Ok(v) = api_key.parse() {
                    h.insert("x-rapidapi-key", v);
                }
                if let Ok(v) = cfg.api_host.parse() {
                    h.insert("x-rapidapi-host", v);
                }
                h
            })
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            language: cfg.language.clone(),
        }
    }
}

#[async_trait::async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn search(
        &self,
        query: &str,
        page: u32,
        region: &str,
    ) -> Result<Vec<ItemSummary>, CatalogError> {
        // 远端用 country 命名地区参数
        let mut params = vec![
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("country", region.to_string()),
        ];
        if let Some(language) = &self.language {
            params.push(("language", language.clone()));
        }

        let resp = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&params)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(CatalogError::Status(resp.status()));
        }

        let envelope: Envelope<SearchData> = resp
            .json()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))?;
        tracing::debug!(
            status = envelope.status.as_deref().unwrap_or(""),
            "catalog search response"
        );

        Ok(envelope.data.map(|d| d.products).unwrap_or_default())
    }

    async fn item_detail(
        &self,
        identifier: &str,
        region: &str,
    ) -> Result<ItemDetail, CatalogError> {
        let resp = self
            .client
            .get(format!("{}/product-details", self.base_url))
            .query(&[("asin", identifier), ("country", region)])
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(identifier.to_string()));
        }
        if !resp.status().is_success() {
            return Err(CatalogError::Status(resp.status()));
        }

        let envelope: Envelope<ItemDetail> = resp
            .json()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))?;

        envelope
            .data
            .ok_or_else(|| CatalogError::Decode("missing data in detail response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_search_envelope() {
        let body = r#"{
            "status": "OK",
            "data": {
                "total_products": 2,
                "products": [
                    {
                        "asin": "B0AAAAAA01",
                        "product_title": "Wireless Earbuds",
                        "product_price": "₹1,299",
                        "product_star_rating": "4.3",
                        "product_num_ratings": 1532,
                        "product_photo": "https://img.example/1.jpg",
                        "is_prime": true
                    },
                    {
                        "asin": "B0AAAAAA02",
                        "product_title": "Earbuds Case"
                    }
                ]
            }
        }"#;

        let envelope: Envelope<SearchData> = serde_json::from_str(body).unwrap();
        let products = envelope.data.unwrap().products;

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].asin, "B0AAAAAA01");
        assert_eq!(products[0].product_price.as_deref(), Some("₹1,299"));
        // 未声明的字段透传到 extra
        assert_eq!(products[0].extra["is_prime"], json!(true));
        assert_eq!(products[1].product_price, None);
    }

    #[test]
    fn test_search_without_products_is_empty_page() {
        let envelope: Envelope<SearchData> =
            serde_json::from_str(r#"{"status": "OK", "data": {}}"#).unwrap();
        assert!(envelope.data.unwrap().products.is_empty());

        let envelope: Envelope<SearchData> =
            serde_json::from_str(r#"{"status": "OK"}"#).unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_decode_detail_envelope() {
        let body = r#"{
            "status": "OK",
            "data": {
                "asin": "B0ABCDEFGH",
                "product_title": "Wireless Earbuds",
                "product_price": "₹1,299",
                "product_photos": ["https://img.example/1.jpg", "https://img.example/2.jpg"],
                "about_product": ["40h battery", "IPX5"],
                "product_information": {"Brand": "Acme", "Colour": "Black"}
            }
        }"#;

        let envelope: Envelope<ItemDetail> = serde_json::from_str(body).unwrap();
        let detail = envelope.data.unwrap();

        assert_eq!(detail.asin, "B0ABCDEFGH");
        assert_eq!(detail.product_photos.len(), 2);
        assert_eq!(detail.about_product[1], "IPX5");
        assert_eq!(detail.product_information["Brand"], json!("Acme"));
    }
}
