//! 目录数据模型
//!
//! 字段与远端目录 API 的返回对齐（asin / product_title / ...）；
//! 未声明的远端字段通过 flatten 原样透传，保证信封里的 data 与远端负载一致。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 搜索结果条目（一页中的一条）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub asin: String,
    pub product_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_star_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_num_ratings: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    /// 缩略图
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_photo: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 单品详情
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub asin: String,
    pub product_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_star_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_num_ratings: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub product_photos: Vec<String>,
    /// 卖点列表（自由文本）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub about_product: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
    /// 规格键值对
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub product_information: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
