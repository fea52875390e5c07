//! 意图识别模块
//!
//! 按固定顺序的规则把用户文本映射到动作，首条命中即返回；不调用 LLM，不做模糊匹配，
//! 同一输入总是产生同一结果。规则顺序即优先级，详情查询先于搜索。

use regex::Regex;
use serde_json::{json, Map, Value};

use crate::actions::ActionKind;

/// 商品编号 token：10 位字母数字，大小写不敏感
const ITEM_ID_PATTERN: &str = r"\b[A-Za-z0-9]{10}\b";

/// 识别结果：动作 + 原始参数（未校验）
#[derive(Debug, Clone, PartialEq)]
pub struct IntentMatch {
    pub action: ActionKind,
    pub args: Map<String, Value>,
}

/// 意图识别器：持有编译好的编号正则与默认地区
pub struct IntentClassifier {
    item_id: Regex,
    home_region: String,
}

impl IntentClassifier {
    pub fn new(home_region: impl Into<String>) -> Self {
        Self {
            item_id: Regex::new(ITEM_ID_PATTERN).unwrap(),
            home_region: home_region.into(),
        }
    }

    /// 识别用户意图；空白输入返回 None（调用方据此报「无法理解」）
    ///
    /// 1. 含商品编号 token，或含 "details" / "more about" 提示词 → 详情查询。
    ///    只命中提示词时 identifier 为空串，由校验器拒绝；恰好含 10 位字母数字
    ///    单词的搜索句也会被劫持到详情查询，这是既定优先级，不做修正。
    /// 2. 其余非空文本 → 目录搜索，query 取原文，page 固定为 1。
    pub fn classify(&self, text: &str) -> Option<IntentMatch> {
        let lowered = text.to_lowercase();

        let id_token = self.item_id.find(text).map(|m| m.as_str());
        if id_token.is_some() || lowered.contains("details") || lowered.contains("more about") {
            let mut args = Map::new();
            args.insert("identifier".to_string(), json!(id_token.unwrap_or("")));
            args.insert("region".to_string(), json!(self.home_region));
            return Some(IntentMatch {
                action: ActionKind::GetItemDetail,
                args,
            });
        }

        if text.trim().is_empty() {
            return None;
        }

        let mut args = Map::new();
        args.insert("query".to_string(), json!(text));
        args.insert("page".to_string(), json!(1));
        args.insert("region".to_string(), json!(self.home_region));
        Some(IntentMatch {
            action: ActionKind::SearchCatalog,
            args,
        })
    }
}
