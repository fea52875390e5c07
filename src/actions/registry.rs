//! 动作注册表
//!
//! 支持的动作是编译期封闭集合（目录搜索 / 商品详情），每个动作带有序参数 schema；
//! 注册表在进程启动时构建一次，之后只读，由 Dispatcher 按名称解析。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// 支持的动作（封闭枚举，运行期不增删）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SearchCatalog,
    GetItemDetail,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::SearchCatalog => "search_catalog",
            ActionKind::GetItemDetail => "get_item_detail",
        }
    }
}

/// 参数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    Str,
    PositiveInt,
}

impl ArgType {
    fn label(&self) -> &'static str {
        match self {
            ArgType::Str => "string",
            ArgType::PositiveInt => "positive integer",
        }
    }
}

/// 单个参数声明；必填参数无默认值，可选参数必有默认值（由 ArgumentSchema 的构造方法保证）
#[derive(Debug, Clone)]
pub struct ArgSpec {
    pub required: bool,
    pub ty: ArgType,
    pub default: Option<Value>,
}

/// 有序参数 schema：按声明顺序校验，保证「第一条校验失败信息」稳定
#[derive(Debug, Clone, Default)]
pub struct ArgumentSchema {
    specs: Vec<(String, ArgSpec)>,
}

impl ArgumentSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: &str, ty: ArgType) -> Self {
        self.specs.push((
            name.to_string(),
            ArgSpec {
                required: true,
                ty,
                default: None,
            },
        ));
        self
    }

    pub fn optional(mut self, name: &str, ty: ArgType, default: Value) -> Self {
        self.specs.push((
            name.to_string(),
            ArgSpec {
                required: false,
                ty,
                default: Some(default),
            },
        ));
        self
    }

    pub fn specs(&self) -> &[(String, ArgSpec)] {
        &self.specs
    }
}

/// 动作：名称（kind）、描述、参数 schema；绑定的远端操作由 kind 决定
#[derive(Debug, Clone)]
pub struct Action {
    pub kind: ActionKind,
    pub description: &'static str,
    pub schema: ArgumentSchema,
}

/// 动作注册表：按名称存储 Action，支持 register / resolve / action_names
pub struct ActionRegistry {
    actions: HashMap<String, Action>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// 标准注册表：search_catalog 与 get_item_detail，region 默认取配置的主场地区
    pub fn standard(home_region: &str) -> Self {
        let mut registry = Self::new();
        registry.register(Action {
            kind: ActionKind::SearchCatalog,
            description: "Search the product catalog. Args: {\"query\": \"...\", \"page\": 1, \"region\": \"IN\"}",
            schema: ArgumentSchema::new()
                .required("query", ArgType::Str)
                .optional("page", ArgType::PositiveInt, json!(1))
                .optional("region", ArgType::Str, json!(home_region)),
        });
        registry.register(Action {
            kind: ActionKind::GetItemDetail,
            description: "Fetch details for one catalog item. Args: {\"identifier\": \"B0...\", \"region\": \"IN\"}",
            schema: ArgumentSchema::new()
                .required("identifier", ArgType::Str)
                .optional("region", ArgType::Str, json!(home_region)),
        });
        registry
    }

    pub fn register(&mut self, action: Action) {
        self.actions.insert(action.kind.as_str().to_string(), action);
    }

    pub fn resolve(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn action_names(&self) -> Vec<String> {
        self.actions.keys().cloned().collect()
    }

    /// 动作目录 JSON（名称、描述、参数），供 REPL :actions 输出
    pub fn to_schema_json(&self) -> String {
        let actions: Vec<Value> = self
            .actions
            .values()
            .map(|action| {
                let args: Vec<Value> = action
                    .schema
                    .specs()
                    .iter()
                    .map(|(name, spec)| {
                        json!({
                            "name": name,
                            "required": spec.required,
                            "type": spec.ty.label(),
                            "default": spec.default,
                        })
                    })
                    .collect();
                json!({
                    "name": action.kind.as_str(),
                    "description": action.description,
                    "arguments": args,
                })
            })
            .collect();
        serde_json::to_string_pretty(&actions).unwrap_or_else(|_| "[]".to_string())
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_resolves_both_actions() {
        let registry = ActionRegistry::standard("IN");

        let search = registry.resolve("search_catalog").unwrap();
        assert_eq!(search.kind, ActionKind::SearchCatalog);

        let detail = registry.resolve("get_item_detail").unwrap();
        assert_eq!(detail.kind, ActionKind::GetItemDetail);

        assert!(registry.resolve("delete_everything").is_none());
    }

    #[test]
    fn test_region_default_follows_home_region() {
        let registry = ActionRegistry::standard("US");
        let action = registry.resolve("search_catalog").unwrap();

        let (_, region) = action
            .schema
            .specs()
            .iter()
            .find(|(name, _)| name == "region")
            .unwrap();
        assert_eq!(region.default, Some(json!("US")));
        assert!(!region.required);
    }

    #[test]
    fn test_schema_json_lists_actions_and_arguments() {
        let registry = ActionRegistry::standard("IN");
        let schema = registry.to_schema_json();

        assert!(schema.contains("search_catalog"));
        assert!(schema.contains("get_item_detail"));
        assert!(schema.contains("query"));
        assert!(schema.contains("identifier"));
        assert!(schema.contains("positive integer"));
    }
}
