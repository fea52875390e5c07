//! 调度器
//!
//! dispatch 主流程：Received → Classified → Resolved → Validated → Invoked → {Succeeded | Failed}，
//! 任一步失败直接短路为 Failed，本层不重试；远端失败对外只给通用文案，原因进日志；
//! 每次调用输出一条 JSON 审计日志。

use std::sync::Arc;
use std::time::Instant;

use serde_json::{Map, Value};

use crate::actions::{validate_args, ActionKind, ActionRegistry};
use crate::catalog::{CatalogClient, CatalogError, HttpCatalogClient};
use crate::config::AppConfig;
use crate::core::DispatchError;
use crate::dispatch::result::{new_request_id, ActionRequest, ActionResult};
use crate::intent::IntentClassifier;
use crate::rank::{LlmReranker, Reranker};

/// 调度器：只读注册表 + 协作方句柄；无共享可变状态，可并发调用
pub struct Dispatcher {
    registry: ActionRegistry,
    classifier: IntentClassifier,
    catalog: Arc<dyn CatalogClient>,
    reranker: Option<Arc<dyn Reranker>>,
}

impl Dispatcher {
    pub fn new(
        registry: ActionRegistry,
        classifier: IntentClassifier,
        catalog: Arc<dyn CatalogClient>,
    ) -> Self {
        Self {
            registry,
            classifier,
            catalog,
            reranker: None,
        }
    }

    /// 挂载可选的重排序协作方（尽力而为，失败回退原始顺序）
    pub fn with_reranker(mut self, reranker: Arc<dyn Reranker>) -> Self {
        self.reranker = Some(reranker);
        self
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// 处理一次用户输入，返回统一信封
    pub async fn dispatch(&self, text: &str) -> ActionResult {
        let request_id = new_request_id();
        let start = Instant::now();

        let result = self.run(&request_id, text).await;

        let (ok, outcome): (bool, &str) = match &result {
            Ok(_) => (true, "ok"),
            Err(DispatchError::Understanding) => (false, "not_understood"),
            Err(DispatchError::UnknownAction(_)) => (false, "unknown_action"),
            Err(DispatchError::Validation(_)) => (false, "invalid_args"),
            Err(DispatchError::Remote(_)) => (false, "remote_error"),
        };
        let duration_ms = start.elapsed().as_millis() as u64;
        let audit = serde_json::json!({
            "event": "dispatch_audit",
            "request_id": request_id,
            "ok": ok,
            "outcome": outcome,
            "duration_ms": duration_ms,
            "input_preview": input_preview(text),
        });
        tracing::info!(audit = %audit.to_string(), "dispatch");

        match result {
            Ok(data) => ActionResult::success(request_id, data),
            Err(e) => ActionResult::error(request_id, e.to_string()),
        }
    }

    /// 分类 → 解析 → 校验 → 调用；任一步出错即返回对应 DispatchError
    async fn run(&self, request_id: &str, text: &str) -> Result<Value, DispatchError> {
        let matched = self
            .classifier
            .classify(text)
            .ok_or(DispatchError::Understanding)?;
        let request = ActionRequest {
            id: request_id.to_string(),
            action: matched.action.as_str().to_string(),
            args: matched.args,
        };
        tracing::debug!(request_id = %request.id, action = %request.action, "intent classified");

        let action = self
            .registry
            .resolve(&request.action)
            .ok_or_else(|| DispatchError::UnknownAction(request.action.clone()))?;

        let args = validate_args(&action.schema, &request.args)?;

        self.invoke(action.kind, &args).await
    }

    async fn invoke(
        &self,
        kind: ActionKind,
        args: &Map<String, Value>,
    ) -> Result<Value, DispatchError> {
        match kind {
            ActionKind::SearchCatalog => {
                let query = str_arg(args, "query");
                let page = args.get("page").and_then(Value::as_u64).unwrap_or(1) as u32;
                let region = str_arg(args, "region");

                let mut items = self.catalog.search(query, page, region).await.map_err(|e| {
                    tracing::warn!(error = %e, "catalog search failed");
                    DispatchError::Remote(e)
                })?;

                if let Some(reranker) = &self.reranker {
                    match reranker.rerank(query, &items).await {
                        Ok(ranked) => items = ranked,
                        // 重排序尽力而为：失败保持远端原始顺序
                        Err(e) => tracing::warn!(error = %e, "rerank failed, keeping original order"),
                    }
                }

                to_payload(&items)
            }
            ActionKind::GetItemDetail => {
                let identifier = str_arg(args, "identifier");
                let region = str_arg(args, "region");

                let detail = self
                    .catalog
                    .item_detail(identifier, region)
                    .await
                    .map_err(|e| {
                        tracing::warn!(error = %e, "catalog detail failed");
                        DispatchError::Remote(e)
                    })?;

                to_payload(&detail)
            }
        }
    }
}

/// 按配置组装调度器：HTTP 目录客户端 + 标准注册表 + 分类器 +（可选）LLM 重排序
pub fn create_dispatcher(config: &AppConfig) -> Dispatcher {
    let home_region = config.catalog.home_region.as_str();
    let catalog = Arc::new(HttpCatalogClient::new(&config.catalog));

    let mut dispatcher = Dispatcher::new(
        ActionRegistry::standard(home_region),
        IntentClassifier::new(home_region),
        catalog,
    );

    if config.ranking.enabled {
        let llm = Arc::new(crate::llm::create_client(&config.ranking));
        dispatcher = dispatcher.with_reranker(Arc::new(LlmReranker::new(llm)));
    }

    dispatcher
}

/// 校验后的参数一定存在且类型正确，缺省空串仅为防御
fn str_arg<'a>(args: &'a Map<String, Value>, name: &str) -> &'a str {
    args.get(name).and_then(Value::as_str).unwrap_or("")
}

fn to_payload<T: serde::Serialize>(value: &T) -> Result<Value, DispatchError> {
    serde_json::to_value(value)
        .map_err(|e| DispatchError::Remote(CatalogError::Decode(e.to_string())))
}

fn input_preview(text: &str) -> String {
    if text.chars().count() > 80 {
        format!("{}...", text.chars().take(80).collect::<String>())
    } else {
        text.to_string()
    }
}
