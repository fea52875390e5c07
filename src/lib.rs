//! Maimai - Rust 商品搜索助手
//!
//! 模块划分：
//! - **actions**: 封闭动作集合（目录搜索 / 商品详情）与参数校验
//! - **catalog**: 远端目录客户端（HTTP / Mock）与数据模型
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 调度错误类型
//! - **dispatch**: 调度器与统一结果信封
//! - **intent**: 规则式意图识别
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / DeepSeek / Mock）
//! - **rank**: 可选的 LLM 相关性重排序

pub mod actions;
pub mod catalog;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod intent;
pub mod llm;
pub mod rank;

pub use dispatch::{create_dispatcher, Dispatcher};
