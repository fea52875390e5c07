//! 调度层：分类 → 解析 → 校验 → 调用 → 统一信封

pub mod dispatcher;
pub mod result;

pub use dispatcher::{create_dispatcher, Dispatcher};
pub use result::{ActionRequest, ActionResult, Outcome};
