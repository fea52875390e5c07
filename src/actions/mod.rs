//! 动作层：封闭动作集合与参数校验

pub mod registry;
pub mod validate;

pub use registry::{Action, ActionKind, ActionRegistry, ArgSpec, ArgType, ArgumentSchema};
pub use validate::validate_args;
