//! 核心层：调度错误与校验错误

pub mod error;

pub use error::{DispatchError, ValidationError};
