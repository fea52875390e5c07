//! 参数校验器
//!
//! 按 schema 声明顺序逐个检查：必填项缺失或空串即失败，类型不符即失败；
//! 缺失的可选项填默认值，schema 之外的键丢弃。纯函数，无 I/O，幂等。

use serde_json::{Map, Value};

use crate::actions::registry::{ArgType, ArgumentSchema};
use crate::core::ValidationError;

/// 校验并规范化参数；返回仅含 schema 声明键的新映射
pub fn validate_args(
    schema: &ArgumentSchema,
    raw: &Map<String, Value>,
) -> Result<Map<String, Value>, ValidationError> {
    let mut validated = Map::new();

    for (name, spec) in schema.specs() {
        let value = match raw.get(name) {
            None | Some(Value::Null) => {
                if spec.required {
                    return Err(ValidationError::required(name));
                }
                // 可选参数必有默认值（ArgumentSchema 构造保证）
                spec.default.clone().unwrap_or(Value::Null)
            }
            Some(value) => normalize(name, spec.ty, spec.required, value)?,
        };
        validated.insert(name.clone(), value);
    }

    Ok(validated)
}

fn normalize(
    name: &str,
    ty: ArgType,
    required: bool,
    value: &Value,
) -> Result<Value, ValidationError> {
    match ty {
        ArgType::Str => match value {
            Value::String(s) if required && s.trim().is_empty() => {
                Err(ValidationError::required(name))
            }
            Value::String(s) => Ok(Value::String(s.clone())),
            _ => Err(ValidationError::invalid(name, "a string")),
        },
        ArgType::PositiveInt => {
            let parsed = match value {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.trim().parse::<u64>().ok(),
                _ => None,
            };
            match parsed.filter(|n| *n >= 1) {
                Some(n) => Ok(Value::from(n)),
                None => Err(ValidationError::invalid(name, "a positive integer")),
            }
        }
    }
}
