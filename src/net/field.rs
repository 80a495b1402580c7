//! 头部字段

use serde::{Deserialize, Serialize};

/// 某一层添加的一个可展示字段（名称 + 值，可选十六进制）。
///
/// 同一层内字段的顺序即真实头部字段的顺序。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderField {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
}

impl HeaderField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            hex: None,
        }
    }

    pub fn with_hex(name: impl Into<String>, value: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            hex: Some(hex.into()),
        }
    }
}

/// 按名称查找字段
pub fn find_field<'a>(fields: &'a [HeaderField], name: &str) -> Option<&'a HeaderField> {
    fields.iter().find(|f| f.name == name)
}
