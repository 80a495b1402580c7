//! 每层的封装记录

use serde::Serialize;

use crate::layers::{LayerMeta, PduName};
use crate::net::{DEFAULT_BINARY_GROUP, HeaderField, to_compact_hex, to_formatted_binary};

/// 一段载荷的多种表示：大小、完整十六进制、分行二进制、可读形式
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadView {
    /// 原始字节（不序列化，JSON 里只保留 hex）
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub size_bytes: usize,
    pub hex: String,
    pub binary: String,
    pub human_readable: String,
}

impl PayloadView {
    pub fn new(bytes: Vec<u8>, human_readable: impl Into<String>) -> Self {
        Self {
            size_bytes: bytes.len(),
            hex: to_compact_hex(&bytes),
            binary: to_formatted_binary(&bytes, DEFAULT_BINARY_GROUP),
            human_readable: human_readable.into(),
            bytes,
        }
    }
}

/// 某一 OSI 层在一次运行中产生的完整数据
#[derive(Debug, Clone, Serialize)]
pub struct LayerEncapsulation {
    pub layer_number: u8,
    pub layer_name: &'static str,
    pub pdu_name: PduName,
    /// 本层添加的字段（真实值）
    pub header_fields: Vec<HeaderField>,
    /// 上一层载荷的截断十六进制（第 7 层为 `[User message]`）
    pub payload_from_upper_layer: String,
    pub input: PayloadView,
    pub output: PayloadView,
    /// 本层做了什么（一句话）
    pub what_happened: &'static str,
    /// 仅第 1 层：前 8 字节的比特
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits_preview: Option<String>,
    pub description: &'static str,
    pub protocols: &'static [&'static str],
    pub hardware: &'static [&'static str],
}

impl LayerEncapsulation {
    pub(crate) fn new(
        meta: &'static LayerMeta,
        header_fields: Vec<HeaderField>,
        payload_from_upper_layer: String,
        input: PayloadView,
        output: PayloadView,
        what_happened: &'static str,
    ) -> Self {
        Self {
            layer_number: meta.number,
            layer_name: meta.name,
            pdu_name: meta.pdu,
            header_fields,
            payload_from_upper_layer,
            input,
            output,
            what_happened,
            bits_preview: None,
            description: meta.description,
            protocols: meta.protocols,
            hardware: meta.hardware,
        }
    }

    /// 本层添加的头 + 尾字节数
    pub fn added_bytes(&self) -> usize {
        self.output.size_bytes.saturating_sub(self.input.size_bytes)
    }
}

/// 一次运行的 7 条记录（下标 0 = 第 7 层，下标 6 = 第 1 层）。
///
/// 构建后不可变；新的配置会产生全新的列表。
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Encapsulation {
    layers: Vec<LayerEncapsulation>,
}

impl Encapsulation {
    pub(crate) fn from_layers(layers: Vec<LayerEncapsulation>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[LayerEncapsulation] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// 按下标取记录（0 = 应用层）
    pub fn get(&self, index: usize) -> Option<&LayerEncapsulation> {
        self.layers.get(index)
    }

    /// 按 OSI 层号（1..=7）取记录
    pub fn layer(&self, number: u8) -> Option<&LayerEncapsulation> {
        self.layers.iter().find(|l| l.layer_number == number)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LayerEncapsulation> {
        self.layers.iter()
    }
}
