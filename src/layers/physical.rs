//! 第 1 层：物理层
//!
//! 不添加任何字节，只把帧重新表达为比特。

use crate::net::{HeaderField, byte_bits};
use crate::sim::SimulationConfig;

/// 比特预览覆盖的字节数
pub const BITS_PREVIEW_BYTES: usize = 8;

#[derive(Debug, Clone)]
pub struct PhysicalOutput {
    /// 前 8 字节的二进制，空格分隔
    pub bits_preview: String,
    pub fields: Vec<HeaderField>,
}

pub fn build_physical(config: &SimulationConfig, frame: &[u8]) -> PhysicalOutput {
    let bits_preview = frame
        .iter()
        .take(BITS_PREVIEW_BYTES)
        .map(|&b| byte_bits(b))
        .collect::<Vec<_>>()
        .join(" ");
    let total = frame.len();

    let fields = vec![
        HeaderField::new("Medium", config.medium.signal_label()),
        HeaderField::new("First 8 bytes (bits)", bits_preview.clone()),
        HeaderField::new("Total frame size", format!("{total} bytes = {} bits", total * 8)),
    ];
    PhysicalOutput {
        bits_preview,
        fields,
    }
}
