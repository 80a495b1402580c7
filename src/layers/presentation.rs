//! 第 6 层：表示层
//!
//! HTTPS 时在前面加 5 字节的 TLS 记录头；否则原样透传。
//!
//! 注意：载荷字节并不会被真正加密，这里只演示记录头的结构。

use super::LayerOutput;
use crate::net::{HeaderField, to_spaced_hex};
use crate::sim::{Protocol, SimulationConfig};

/// TLS 记录头长度
pub const TLS_RECORD_HEADER_LEN: usize = 5;
/// Content type: Application Data
pub const TLS_CONTENT_APPLICATION_DATA: u8 = 0x17;
/// TLS 1.2
pub const TLS_VERSION_1_2: u16 = 0x0303;

pub fn build_presentation(config: &SimulationConfig, payload: &[u8]) -> LayerOutput {
    if config.protocol != Protocol::Https {
        return LayerOutput {
            bytes: payload.to_vec(),
            fields: vec![
                HeaderField::new("Content-Type", "text/plain; charset=UTF-8"),
                HeaderField::new("Encoding", "identity"),
            ],
        };
    }

    // 长度字段只有 16 位，超长载荷按位截断
    let length = (payload.len() & 0xffff) as u16;
    let mut bytes = Vec::with_capacity(TLS_RECORD_HEADER_LEN + payload.len());
    bytes.push(TLS_CONTENT_APPLICATION_DATA);
    bytes.extend_from_slice(&TLS_VERSION_1_2.to_be_bytes());
    bytes.extend_from_slice(&length.to_be_bytes());
    let header = bytes.clone();
    bytes.extend_from_slice(payload);

    let fields = vec![
        HeaderField::with_hex(
            "Content Type",
            format!("Application Data ({TLS_CONTENT_APPLICATION_DATA})"),
            to_spaced_hex(&header[0..1]),
        ),
        HeaderField::with_hex("Version", "TLS 1.2", to_spaced_hex(&header[1..3])),
        HeaderField::with_hex("Length", length_label(length, payload.len()), to_spaced_hex(&header[3..5])),
        HeaderField::new("Encrypted payload", format!("[{} bytes]", payload.len())),
    ];
    LayerOutput { bytes, fields }
}

/// 长度字段的展示值与写入的 16 位一致；截断时注明原始长度
fn length_label(length: u16, actual: usize) -> String {
    if usize::from(length) == actual {
        length.to_string()
    } else {
        format!("{length} (truncated from {actual})")
    }
}
