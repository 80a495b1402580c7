//! 第 5 层：会话层

use super::LayerOutput;
use crate::net::{HeaderField, to_spaced_hex};

/// 固定的会话标识
pub const SESSION_ID: u32 = 0x1a2b_3c4d;
pub const SESSION_HEADER_LEN: usize = 4;

/// 在载荷前加 4 字节会话 ID
pub fn build_session(payload: &[u8]) -> LayerOutput {
    let id = SESSION_ID.to_be_bytes();
    let mut bytes = Vec::with_capacity(SESSION_HEADER_LEN + payload.len());
    bytes.extend_from_slice(&id);
    bytes.extend_from_slice(payload);

    LayerOutput {
        bytes,
        fields: vec![HeaderField::with_hex(
            "Session ID",
            format!("{SESSION_ID:#010x}"),
            to_spaced_hex(&id),
        )],
    }
}
