//! 线路层辅助模块
//!
//! 此模块包含与协议无关的基础工具：字节/十六进制/二进制编解码、地址解析以及头部字段类型。

// 子模块声明
mod addr;
mod codec;
mod field;

// 重新导出公共接口
pub use addr::{
    DEFAULT_DEST_ADDRESS, DEFAULT_SOURCE_ADDRESS, FALLBACK_IPV4, MacAddr, dotted_quad, parse_ipv4,
};
pub use codec::{
    DEFAULT_BINARY_GROUP, DEFAULT_HEX_LINE, byte_bits, decode_hex, encode_text,
    format_hex_for_display, hex_to_formatted_binary, preview, to_compact_hex,
    to_formatted_binary, to_spaced_hex,
};
pub use field::{HeaderField, find_field};
