//! 字节 / 十六进制 / 二进制编解码
//!
//! 纯函数，无状态。空输入得到空输出。

use crate::error::CodecError;

/// 二进制展示时每行默认字节数
pub const DEFAULT_BINARY_GROUP: usize = 4;
/// 十六进制展示时每行默认字节数
pub const DEFAULT_HEX_LINE: usize = 16;

/// 文本 -> UTF-8 字节序列
pub fn encode_text(s: &str) -> Vec<u8> {
    s.as_bytes().to_vec()
}

/// 字节 -> 紧凑十六进制（每字节两位小写，无分隔符）
pub fn to_compact_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// 字节 -> 以空格分隔的十六进制（`"1a 2b 3c"`），用于头部字段展示
pub fn to_spaced_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 紧凑十六进制 -> 字节；`to_compact_hex` 的逆运算
pub fn decode_hex(hex: &str) -> Result<Vec<u8>, CodecError> {
    if hex.len() % 2 != 0 {
        return Err(CodecError::OddLength(hex.len()));
    }
    hex::decode(hex).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, index } => {
            CodecError::InvalidDigit { ch: c, index }
        }
        _ => CodecError::OddLength(hex.len()),
    })
}

/// 单个字节的 8 位二进制
pub fn byte_bits(b: u8) -> String {
    format!("{b:08b}")
}

/// 字节 -> 分行二进制：每字节 8 位、空格连接，每 `group_size` 字节换行。
pub fn to_formatted_binary(bytes: &[u8], group_size: usize) -> String {
    bytes
        .chunks(group_size.max(1))
        .map(|line| line.iter().map(|&b| byte_bits(b)).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 紧凑十六进制 -> 分行展示形式（字节对以空格分隔，每 `bytes_per_line` 字节换行）。
///
/// 仅用于阅读；尺寸和相等性比较始终使用紧凑形式。末尾落单的一位十六进制原样保留。
pub fn format_hex_for_display(hex: &str, bytes_per_line: usize) -> String {
    let pairs: Vec<&str> = hex
        .as_bytes()
        .chunks(2)
        .filter_map(|pair| std::str::from_utf8(pair).ok())
        .collect();
    pairs
        .chunks(bytes_per_line.max(1))
        .map(|line| line.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 紧凑十六进制 -> 分行二进制
pub fn hex_to_formatted_binary(hex: &str, group_size: usize) -> Result<String, CodecError> {
    let bytes = decode_hex(hex)?;
    Ok(to_formatted_binary(&bytes, group_size))
}

/// 按字符数截断并补省略号（仅用于展示）
pub fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &s[..cut]),
        None => s.to_string(),
    }
}
