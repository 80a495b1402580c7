//! 错误类型
//!
//! 封装/状态机核心本身是全函数（不会失败）；错误只出现在边缘：
//! 十六进制解码、配置文件加载、以及 CLI 中的枚举名解析。

use thiserror::Error;

/// 顶层错误类型
#[derive(Debug, Error)]
pub enum Error {
    /// 十六进制串解码失败
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// 枚举名（medium/speed/connection）无法识别
    #[error("parse error: {0}")]
    ParseName(#[from] ParseNameError),

    /// 配置文件读取失败
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 配置 JSON 解析 / 输出 JSON 序列化失败
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 十六进制编解码错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("odd hex length {0}: every byte needs two digits")]
    OddLength(usize),

    #[error("invalid hex digit {ch:?} at index {index}")]
    InvalidDigit { ch: char, index: usize },
}

/// 无法识别的枚举名
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} {name:?} (expected one of: {expected})")]
pub struct ParseNameError {
    pub kind: &'static str,
    pub name: String,
    pub expected: &'static str,
}

/// 本 crate 的 Result 别名
pub type Result<T> = std::result::Result<T, Error>;
