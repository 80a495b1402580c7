//! 仿真配置
//!
//! 一次运行的输入。任何字段缺省都有固定的默认值；配置可以随时整体替换。

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ParseNameError, Result};
use crate::net::{DEFAULT_DEST_ADDRESS, DEFAULT_SOURCE_ADDRESS};

/// 消息为空时使用的问候语
pub const DEFAULT_MESSAGE: &str = "Hello, World!";

/// 临时端口区间起点（IANA 49152..=65535）
pub const EPHEMERAL_PORT_BASE: u16 = 49_152;
const EPHEMERAL_PORT_SPAN: u16 = 16_384;
/// 未指定 `source_port` 时的 TCP 源端口
pub const DEFAULT_SOURCE_PORT: u16 = 52_341;

/// 传输介质（只影响展示/元信息，不影响头部字节）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Medium {
    #[default]
    Ethernet,
    Wifi,
    Fiber,
    Coaxial,
    Radio,
}

impl Medium {
    pub const ALL: [Medium; 5] = [
        Medium::Ethernet,
        Medium::Wifi,
        Medium::Fiber,
        Medium::Coaxial,
        Medium::Radio,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Medium::Ethernet => "ethernet",
            Medium::Wifi => "wifi",
            Medium::Fiber => "fiber",
            Medium::Coaxial => "coaxial",
            Medium::Radio => "radio",
        }
    }

    /// 物理层上的信号形式
    pub fn signal_label(self) -> &'static str {
        match self {
            Medium::Ethernet => "Electrical signal (twisted pair)",
            Medium::Wifi => "Radio waves (2.4/5 GHz)",
            Medium::Fiber => "Light pulses (optical)",
            Medium::Coaxial => "Electrical signal (coaxial cable)",
            Medium::Radio => "Electromagnetic waves",
        }
    }
}

impl FromStr for Medium {
    type Err = ParseNameError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Medium::ALL
            .into_iter()
            .find(|m| m.name() == name)
            .ok_or_else(|| ParseNameError {
                kind: "medium",
                name: s.to_string(),
                expected: "ethernet, wifi, fiber, coaxial, radio",
            })
    }
}

/// 应用层协议：决定第 7 层请求形态与第 4 层目的端口。
///
/// 未知名称落到 [`Protocol::Raw`]：应用层原样透传消息，传输层使用 443。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Protocol {
    Http,
    #[default]
    Https,
    Smtp,
    Dns,
    Ftp,
    Raw,
}

impl Protocol {
    pub fn name(self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
            Protocol::Smtp => "smtp",
            Protocol::Dns => "dns",
            Protocol::Ftp => "ftp",
            Protocol::Raw => "raw",
        }
    }

    /// 宽松解析：从不失败
    pub fn from_name(s: &str) -> Protocol {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Protocol::Http,
            "https" => Protocol::Https,
            "smtp" => Protocol::Smtp,
            "dns" => Protocol::Dns,
            "ftp" => Protocol::Ftp,
            other => {
                debug!(protocol = other, "未知协议，按原始数据处理");
                Protocol::Raw
            }
        }
    }
}

impl From<String> for Protocol {
    fn from(s: String) -> Self {
        Protocol::from_name(&s)
    }
}

impl From<Protocol> for String {
    fn from(p: Protocol) -> Self {
        p.name().to_string()
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 动画速度（仅渲染层使用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl FromStr for Speed {
    type Err = ParseNameError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(Speed::Slow),
            "normal" => Ok(Speed::Normal),
            "fast" => Ok(Speed::Fast),
            _ => Err(ParseNameError {
                kind: "speed",
                name: s.to_string(),
                expected: "slow, normal, fast",
            }),
        }
    }
}

/// 连接建立方式：直接发送，或先做三次握手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    #[default]
    Direct,
    Handshake,
}

impl FromStr for ConnectionType {
    type Err = ParseNameError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(ConnectionType::Direct),
            "handshake" => Ok(ConnectionType::Handshake),
            _ => Err(ParseNameError {
                kind: "connection type",
                name: s.to_string(),
                expected: "direct, handshake",
            }),
        }
    }
}

/// 一次仿真运行的配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub message: String,
    pub medium: Medium,
    pub protocol: Protocol,
    pub speed: Speed,
    pub source_address: Option<String>,
    pub dest_address: Option<String>,
    /// 步骤是否随时间自动前进（渲染层）
    pub auto_animate: bool,
    /// 自动播放到结尾后是否从头循环（渲染层）
    pub auto_repeat: bool,
    pub connection_type: ConnectionType,
    /// TCP 源端口种子；解析结果总在临时端口区间内
    pub source_port: Option<u16>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            medium: Medium::default(),
            protocol: Protocol::default(),
            speed: Speed::default(),
            source_address: Some(DEFAULT_SOURCE_ADDRESS.to_string()),
            dest_address: Some(DEFAULT_DEST_ADDRESS.to_string()),
            auto_animate: false,
            auto_repeat: false,
            connection_type: ConnectionType::default(),
            source_port: None,
        }
    }
}

impl SimulationConfig {
    /// 从 JSON 文本解析；缺省字段取默认值
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// 从 JSON 文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// 实际使用的消息（空串回退到问候语）
    pub fn message_or_default(&self) -> &str {
        if self.message.is_empty() {
            DEFAULT_MESSAGE
        } else {
            &self.message
        }
    }

    /// 实际使用的源地址字符串（未解析）
    pub fn source_address_or_default(&self) -> &str {
        non_empty(self.source_address.as_deref()).unwrap_or(DEFAULT_SOURCE_ADDRESS)
    }

    /// 实际使用的目的地址字符串（未解析）
    pub fn dest_address_or_default(&self) -> &str {
        non_empty(self.dest_address.as_deref()).unwrap_or(DEFAULT_DEST_ADDRESS)
    }

    /// 解析后的 TCP 源端口：`49152 + seed % 16384`
    pub fn resolved_source_port(&self) -> u16 {
        let seed = self.source_port.unwrap_or(DEFAULT_SOURCE_PORT);
        EPHEMERAL_PORT_BASE + seed % EPHEMERAL_PORT_SPAN
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}
