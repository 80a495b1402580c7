use serde::{Deserialize, Serialize};

use crate::sim::{ConnectionType, HandshakeSegment, Phase, Protocol, Side};

/// 可视化事件类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VizEventKind {
    /// 开始一次运行（封装已构建）
    Start {
        connection: ConnectionType,
        protocol: Protocol,
        /// 第 1 层上线路的总字节数
        wire_bytes: usize,
    },
    /// 握手步骤变化（前进/后退/回到握手）
    Handshake { segment: Option<HandshakeSegment> },
    /// 层步骤变化；`side` 为调用方给出的方向提示
    Step { side: Option<Side> },
    /// 运行中修改配置导致封装重建
    Rebuild { wire_bytes: usize },
    /// 回到 idle，丢弃封装
    Reset,
}

/// 一个可回放的事件（JSON），记录转换之后的状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizEvent {
    pub seq: u64,
    pub phase: Phase,
    pub step: u8,
    pub handshake_step: u8,
    /// 当前选中的 OSI 层号（未选中为 None）
    pub layer: Option<u8>,
    #[serde(flatten)]
    pub kind: VizEventKind,
}

/// 一个简单的事件收集器（存内存，运行结束写 JSON 文件）
#[derive(Debug, Default)]
pub struct VizLogger {
    pub events: Vec<VizEvent>,
}

impl VizLogger {
    pub fn push(&mut self, ev: VizEvent) {
        self.events.push(ev);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.events)
    }
}
