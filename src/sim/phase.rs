//! 仿真阶段与步骤寻址

use serde::{Deserialize, Serialize};

/// 第一个/最后一个层步骤
pub const FIRST_LAYER_STEP: u8 = 1;
pub const LAST_LAYER_STEP: u8 = 7;
/// 步骤 8 表示完成
pub const COMPLETE_STEP: u8 = 8;
/// 三次握手的最后一步
pub const LAST_HANDSHAKE_STEP: u8 = 3;

/// 仿真阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Handshake,
    Sending,
    Receiving,
    Complete,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Handshake => "handshake",
            Phase::Sending => "sending",
            Phase::Receiving => "receiving",
            Phase::Complete => "complete",
        }
    }
}

/// 导航时显式指定的方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Sending,
    Receiving,
}

impl From<Side> for Phase {
    fn from(side: Side) -> Self {
        match side {
            Side::Sending => Phase::Sending,
            Side::Receiving => Phase::Receiving,
        }
    }
}

/// (阶段, 步骤) -> 记录下标。
///
/// 发送：步骤 N -> 下标 N-1（第 8-N 层，自上而下）；
/// 接收：步骤 N -> 下标 7-N（第 N 层，自下而上）。其余情况不选中任何层。
pub fn record_index(phase: Phase, step: u8) -> Option<usize> {
    if !(FIRST_LAYER_STEP..=LAST_LAYER_STEP).contains(&step) {
        return None;
    }
    match phase {
        Phase::Sending => Some(usize::from(step - 1)),
        Phase::Receiving => Some(usize::from(LAST_LAYER_STEP - step)),
        Phase::Idle | Phase::Handshake | Phase::Complete => None,
    }
}

/// 报文方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    ClientToServer,
    ServerToClient,
}

/// 三次握手中的一个报文段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandshakeSegment {
    Syn,
    SynAck,
    Ack,
}

impl HandshakeSegment {
    /// 握手步骤（1..=3）-> 报文段
    pub fn for_step(step: u8) -> Option<HandshakeSegment> {
        match step {
            1 => Some(HandshakeSegment::Syn),
            2 => Some(HandshakeSegment::SynAck),
            3 => Some(HandshakeSegment::Ack),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HandshakeSegment::Syn => "SYN",
            HandshakeSegment::SynAck => "SYN-ACK",
            HandshakeSegment::Ack => "ACK",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            HandshakeSegment::Syn => "Client sends SYN (synchronize) to initiate the connection.",
            HandshakeSegment::SynAck => "Server responds with SYN-ACK (synchronize-acknowledge).",
            HandshakeSegment::Ack => "Client sends ACK (acknowledge). Connection established.",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            HandshakeSegment::Syn | HandshakeSegment::Ack => Direction::ClientToServer,
            HandshakeSegment::SynAck => Direction::ServerToClient,
        }
    }
}
