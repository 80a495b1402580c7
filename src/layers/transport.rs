//! 第 4 层：传输层（20 字节简化 TCP 头）
//!
//! 头部布局：
//!
//! ```text
//!  0..2   source port        2..4   dest port
//!  4..8   sequence number    8..12  acknowledgment number
//!  12     data offset (<<4)  13     flags
//!  14..16 window             16..18 checksum (placeholder)
//!  18..20 urgent pointer
//! ```
//!
//! 每个字段展示的十六进制都直接取自写入的头部字节。

use super::LayerOutput;
use crate::net::{HeaderField, to_spaced_hex};
use crate::sim::{Protocol, SimulationConfig};

pub const TCP_HEADER_LEN: usize = 20;
pub const TCP_INITIAL_SEQ: u32 = 1000;
pub const TCP_FLAG_PSH: u8 = 0x08;
pub const TCP_FLAG_ACK: u8 = 0x10;
pub const TCP_WINDOW: u16 = 65_535;
pub const TCP_CHECKSUM_PLACEHOLDER: u16 = 0xb1c2;

/// 未知协议的目的端口
pub const DEFAULT_DEST_PORT: u16 = 443;

/// 协议 -> 知名端口
pub fn dest_port(protocol: Protocol) -> u16 {
    match protocol {
        Protocol::Https => 443,
        Protocol::Http => 80,
        Protocol::Smtp => 25,
        Protocol::Dns => 53,
        Protocol::Ftp => 21,
        Protocol::Raw => DEFAULT_DEST_PORT,
    }
}

pub fn build_transport(config: &SimulationConfig, payload: &[u8]) -> LayerOutput {
    let src_port = config.resolved_source_port();
    let dst_port = dest_port(config.protocol);
    let ack: u32 = 0;
    let data_offset_words: u8 = (TCP_HEADER_LEN / 4) as u8;
    let flags = TCP_FLAG_PSH | TCP_FLAG_ACK;

    let mut header = [0u8; TCP_HEADER_LEN];
    header[0..2].copy_from_slice(&src_port.to_be_bytes());
    header[2..4].copy_from_slice(&dst_port.to_be_bytes());
    header[4..8].copy_from_slice(&TCP_INITIAL_SEQ.to_be_bytes());
    header[8..12].copy_from_slice(&ack.to_be_bytes());
    header[12] = data_offset_words << 4;
    header[13] = flags;
    header[14..16].copy_from_slice(&TCP_WINDOW.to_be_bytes());
    header[16..18].copy_from_slice(&TCP_CHECKSUM_PLACEHOLDER.to_be_bytes());
    // 18..20: urgent pointer = 0

    let fields = vec![
        HeaderField::with_hex("Source Port", src_port.to_string(), to_spaced_hex(&header[0..2])),
        HeaderField::with_hex("Dest Port", dst_port.to_string(), to_spaced_hex(&header[2..4])),
        HeaderField::with_hex("Seq Number", TCP_INITIAL_SEQ.to_string(), to_spaced_hex(&header[4..8])),
        HeaderField::with_hex("Ack Number", ack.to_string(), to_spaced_hex(&header[8..12])),
        HeaderField::with_hex(
            "Data Offset",
            format!("{} bytes ({data_offset_words})", TCP_HEADER_LEN),
            to_spaced_hex(&header[12..13]),
        ),
        HeaderField::with_hex("Flags", "PSH, ACK", to_spaced_hex(&header[13..14])),
        HeaderField::with_hex("Window", TCP_WINDOW.to_string(), to_spaced_hex(&header[14..16])),
        HeaderField::with_hex(
            "Checksum",
            format!("{TCP_CHECKSUM_PLACEHOLDER:#x}"),
            to_spaced_hex(&header[16..18]),
        ),
        HeaderField::with_hex("Urgent Pointer", "0", to_spaced_hex(&header[18..20])),
    ];

    let mut bytes = Vec::with_capacity(TCP_HEADER_LEN + payload.len());
    bytes.extend_from_slice(&header);
    bytes.extend_from_slice(payload);
    LayerOutput { bytes, fields }
}
