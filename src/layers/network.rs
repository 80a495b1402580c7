//! 第 3 层：网络层（20 字节简化 IPv4 头）

use super::LayerOutput;
use crate::net::{HeaderField, dotted_quad, parse_ipv4, to_spaced_hex};
use crate::sim::SimulationConfig;

pub const IPV4_HEADER_LEN: usize = 20;
pub const IPV4_IDENTIFICATION: u16 = 0x1a2b;
/// Don't Fragment
pub const IPV4_FLAG_DF: u16 = 0x4000;
pub const IPV4_TTL: u8 = 64;
/// 只建模 TCP
pub const IPPROTO_TCP: u8 = 6;

/// RFC 791 头部校验和：16 位字的反码和再取反（校验和字段按 0 参与计算）。
pub fn ipv4_checksum(header: &[u8]) -> u16 {
    let mut sum: u32 = header
        .chunks(2)
        .map(|w| u32::from(u16::from_be_bytes([w[0], w.get(1).copied().unwrap_or(0)])))
        .sum();
    while sum > 0xffff {
        sum = (sum & 0xffff) + (sum >> 16);
    }
    !(sum as u16)
}

pub fn build_network(config: &SimulationConfig, payload: &[u8]) -> LayerOutput {
    let src = parse_ipv4(Some(config.source_address_or_default()));
    let dst = parse_ipv4(Some(config.dest_address_or_default()));
    let total_len = ((IPV4_HEADER_LEN + payload.len()) & 0xffff) as u16;

    let mut header = [0u8; IPV4_HEADER_LEN];
    header[0] = (4 << 4) | (IPV4_HEADER_LEN / 4) as u8;
    header[1] = 0; // TOS
    header[2..4].copy_from_slice(&total_len.to_be_bytes());
    header[4..6].copy_from_slice(&IPV4_IDENTIFICATION.to_be_bytes());
    header[6..8].copy_from_slice(&IPV4_FLAG_DF.to_be_bytes());
    header[8] = IPV4_TTL;
    header[9] = IPPROTO_TCP;
    header[12..16].copy_from_slice(&src);
    header[16..20].copy_from_slice(&dst);
    let checksum = ipv4_checksum(&header);
    header[10..12].copy_from_slice(&checksum.to_be_bytes());

    let fields = vec![
        HeaderField::new("Version", "4"),
        HeaderField::new("IHL", format!("{} ({IPV4_HEADER_LEN} bytes)", IPV4_HEADER_LEN / 4)),
        HeaderField::with_hex("Total Length", total_len.to_string(), to_spaced_hex(&header[2..4])),
        HeaderField::with_hex(
            "Identification",
            format!("{IPV4_IDENTIFICATION:#x}"),
            to_spaced_hex(&header[4..6]),
        ),
        HeaderField::with_hex("Flags", "Don't Fragment", to_spaced_hex(&header[6..8])),
        HeaderField::new("TTL", IPV4_TTL.to_string()),
        HeaderField::new("Protocol", format!("TCP ({IPPROTO_TCP})")),
        HeaderField::with_hex("Header Checksum", format!("{checksum:#06x}"), to_spaced_hex(&header[10..12])),
        HeaderField::with_hex("Source IP", dotted_quad(src), to_spaced_hex(&header[12..16])),
        HeaderField::with_hex("Dest IP", dotted_quad(dst), to_spaced_hex(&header[16..20])),
    ];

    let mut bytes = Vec::with_capacity(IPV4_HEADER_LEN + payload.len());
    bytes.extend_from_slice(&header);
    bytes.extend_from_slice(payload);
    LayerOutput { bytes, fields }
}
