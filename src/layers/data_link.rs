//! 第 2 层：数据链路层（Ethernet II：14 字节头 + 4 字节 FCS）

use super::LayerOutput;
use crate::net::{HeaderField, MacAddr, to_spaced_hex};

pub const ETHERNET_HEADER_LEN: usize = 14;
pub const ETHERNET_FCS_LEN: usize = 4;
pub const ETHERTYPE_IPV4: u16 = 0x0800;
/// 简化的帧校验序列（不计算 CRC）
pub const FCS_PLACEHOLDER: [u8; ETHERNET_FCS_LEN] = [0x12, 0x34, 0x56, 0x78];

pub fn build_data_link(payload: &[u8]) -> LayerOutput {
    let dst = MacAddr::DEST;
    let src = MacAddr::SRC;

    let mut bytes = Vec::with_capacity(ETHERNET_HEADER_LEN + payload.len() + ETHERNET_FCS_LEN);
    bytes.extend_from_slice(&dst.octets());
    bytes.extend_from_slice(&src.octets());
    bytes.extend_from_slice(&ETHERTYPE_IPV4.to_be_bytes());
    bytes.extend_from_slice(payload);
    bytes.extend_from_slice(&FCS_PLACEHOLDER);

    let fields = vec![
        HeaderField::with_hex("Dest MAC", dst.to_string(), to_spaced_hex(&bytes[0..6])),
        HeaderField::with_hex("Src MAC", src.to_string(), to_spaced_hex(&bytes[6..12])),
        HeaderField::with_hex(
            "Type",
            format!("IPv4 ({ETHERTYPE_IPV4:#06x})"),
            to_spaced_hex(&bytes[12..14]),
        ),
        HeaderField::new("Payload", format!("IP packet ({} bytes)", payload.len())),
        HeaderField::with_hex(
            "FCS",
            format!("Frame Check Sequence ({ETHERNET_FCS_LEN} bytes)"),
            to_spaced_hex(&FCS_PLACEHOLDER),
        ),
    ];
    LayerOutput { bytes, fields }
}
