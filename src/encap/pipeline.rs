//! 封装流水线
//!
//! 严格按 7 -> 1 的顺序调用各层构建器，把每层输出的字节作为下一层的输入，
//! 并为每层组装完整记录。纯函数、全函数、确定性：相同配置得到逐字节相同的结果。

use tracing::{debug, trace};

use super::record::{Encapsulation, LayerEncapsulation, PayloadView};
use crate::layers::{
    LAYER_TABLE, SESSION_ID, build_application, build_data_link, build_network, build_physical,
    build_presentation, build_session, build_transport,
};
use crate::net::{HeaderField, encode_text, find_field, preview};
use crate::sim::{Protocol, SimulationConfig};

/// `payload_from_upper_layer` 保留的十六进制字符数
const UPPER_PAYLOAD_PREVIEW_CHARS: usize = 80;

/// 运行完整封装，返回 7 条记录（下标 0 = 第 7 层）
#[tracing::instrument(skip(config), fields(protocol = %config.protocol, medium = config.medium.name()))]
pub fn build_encapsulation(config: &SimulationConfig) -> Encapsulation {
    let msg = config.message_or_default();
    let mut layers = Vec::with_capacity(LAYER_TABLE.len());

    // ── 第 7 层：应用层 ─────────────────────────────────────────────
    let l7 = build_application(config);
    let input = PayloadView::new(encode_text(msg), msg);
    let output = PayloadView::new(l7.bytes, l7.human);
    layers.push(LayerEncapsulation::new(
        &LAYER_TABLE[0],
        l7.fields,
        "[User message]".to_string(),
        input,
        output,
        "Application created the message: request line, headers (Host, Content-Type, Content-Length), and body. Data is ready for the presentation layer.",
    ));

    // ── 第 6 层：表示层 ─────────────────────────────────────────────
    let above = last_output(&layers);
    let l6 = build_presentation(config, &above.bytes);
    let (readable, what) = if config.protocol == Protocol::Https {
        (
            format!(
                "TLS Record | Type: Application Data (23) | Version: TLS 1.2 | Length: {} bytes\n[Encrypted payload: {} bytes]",
                l6.bytes.len(),
                above.size_bytes
            ),
            "TLS record header was added (type, version, length). Application data is prepared for encryption; shown here as encrypted payload placeholder.",
        )
    } else {
        (
            format!(
                "Presentation data | Content-Type: text/plain; charset=UTF-8 | Encoding: identity\n[Payload: {} bytes unchanged]",
                l6.bytes.len()
            ),
            "Content-Type and encoding were set. Data passed through unchanged (no encryption).",
        )
    };
    layers.push(stage(1, above, l6.fields, PayloadView::new(l6.bytes, readable), what));

    // ── 第 5 层：会话层 ─────────────────────────────────────────────
    let above = last_output(&layers);
    let l5 = build_session(&above.bytes);
    let readable = format!(
        "Session PDU | Session ID: {SESSION_ID:#010x} (4 bytes)\n[Data from presentation: {} bytes] → Total: {} bytes",
        above.size_bytes,
        l5.bytes.len()
    );
    layers.push(stage(
        2,
        above,
        l5.fields,
        PayloadView::new(l5.bytes, readable),
        "Session ID (4 bytes) was added to identify and manage this session. Data is now tied to a session for dialog control.",
    ));

    // ── 第 4 层：传输层 ─────────────────────────────────────────────
    let above = last_output(&layers);
    let l4 = build_transport(config, &above.bytes);
    let readable = format!(
        "TCP Segment (20-byte header)\n  Src Port: {} → Dst Port: {}\n  Seq: 1000 | Ack: 0 | Flags: PSH, ACK | Window: 65535\n  [Payload: {} bytes] → Total: {} bytes",
        field_value(&l4.fields, "Source Port"),
        field_value(&l4.fields, "Dest Port"),
        above.size_bytes,
        l4.bytes.len()
    );
    layers.push(stage(
        3,
        above,
        l4.fields,
        PayloadView::new(l4.bytes, readable),
        "TCP header (20 bytes) was added: source and destination ports, sequence and acknowledgment numbers, flags (PSH, ACK), window size, and checksum. Data became a segment.",
    ));

    // ── 第 3 层：网络层 ─────────────────────────────────────────────
    let above = last_output(&layers);
    let l3 = build_network(config, &above.bytes);
    let readable = format!(
        "IP Packet (IPv4, 20-byte header)\n  {}  →  {}\n  TTL: 64 | Protocol: TCP (6) | Total length: {} bytes",
        field_value(&l3.fields, "Source IP"),
        field_value(&l3.fields, "Dest IP"),
        l3.bytes.len()
    );
    layers.push(stage(
        4,
        above,
        l3.fields,
        PayloadView::new(l3.bytes, readable),
        "IP header (20 bytes) was added: source and destination IP addresses, TTL, protocol (TCP), total length, and header checksum. Segment became a packet for routing.",
    ));

    // ── 第 2 层：数据链路层 ─────────────────────────────────────────
    let above = last_output(&layers);
    let l2 = build_data_link(&above.bytes);
    let readable = format!(
        "Ethernet II Frame (14-byte header + 4-byte FCS)\n  Dst MAC: {}\n  Src MAC: {}\n  Type: 0x0800 (IPv4) | Payload: {} bytes → Total: {} bytes",
        field_value(&l2.fields, "Dest MAC"),
        field_value(&l2.fields, "Src MAC"),
        above.size_bytes,
        l2.bytes.len()
    );
    layers.push(stage(
        5,
        above,
        l2.fields,
        PayloadView::new(l2.bytes, readable),
        "Ethernet frame header (14 bytes) was added: destination and source MAC addresses, and type (0x0800 = IPv4). FCS (4 bytes) was appended for error detection. Packet became a frame.",
    ));

    // ── 第 1 层：物理层（不加字节）──────────────────────────────────
    let above = last_output(&layers);
    let l1 = build_physical(config, &above.bytes);
    let readable = format!(
        "Physical layer: {} bytes × 8 = {} bits on the wire ({})\nFirst 8 bytes as bits:\n{}",
        above.size_bytes,
        above.size_bytes * 8,
        config.medium.signal_label(),
        l1.bits_preview
    );
    let frame = above.bytes.clone();
    let mut record = stage(
        6,
        above,
        l1.fields,
        PayloadView::new(frame, readable),
        "Frame was converted to a stream of bits (electrical/optical/radio signals) and sent on the physical medium. No header added; the entire frame is transmitted as raw bits.",
    );
    record.bits_preview = Some(l1.bits_preview);
    layers.push(record);

    for l in &layers {
        trace!(
            layer = l.layer_number,
            in_bytes = l.input.size_bytes,
            out_bytes = l.output.size_bytes,
            "层记录"
        );
    }
    debug!(
        l7_bytes = layers[0].output.size_bytes,
        l1_bytes = layers[layers.len() - 1].output.size_bytes,
        "封装完成"
    );
    Encapsulation::from_layers(layers)
}

/// 上一层的输出，作为本层输入
fn last_output(layers: &[LayerEncapsulation]) -> PayloadView {
    layers
        .last()
        .map(|l| l.output.clone())
        .unwrap_or_else(|| PayloadView::new(Vec::new(), String::new()))
}

/// 组装第 6..1 层的记录（`index` 为在 `LAYER_TABLE` 中的下标）
fn stage(
    index: usize,
    input: PayloadView,
    fields: Vec<HeaderField>,
    output: PayloadView,
    what_happened: &'static str,
) -> LayerEncapsulation {
    let upper = preview(&input.hex, UPPER_PAYLOAD_PREVIEW_CHARS);
    LayerEncapsulation::new(&LAYER_TABLE[index], fields, upper, input, output, what_happened)
}

fn field_value<'a>(fields: &'a [HeaderField], name: &str) -> &'a str {
    find_field(fields, name).map(|f| f.value.as_str()).unwrap_or("—")
}
