use crate::build_encapsulation;
use crate::layers::PduName;
use crate::net::{decode_hex, find_field, to_compact_hex};
use crate::sim::{ConnectionType, Medium, Protocol, SimulationConfig};

fn cfg(protocol: Protocol, message: &str) -> SimulationConfig {
    SimulationConfig {
        message: message.to_string(),
        protocol,
        medium: Medium::Ethernet,
        connection_type: ConnectionType::Direct,
        ..SimulationConfig::default()
    }
}

const ALL_PROTOCOLS: [Protocol; 6] = [
    Protocol::Http,
    Protocol::Https,
    Protocol::Smtp,
    Protocol::Dns,
    Protocol::Ftp,
    Protocol::Raw,
];

#[test]
fn produces_seven_records_top_down() {
    let enc = build_encapsulation(&SimulationConfig::default());
    assert_eq!(enc.len(), 7);
    let numbers: Vec<u8> = enc.iter().map(|l| l.layer_number).collect();
    assert_eq!(numbers, vec![7, 6, 5, 4, 3, 2, 1]);
    assert_eq!(enc.layer(4).map(|l| l.pdu_name), Some(PduName::Segment));
    assert_eq!(enc.get(0).map(|l| l.layer_name), Some("Application"));
}

#[test]
fn http_sizes_grow_by_header_lengths() {
    let enc = build_encapsulation(&cfg(Protocol::Http, "Hi"));
    let sizes: Vec<usize> = enc.iter().map(|l| l.output.size_bytes).collect();
    assert_eq!(sizes, vec![137, 137, 141, 161, 181, 199, 199]);
    let added: Vec<usize> = enc.iter().map(|l| l.added_bytes()).collect();
    assert_eq!(added, vec![135, 0, 4, 20, 20, 18, 0]);
}

#[test]
fn https_shifts_downstream_sizes_by_record_header() {
    let http = build_encapsulation(&cfg(Protocol::Http, "Hi"));
    let https = build_encapsulation(&cfg(Protocol::Https, "Hi"));
    let l7 = https.layer(7).map(|l| l.output.size_bytes);
    assert_eq!(l7, http.layer(7).map(|l| l.output.size_bytes));
    assert_eq!(https.layer(6).map(|l| l.output.size_bytes), l7.map(|n| n + 5));
    for n in 1..=6u8 {
        let a = http.layer(n).map(|l| l.output.size_bytes).unwrap_or_default();
        let b = https.layer(n).map(|l| l.output.size_bytes).unwrap_or_default();
        assert_eq!(b, a + 5, "layer {n}");
    }
}

#[test]
fn each_layer_consumes_the_previous_output() {
    for protocol in ALL_PROTOCOLS {
        let enc = build_encapsulation(&cfg(protocol, "continuity check"));
        for pair in enc.layers().windows(2) {
            assert_eq!(pair[1].input.hex, pair[0].output.hex, "{protocol}");
            assert_eq!(pair[1].input.bytes, pair[0].output.bytes);
        }
        let l1 = enc.layer(1).expect("layer 1");
        assert_eq!(l1.output.bytes, l1.input.bytes);
    }
}

#[test]
fn every_layer_only_grows() {
    for protocol in ALL_PROTOCOLS {
        let enc = build_encapsulation(&cfg(protocol, "monotonic"));
        let sizes: Vec<usize> = enc.iter().map(|l| l.output.size_bytes).collect();
        assert!(sizes.windows(2).all(|w| w[1] >= w[0]), "{protocol}: {sizes:?}");
        let expected_l6 = if protocol == Protocol::Https { 5 } else { 0 };
        let deltas: Vec<usize> = enc.iter().skip(1).map(|l| l.added_bytes()).collect();
        assert_eq!(deltas, vec![expected_l6, 4, 20, 20, 18, 0], "{protocol}");
    }
}

#[test]
fn payload_views_are_consistent() {
    let enc = build_encapsulation(&cfg(Protocol::Smtp, "views"));
    for l in enc.iter() {
        for view in [&l.input, &l.output] {
            assert_eq!(view.size_bytes, view.bytes.len());
            assert_eq!(view.hex, to_compact_hex(&view.bytes));
            assert_eq!(decode_hex(&view.hex).expect("valid hex"), view.bytes);
            let bits: usize = view
                .binary
                .split_whitespace()
                .map(|chunk| chunk.len())
                .sum();
            assert_eq!(bits, view.size_bytes * 8);
        }
    }
}

#[test]
fn build_is_deterministic() {
    let config = cfg(Protocol::Ftp, "same input");
    let a = serde_json::to_string(&build_encapsulation(&config)).expect("serialize");
    let b = serde_json::to_string(&build_encapsulation(&config)).expect("serialize");
    assert_eq!(a, b);
}

#[test]
fn header_field_hex_matches_wire_bytes() {
    let config = SimulationConfig {
        source_port: Some(1234),
        ..cfg(Protocol::Https, "field check")
    };
    let enc = build_encapsulation(&config);

    let l4 = enc.layer(4).expect("layer 4");
    let hex_of = |fields: &[crate::net::HeaderField], name: &str| {
        find_field(fields, name)
            .and_then(|f| f.hex.clone())
            .map(|h| h.replace(' ', ""))
            .unwrap_or_default()
    };
    let out = &l4.output.hex;
    assert_eq!(hex_of(&l4.header_fields, "Source Port"), out[0..4]);
    assert_eq!(hex_of(&l4.header_fields, "Dest Port"), out[4..8]);
    assert_eq!(hex_of(&l4.header_fields, "Flags"), out[26..28]);

    let l3 = enc.layer(3).expect("layer 3");
    let out = &l3.output.hex;
    assert_eq!(hex_of(&l3.header_fields, "Total Length"), out[4..8]);
    assert_eq!(hex_of(&l3.header_fields, "Header Checksum"), out[20..24]);
    assert_eq!(hex_of(&l3.header_fields, "Source IP"), out[24..32]);
    assert_eq!(hex_of(&l3.header_fields, "Dest IP"), out[32..40]);

    let l2 = enc.layer(2).expect("layer 2");
    let out = &l2.output.hex;
    assert_eq!(hex_of(&l2.header_fields, "Dest MAC"), out[0..12]);
    assert_eq!(hex_of(&l2.header_fields, "Src MAC"), out[12..24]);
    assert_eq!(hex_of(&l2.header_fields, "FCS"), out[out.len() - 8..]);
}

#[test]
fn layer_seven_record_describes_the_message() {
    let enc = build_encapsulation(&cfg(Protocol::Http, "Hi"));
    let l7 = enc.layer(7).expect("layer 7");
    assert_eq!(l7.payload_from_upper_layer, "[User message]");
    assert_eq!(l7.input.human_readable, "Hi");
    assert!(l7.output.human_readable.ends_with("\r\n\r\nHi"));

    let l6 = enc.layer(6).expect("layer 6");
    assert!(l6.payload_from_upper_layer.starts_with(&l7.output.hex[..16]));
    assert!(l6.payload_from_upper_layer.ends_with('…'));
}

#[test]
fn physical_record_carries_bits_preview() {
    let enc = build_encapsulation(&cfg(Protocol::Http, "Hi"));
    let l1 = enc.layer(1).expect("layer 1");
    let preview = l1.bits_preview.as_deref().expect("bits preview");
    // Frame begins with the destination MAC 00:1a:2b:...
    assert!(preview.starts_with("00000000 00011010 00101011"));
    assert!(enc.iter().filter(|l| l.bits_preview.is_some()).count() == 1);
}

#[test]
fn json_shape_lists_records_with_hex_and_no_raw_bytes() {
    let enc = build_encapsulation(&cfg(Protocol::Dns, "ignored"));
    let value = serde_json::to_value(&enc).expect("serialize");
    let records = value.as_array().expect("array of records");
    assert_eq!(records.len(), 7);
    let first = &records[0];
    assert_eq!(first["layer_number"], 7);
    assert_eq!(first["pdu_name"], "Data");
    assert!(first["output"]["hex"].is_string());
    assert!(first["output"].get("bytes").is_none());
    assert!(first.get("bits_preview").is_none());
    assert!(records[6]["bits_preview"].is_string());
}

#[test]
fn large_message_still_encapsulates() {
    let message = "z".repeat(70_000);
    let enc = build_encapsulation(&cfg(Protocol::Https, &message));
    let l1 = enc.layer(1).expect("layer 1");
    let l7 = enc.layer(7).expect("layer 7");
    assert_eq!(l1.output.size_bytes, l7.output.size_bytes + 5 + 4 + 20 + 20 + 18);
}
