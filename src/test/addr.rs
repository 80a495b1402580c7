use crate::net::{FALLBACK_IPV4, MacAddr, dotted_quad, parse_ipv4};

#[test]
fn parse_ipv4_accepts_dotted_quads() {
    assert_eq!(parse_ipv4(Some("93.184.216.34")), [93, 184, 216, 34]);
    assert_eq!(parse_ipv4(Some("0.0.0.0")), [0, 0, 0, 0]);
    assert_eq!(parse_ipv4(Some("255.255.255.255")), [255, 255, 255, 255]);
    assert_eq!(parse_ipv4(Some("  10.0.0.1 ")), [10, 0, 0, 1]);
}

#[test]
fn parse_ipv4_falls_back_on_malformed_input() {
    assert_eq!(parse_ipv4(Some("not.an.ip")), [192, 168, 1, 10]);
    assert_eq!(parse_ipv4(Some("1.2.3")), [192, 168, 1, 10]);
    assert_eq!(parse_ipv4(None), [192, 168, 1, 10]);
    assert_eq!(parse_ipv4(Some("")), FALLBACK_IPV4);
    assert_eq!(parse_ipv4(Some("1.2.3.4.5")), FALLBACK_IPV4);
    assert_eq!(parse_ipv4(Some("256.1.1.1")), FALLBACK_IPV4);
    assert_eq!(parse_ipv4(Some("1.2.-3.4")), FALLBACK_IPV4);
    assert_eq!(parse_ipv4(Some("1..3.4")), FALLBACK_IPV4);
}

#[test]
fn dotted_quad_renders_octets() {
    assert_eq!(dotted_quad([192, 168, 1, 10]), "192.168.1.10");
}

#[test]
fn mac_addresses_render_colon_hex() {
    assert_eq!(MacAddr::DEST.to_string(), "00:1a:2b:3c:4d:5e");
    assert_eq!(MacAddr::SRC.to_string(), "00:0f:11:22:33:44");
    assert_eq!(MacAddr([0xff; 6]).to_string(), "ff:ff:ff:ff:ff:ff");
}
