//! 每层的静态教学元信息（与配置无关）

use serde::Serialize;

/// 各层 PDU 名称
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PduName {
    Data,
    Segment,
    Packet,
    Frame,
    Bits,
}

impl PduName {
    pub fn as_str(self) -> &'static str {
        match self {
            PduName::Data => "Data",
            PduName::Segment => "Segment",
            PduName::Packet => "Packet",
            PduName::Frame => "Frame",
            PduName::Bits => "Bits",
        }
    }
}

/// 一层的静态说明
#[derive(Debug, Serialize)]
pub struct LayerMeta {
    pub number: u8,
    pub name: &'static str,
    pub pdu: PduName,
    pub description: &'static str,
    pub protocols: &'static [&'static str],
    pub hardware: &'static [&'static str],
}

/// 按封装顺序排列（下标 0 = 第 7 层）
pub static LAYER_TABLE: [LayerMeta; 7] = [
    LayerMeta {
        number: 7,
        name: "Application",
        pdu: PduName::Data,
        description: "The Application layer is the topmost layer and the one closest to the end user. It provides network services directly to applications like web browsers, email clients, and file transfer programs. When you send an HTTP request, this layer formats it with the correct method, URL, headers, and body. It does not refer to the application itself; it defines the protocol the application uses to communicate over a network.",
        protocols: &["HTTP", "HTTPS", "FTP", "SMTP", "DNS", "SSH", "Telnet", "SNMP", "DHCP", "POP3", "IMAP"],
        hardware: &["Web Browsers", "Web Servers", "Email Clients/Servers", "DNS Servers", "FTP Clients/Servers", "Application Gateways"],
    },
    LayerMeta {
        number: 6,
        name: "Presentation",
        pdu: PduName::Data,
        description: "The Presentation layer is the network's translator. It converts data between application format and a common network format so that two systems with different encodings can understand each other. It handles character encoding (ASCII and Unicode), compression, and encryption via TLS/SSL. When using HTTPS, TLS wraps the application data in a record header that carries the content type, protocol version, and payload length.",
        protocols: &["TLS", "SSL", "JPEG", "MPEG", "GIF", "PNG", "ASCII", "Unicode", "MIME", "XDR"],
        hardware: &["SSL/TLS Terminators", "Gateways", "Web Servers (SSL)", "Application Firewalls"],
    },
    LayerMeta {
        number: 5,
        name: "Session",
        pdu: PduName::Data,
        description: "The Session layer manages communication sessions: logical, persistent connections between two applications on different hosts. It establishes the session before data transfer, maintains it during communication, and terminates it when done. Synchronization checkpoints let a long transfer resume from a known point after an interruption. Each session carries a unique Session ID.",
        protocols: &["NetBIOS", "RPC", "PPTP", "NFS", "SMB", "SQL", "L2TP"],
        hardware: &["Gateways", "Application Servers", "Session Border Controllers"],
    },
    LayerMeta {
        number: 4,
        name: "Transport",
        pdu: PduName::Segment,
        description: "The Transport layer provides end-to-end delivery between processes on different hosts, identified by port numbers. TCP adds a 20-byte header with source and destination ports, sequence and acknowledgment numbers, flags (SYN, ACK, PSH), window size for flow control, and a checksum. The result is called a Segment. UDP is the simpler, connectionless alternative without guaranteed delivery.",
        protocols: &["TCP", "UDP", "SCTP", "DCCP"],
        hardware: &["Firewalls (stateful)", "Load Balancers", "Application Delivery Controllers"],
    },
    LayerMeta {
        number: 3,
        name: "Network",
        pdu: PduName::Packet,
        description: "The Network layer is responsible for logical addressing and routing across multiple networks. Routers read the destination IP address in the packet header to choose a path. The 20-byte IPv4 header carries source and destination addresses, TTL to stop routing loops, the protocol number (6 = TCP), the total length, and a header checksum. The PDU is called a Packet.",
        protocols: &["IPv4", "IPv6", "ICMP", "ICMPv6", "OSPF", "BGP", "RIP", "ARP", "NAT"],
        hardware: &["Routers", "Layer-3 Switches", "Firewalls", "Multilayer Switches"],
    },
    LayerMeta {
        number: 2,
        name: "Data Link",
        pdu: PduName::Frame,
        description: "The Data Link layer moves data between two directly connected nodes on the same local network using MAC addresses. It wraps the IP packet in an Ethernet frame with a 14-byte header (destination MAC, source MAC, EtherType) and appends a 4-byte Frame Check Sequence for error detection. Switches and NICs operate here. The PDU is called a Frame.",
        protocols: &["Ethernet (802.3)", "Wi-Fi (802.11)", "PPP", "HDLC", "ARP", "VLAN (802.1Q)", "Spanning Tree (STP)"],
        hardware: &["Ethernet Switches", "Bridges", "Wireless Access Points", "Network Interface Cards (NIC)"],
    },
    LayerMeta {
        number: 1,
        name: "Physical",
        pdu: PduName::Bits,
        description: "The Physical layer transmits raw bits over a physical medium. It defines the electrical, optical, or radio characteristics of the signal: voltages, frequencies, pin layouts, and cable types. There is no addressing here; the binary stream of the frame is converted into signals and sent. On the receiving end, signals become bits again and the frame is passed up to Layer 2.",
        protocols: &["IEEE 802.3 (Ethernet)", "IEEE 802.11 (Wi-Fi)", "USB", "Bluetooth", "DSL", "SONET/SDH", "RS-232"],
        hardware: &["Ethernet Cables (Cat5/Cat6)", "Fiber Optic Cables", "Hubs", "Repeaters", "Modems", "Network Interface Cards (NIC)"],
    },
];

/// 按层号（1..=7）查元信息
pub fn layer_meta(number: u8) -> Option<&'static LayerMeta> {
    LAYER_TABLE.iter().find(|m| m.number == number)
}
