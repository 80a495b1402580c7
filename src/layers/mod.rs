//! 各层头部构建器
//!
//! 每个 OSI 层一个纯函数：接收配置与上一层的载荷，返回新载荷（头 + 旧载荷，必要时加尾）
//! 和按真实顺序排列的头部字段。

use crate::net::HeaderField;

mod application;
mod data_link;
mod meta;
mod network;
mod physical;
mod presentation;
mod session;
mod transport;

pub use application::{ApplicationOutput, DNS_QUERY_NAME, build_application};
pub use data_link::{
    ETHERNET_FCS_LEN, ETHERNET_HEADER_LEN, ETHERTYPE_IPV4, FCS_PLACEHOLDER, build_data_link,
};
pub use meta::{LAYER_TABLE, LayerMeta, PduName, layer_meta};
pub use network::{IPV4_HEADER_LEN, build_network, ipv4_checksum};
pub use physical::{BITS_PREVIEW_BYTES, PhysicalOutput, build_physical};
pub use presentation::{TLS_RECORD_HEADER_LEN, build_presentation};
pub use session::{SESSION_HEADER_LEN, SESSION_ID, build_session};
pub use transport::{DEFAULT_DEST_PORT, TCP_HEADER_LEN, build_transport, dest_port};

/// 第 6..2 层构建器的输出
#[derive(Debug, Clone)]
pub struct LayerOutput {
    pub bytes: Vec<u8>,
    pub fields: Vec<HeaderField>,
}
