//! 地址类型
//!
//! IPv4 点分十进制解析（带固定回退地址）与固定的 MAC 地址。

use std::fmt;
use std::net::Ipv4Addr;

use tracing::debug;

/// 解析失败时使用的回退地址
pub const FALLBACK_IPV4: [u8; 4] = [192, 168, 1, 10];

/// 默认源地址
pub const DEFAULT_SOURCE_ADDRESS: &str = "192.168.1.10";
/// 默认目的地址
pub const DEFAULT_DEST_ADDRESS: &str = "93.184.216.34";

/// 解析点分十进制 IPv4 地址。
///
/// 必须恰好 4 段、每段是 0..=255 的整数；任何不满足（包括 `None`）都返回
/// [`FALLBACK_IPV4`]，从不报错。
pub fn parse_ipv4(s: Option<&str>) -> [u8; 4] {
    let Some(raw) = s else {
        return FALLBACK_IPV4;
    };
    let parts: Vec<&str> = raw.trim().split('.').collect();
    if parts.len() != 4 {
        debug!(addr = raw, "段数不是 4，使用回退地址");
        return FALLBACK_IPV4;
    }
    let mut out = [0u8; 4];
    for (slot, part) in out.iter_mut().zip(&parts) {
        match part.trim().parse::<u8>() {
            Ok(n) => *slot = n,
            Err(_) => {
                debug!(addr = raw, part = *part, "非法段，使用回退地址");
                return FALLBACK_IPV4;
            }
        }
    }
    out
}

/// 四个八位组 -> 点分十进制字符串
pub fn dotted_quad(octets: [u8; 4]) -> String {
    Ipv4Addr::from(octets).to_string()
}

/// 以太网 MAC 地址
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// 帧的目的 MAC（固定）
    pub const DEST: MacAddr = MacAddr([0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e]);
    /// 帧的源 MAC（固定）
    pub const SRC: MacAddr = MacAddr([0x00, 0x0f, 0x11, 0x22, 0x33, 0x44]);

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}
