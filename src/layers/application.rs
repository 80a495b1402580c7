//! 第 7 层：应用层
//!
//! 按协议合成请求文本（HTTP/SMTP/DNS/FTP 风格，CRLF 换行）。

use crate::net::{HeaderField, encode_text, preview};
use crate::sim::{Protocol, SimulationConfig};

/// DNS 查询的固定域名
pub const DNS_QUERY_NAME: &str = "example.com";

const HTTP_REQUEST_LINE: &str = "POST /api/message HTTP/1.1";
const HTTP_CONTENT_TYPE: &str = "text/plain; charset=UTF-8";
const SMTP_FROM: &str = "<sender@local>";
const SMTP_TO: &str = "<recipient@example.com>";
const FTP_USER: &str = "anonymous";
const FTP_COMMAND: &str = "RETR message.txt";

/// 应用层输出
#[derive(Debug, Clone)]
pub struct ApplicationOutput {
    pub bytes: Vec<u8>,
    /// 请求文本本身（可读面板）
    pub human: String,
    pub fields: Vec<HeaderField>,
}

/// 构建应用层数据
pub fn build_application(config: &SimulationConfig) -> ApplicationOutput {
    let msg = config.message_or_default();
    let mut fields = Vec::new();

    let request = match config.protocol {
        Protocol::Http | Protocol::Https => {
            let host = config.dest_address_or_default();
            let content_length = encode_text(msg).len();
            fields.push(HeaderField::new("Request Line", HTTP_REQUEST_LINE));
            fields.push(HeaderField::new("Host", host));
            fields.push(HeaderField::new("Content-Type", HTTP_CONTENT_TYPE));
            fields.push(HeaderField::new("Content-Length", content_length.to_string()));
            fields.push(HeaderField::new("Body (Data)", preview(msg, 60)));
            format!(
                "{HTTP_REQUEST_LINE}\r\n\
                 Host: {host}\r\n\
                 Content-Type: {HTTP_CONTENT_TYPE}\r\n\
                 Content-Length: {content_length}\r\n\
                 Connection: keep-alive\r\n\
                 \r\n\
                 {msg}"
            )
        }
        Protocol::Smtp => {
            fields.push(HeaderField::new("MAIL FROM", SMTP_FROM));
            fields.push(HeaderField::new("RCPT TO", SMTP_TO));
            fields.push(HeaderField::new("DATA", "Message body"));
            fields.push(HeaderField::new("Body", preview(msg, 50)));
            format!("MAIL FROM:{SMTP_FROM}\r\nRCPT TO:{SMTP_TO}\r\nDATA\r\n{msg}\r\n.\r\n")
        }
        Protocol::Dns => {
            // 简化：真实 DNS 是二进制报文，这里不携带用户消息
            let request = format!("DNS Query: {DNS_QUERY_NAME} A IN");
            fields.push(HeaderField::new("Query", DNS_QUERY_NAME));
            fields.push(HeaderField::new("Type", "A"));
            fields.push(HeaderField::new("Class", "IN"));
            return ApplicationOutput {
                bytes: encode_text(&request),
                human: request,
                fields,
            };
        }
        Protocol::Ftp => {
            fields.push(HeaderField::new("USER", FTP_USER));
            fields.push(HeaderField::new("Command", FTP_COMMAND));
            fields.push(HeaderField::new("Data", preview(msg, 40)));
            format!("USER {FTP_USER}\r\nPASS \r\n{FTP_COMMAND}\r\n\r\n{msg}\r\n")
        }
        Protocol::Raw => {
            fields.push(HeaderField::new("Data", msg));
            msg.to_string()
        }
    };

    ApplicationOutput {
        bytes: encode_text(&request),
        human: request,
        fields,
    }
}
