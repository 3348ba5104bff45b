//! Best-effort client metadata extracted from request headers.
//!
//! Nothing here is trusted: the values are stored for analytics only.

use axum::http::{HeaderMap, header};
use std::net::{IpAddr, SocketAddr};

/// Header values longer than this are truncated before storage.
const MAX_HEADER_VALUE_LEN: usize = 512;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Client metadata attached to a click.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

impl ClientInfo {
    /// Reads `Referer`, `User-Agent` and the forwarded client IP.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            referer: header_value(headers, header::REFERER.as_str()),
            user_agent: header_value(headers, header::USER_AGENT.as_str()),
            ip: client_ip(headers),
        }
    }
}

/// Extracts the client IP from proxy headers.
///
/// Priority:
/// 1. First entry of `X-Forwarded-For`
/// 2. `X-Real-IP`
///
/// Entries that do not parse as an IP address (optionally with a port) are
/// skipped.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers
        .get(X_FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(parse_ip);

    forwarded.or_else(|| {
        headers
            .get(X_REAL_IP)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_ip)
    })
}

fn parse_ip(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(ip) = raw.parse::<IpAddr>() {
        return Some(ip.to_string());
    }
    raw.parse::<SocketAddr>().ok().map(|addr| addr.ip().to_string())
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let value = headers.get(name)?.to_str().ok()?.trim();
    if value.is_empty() {
        return None;
    }
    Some(truncate(value, MAX_HEADER_VALUE_LEN))
}

fn truncate(value: &str, max: usize) -> String {
    if value.len() <= max {
        return value.to_string();
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    value[..end].to_string()
}
