//! Tracking log records and their storage projections

pub mod mapper;

pub use mapper::{AttributionRow, MappedBatch, PageviewRow, map_batch};

use serde::{Deserialize, Deserializer, Serialize};

/// 单条追踪日志（API 返回的原始记录）
///
/// 标识类字段对核心是不透明的：API 给出数字或字符串都按原样转成字符串，
/// `null` 或缺失为 `None`。时间戳不做解析。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    #[serde(default, deserialize_with = "opaque_string")]
    pub log_id: Option<String>,
    #[serde(default, deserialize_with = "opaque_string")]
    pub cookie_id: Option<String>,
    #[serde(default, deserialize_with = "opaque_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "opaque_string")]
    pub referrer_domain: Option<String>,
    #[serde(rename = "log_ts", default, deserialize_with = "opaque_string")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "opaque_string")]
    pub action: Option<String>,
}

fn opaque_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
