//! Channel attribution
//!
//! Pure, total classification of a tracking event into one marketing
//! channel: the location's query string is decomposed into tracking
//! parameters, then an ordered rule table picks the channel.

pub mod channel;
pub mod query;
pub mod rules;

pub use channel::Channel;
pub use query::QueryParams;
pub use rules::{ChannelRule, RULES, Signals, classify, classify_with, explain};

use serde::Serialize;

use crate::tracking::TrackingEvent;

/// 单个事件的归因结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryAttribution {
    pub utm_source: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_medium: Option<String>,
    pub gclid: Option<String>,
    pub channel: Channel,
}

impl QueryAttribution {
    /// 从 location 与 referrer 推导
    pub fn from_parts(location: Option<&str>, referrer_domain: Option<&str>) -> Self {
        let params = QueryParams::from_location(location.unwrap_or_default());
        let signals = Signals::new(
            params.utm_source(),
            params.utm_campaign(),
            params.utm_medium(),
            params.gclid(),
            referrer_domain,
        );

        Self {
            utm_source: params.utm_source().map(str::to_owned),
            utm_campaign: params.utm_campaign().map(str::to_owned),
            utm_medium: params.utm_medium().map(str::to_owned),
            gclid: params.gclid().map(str::to_owned),
            channel: classify(&signals),
        }
    }
}

/// 归因单个事件
pub fn attribute(event: &TrackingEvent) -> QueryAttribution {
    QueryAttribution::from_parts(event.location.as_deref(), event.referrer_domain.as_deref())
}

/// 批量归因，输出与输入一一对应、顺序一致
pub fn attribute_batch(events: &[TrackingEvent]) -> Vec<QueryAttribution> {
    events.iter().map(attribute).collect()
}
