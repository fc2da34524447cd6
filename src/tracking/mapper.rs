//! 日志记录到存储行的映射
//!
//! 两路输出与输入事件按位置对齐：`seq` 就是事件在本批次中的下标。

use serde::Serialize;

use super::TrackingEvent;
use crate::attribution::{Channel, QueryAttribution, attribute};

/// `pageviews` 表的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageviewRow {
    pub seq: i64,
    pub log_id: Option<String>,
    pub cookie_id: Option<String>,
    pub location: Option<String>,
    pub referrer_domain: Option<String>,
    pub log_ts: Option<String>,
    pub action: Option<String>,
}

impl PageviewRow {
    pub fn from_event(seq: i64, event: &TrackingEvent) -> Self {
        Self {
            seq,
            log_id: event.log_id.clone(),
            cookie_id: event.cookie_id.clone(),
            location: event.location.clone(),
            referrer_domain: event.referrer_domain.clone(),
            log_ts: event.timestamp.clone(),
            action: event.action.clone(),
        }
    }
}

/// `channel` 表的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributionRow {
    pub seq: i64,
    pub utm_source: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_medium: Option<String>,
    pub gclid: Option<String>,
    pub channel: Channel,
}

impl AttributionRow {
    pub fn from_attribution(seq: i64, attribution: QueryAttribution) -> Self {
        Self {
            seq,
            utm_source: attribution.utm_source,
            utm_campaign: attribution.utm_campaign,
            utm_medium: attribution.utm_medium,
            gclid: attribution.gclid,
            channel: attribution.channel,
        }
    }
}

/// 一批事件映射后的两路行
#[derive(Debug, Clone, Default)]
pub struct MappedBatch {
    pub pageviews: Vec<PageviewRow>,
    pub attributions: Vec<AttributionRow>,
}

impl MappedBatch {
    pub fn len(&self) -> usize {
        self.pageviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pageviews.is_empty()
    }
}

pub fn map_pageviews(events: &[TrackingEvent]) -> Vec<PageviewRow> {
    events
        .iter()
        .enumerate()
        .map(|(i, event)| PageviewRow::from_event(i as i64, event))
        .collect()
}

pub fn map_attributions(events: &[TrackingEvent]) -> Vec<AttributionRow> {
    events
        .iter()
        .enumerate()
        .map(|(i, event)| AttributionRow::from_attribution(i as i64, attribute(event)))
        .collect()
}

pub fn map_batch(events: &[TrackingEvent]) -> MappedBatch {
    MappedBatch {
        pageviews: map_pageviews(events),
        attributions: map_attributions(events),
    }
}
