//! 存储行与 ActiveModel 之间的转换

use sea_orm::ActiveValue::Set;

use crate::tracking::{AttributionRow, PageviewRow};
use migration::entities::{channel_attribution, pageview};

pub fn pageview_to_active_model(row: &PageviewRow) -> pageview::ActiveModel {
    pageview::ActiveModel {
        seq: Set(row.seq),
        log_id: Set(row.log_id.clone()),
        cookie_id: Set(row.cookie_id.clone()),
        location: Set(row.location.clone()),
        referrer_domain: Set(row.referrer_domain.clone()),
        log_ts: Set(row.log_ts.clone()),
        action: Set(row.action.clone()),
    }
}

pub fn attribution_to_active_model(row: &AttributionRow) -> channel_attribution::ActiveModel {
    channel_attribution::ActiveModel {
        seq: Set(row.seq),
        utm_source: Set(row.utm_source.clone()),
        utm_campaign: Set(row.utm_campaign.clone()),
        utm_medium: Set(row.utm_medium.clone()),
        gclid: Set(row.gclid.clone()),
        channel: Set(Some(row.channel.as_str().to_string())),
    }
}
