//! 渠道归因规则
//!
//! 规则按优先级排列，第一条命中的规则决定渠道；没有规则命中时归为
//! `Unknown`。多条规则的条件可以同时成立，顺序即裁决。
//!
//! 规则 2 的 `"sm"` 子串匹配范围很宽（`smtp`、`sample` 都会命中 Social），
//! 这是已知的误判面，保持原样。

use super::channel::Channel;

const SOCIAL_MEDIUM_MARKERS: &[&str] = &["social", "sm"];
const SOCIAL_SOURCES: &[&str] = &["facebook", "instagram", "ig", "fb", "linkedin"];
const PAID_MEDIUM_MARKERS: &[&str] = &["cpc", "ppc", "paid", "paidsearch"];
const PAID_SOURCE_MARKERS: &[&str] = &["google", "yahoo"];

/// 分类器的五个输入信号
///
/// 空字符串与缺失等价；保存的是小写副本，规则只做大小写无关比较。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signals {
    pub utm_source: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_medium: Option<String>,
    pub gclid: Option<String>,
    pub referrer_domain: Option<String>,
}

impl Signals {
    pub fn new(
        utm_source: Option<&str>,
        utm_campaign: Option<&str>,
        utm_medium: Option<&str>,
        gclid: Option<&str>,
        referrer_domain: Option<&str>,
    ) -> Self {
        Self {
            utm_source: normalize(utm_source),
            utm_campaign: normalize(utm_campaign),
            utm_medium: normalize(utm_medium),
            gclid: normalize(gclid),
            referrer_domain: normalize(referrer_domain),
        }
    }

    fn has_utm(&self) -> bool {
        self.utm_source.is_some() || self.utm_campaign.is_some() || self.utm_medium.is_some()
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_lowercase)
}

fn equals(value: &Option<String>, expected: &str) -> bool {
    value.as_deref() == Some(expected)
}

fn equals_any(value: &Option<String>, candidates: &[&str]) -> bool {
    value
        .as_deref()
        .is_some_and(|v| candidates.contains(&v))
}

fn contains_any(value: &Option<String>, markers: &[&str]) -> bool {
    value
        .as_deref()
        .is_some_and(|v| markers.iter().any(|m| v.contains(m)))
}

/// 一条归因规则：名称、命中后的渠道、判定函数
#[derive(Clone, Copy)]
pub struct ChannelRule {
    pub name: &'static str,
    pub channel: Channel,
    predicate: fn(&Signals) -> bool,
}

impl ChannelRule {
    pub const fn new(
        name: &'static str,
        channel: Channel,
        predicate: fn(&Signals) -> bool,
    ) -> Self {
        Self {
            name,
            channel,
            predicate,
        }
    }

    pub fn matches(&self, signals: &Signals) -> bool {
        (self.predicate)(signals)
    }
}

impl std::fmt::Debug for ChannelRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelRule")
            .field("name", &self.name)
            .field("channel", &self.channel)
            .finish()
    }
}

/// 按优先级排列的规则表
pub static RULES: [ChannelRule; 9] = [
    ChannelRule::new("organic_medium", Channel::OrganicSearch, |s| {
        equals(&s.utm_medium, "organic")
    }),
    ChannelRule::new("social_medium", Channel::Social, |s| {
        contains_any(&s.utm_medium, SOCIAL_MEDIUM_MARKERS)
    }),
    ChannelRule::new("social_source", Channel::Social, |s| {
        equals_any(&s.utm_source, SOCIAL_SOURCES)
    }),
    ChannelRule::new("email_medium", Channel::Email, |s| {
        equals(&s.utm_medium, "email")
    }),
    ChannelRule::new("paid_medium", Channel::PaidSearch, |s| {
        contains_any(&s.utm_medium, PAID_MEDIUM_MARKERS)
    }),
    ChannelRule::new("gclid", Channel::PaidSearch, |s| s.gclid.is_some()),
    ChannelRule::new("paid_source", Channel::PaidSearch, |s| {
        contains_any(&s.utm_source, PAID_SOURCE_MARKERS)
    }),
    ChannelRule::new("referral", Channel::Referral, |s| {
        !s.has_utm() && s.referrer_domain.is_some()
    }),
    ChannelRule::new("direct", Channel::Direct, |s| {
        !s.has_utm() && s.referrer_domain.is_none()
    }),
];

/// 第一条命中的规则
pub fn explain(signals: &Signals) -> Option<&'static ChannelRule> {
    RULES.iter().find(|rule| rule.matches(signals))
}

/// 用默认规则表归因
pub fn classify(signals: &Signals) -> Channel {
    classify_with(&RULES, signals)
}

/// 用给定规则表归因，未命中时为 `Unknown`
pub fn classify_with(rules: &[ChannelRule], signals: &Signals) -> Channel {
    rules
        .iter()
        .find(|rule| rule.matches(signals))
        .map_or(Channel::Unknown, |rule| rule.channel)
}
