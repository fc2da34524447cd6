use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

/// 营销渠道（封闭集合）
///
/// 标签字符串同时用于 `channel` 表和 `filtered_pageviews` 视图的分组键，
/// 修改标签等于修改存储格式。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
)]
pub enum Channel {
    #[serde(rename = "Organic Search")]
    #[strum(serialize = "Organic Search")]
    OrganicSearch,
    #[serde(rename = "Social")]
    #[strum(serialize = "Social")]
    Social,
    #[serde(rename = "Email")]
    #[strum(serialize = "Email")]
    Email,
    #[serde(rename = "Paid Search")]
    #[strum(serialize = "Paid Search")]
    PaidSearch,
    #[serde(rename = "Referral")]
    #[strum(serialize = "Referral")]
    Referral,
    #[serde(rename = "Direct")]
    #[strum(serialize = "Direct")]
    Direct,
    #[serde(rename = "Unknown")]
    #[strum(serialize = "Unknown")]
    Unknown,
}

impl Channel {
    /// 存储使用的标签
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrganicSearch => "Organic Search",
            Self::Social => "Social",
            Self::Email => "Email",
            Self::PaidSearch => "Paid Search",
            Self::Referral => "Referral",
            Self::Direct => "Direct",
            Self::Unknown => "Unknown",
        }
    }

    /// 按声明顺序列出全部渠道
    pub fn all() -> Vec<Channel> {
        Channel::iter().collect()
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
