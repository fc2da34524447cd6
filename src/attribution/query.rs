//! Location URL query decomposition
//!
//! Extracts the tracking parameters (`utm_source`, `utm_campaign`,
//! `utm_medium`, `gclid`) from an event's location. Decomposition never
//! fails: a location that cannot be parsed yields an empty parameter map.

use url::Url;

/// 无 scheme 的 location（`/page?utm_source=x`、`www.shop.com/?utm_medium=cpc`）
/// 按相对引用解析时借用的占位 base；只读取其中的查询串
const PLACEHOLDER_BASE: &str = "http://placeholder.invalid/";

pub const UTM_SOURCE: &str = "utm_source";
pub const UTM_CAMPAIGN: &str = "utm_campaign";
pub const UTM_MEDIUM: &str = "utm_medium";
pub const GCLID: &str = "gclid";

/// Ordered multi-map of query parameters.
///
/// Repeated parameters keep every value in their original order. Blank
/// values (`utm_source=`) are not recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Decompose the query component of `location`.
    pub fn from_location(location: &str) -> Self {
        let Some(url) = parse_location(location) else {
            return Self::default();
        };

        let pairs = url
            .query_pairs()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        Self { pairs }
    }

    /// First value recorded for `name`, or `None` when absent.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value recorded for `name`, in query order.
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    pub fn utm_source(&self) -> Option<&str> {
        self.first(UTM_SOURCE)
    }

    pub fn utm_campaign(&self) -> Option<&str> {
        self.first(UTM_CAMPAIGN)
    }

    pub fn utm_medium(&self) -> Option<&str> {
        self.first(UTM_MEDIUM)
    }

    pub fn gclid(&self) -> Option<&str> {
        self.first(GCLID)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

fn parse_location(location: &str) -> Option<Url> {
    match Url::parse(location) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(PLACEHOLDER_BASE)
                .and_then(|base| base.join(location))
                .ok()
        }
        Err(_) => None,
    }
}
