//! 追踪日志 HTTP API 客户端
//!
//! 使用 ureq 同步请求，在 `spawn_blocking` 中执行。不做重试。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace, warn};
use ureq::Agent;

use super::{LogSource, PageRequest};
use crate::errors::{ChannelizerError, Result};
use crate::tracking::TrackingEvent;

/// 响应体上限（单页 10 万条日志约数十 MB）
const MAX_BODY_BYTES: u64 = 512 * 1024 * 1024;

/// API 密钥请求头
pub const API_KEY_HEADER: &str = "x-api-key";

/// 追踪日志 API 客户端
#[derive(Clone)]
pub struct ApiClient {
    url: String,
    api_key: Arc<str>,
    agent: Agent,
}

impl ApiClient {
    /// `base_url` 与 `endpoint` 直接拼接，和 API 文档中的写法一致
    pub fn new(base_url: &str, endpoint: &str, api_key: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            url: join_url(base_url, endpoint),
            api_key: Arc::from(api_key),
            agent,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn fetch_page_sync(&self, request: &PageRequest) -> Result<Option<Vec<TrackingEvent>>> {
        let mut builder = self
            .agent
            .get(&self.url)
            .header(API_KEY_HEADER, &*self.api_key)
            .query("offset", request.offset.to_string())
            .query("limit", request.limit.to_string());

        if let Some(from_date) = &request.from_date {
            builder = builder.query("from_date", from_date);
        }
        if let Some(to_date) = &request.to_date {
            builder = builder.query("to_date", to_date);
        }

        let response = match builder.call() {
            Ok(r) => r,
            Err(ureq::Error::StatusCode(status)) => {
                return Err(ChannelizerError::api_request(format!(
                    "GET {} returned HTTP {}",
                    self.url, status
                )));
            }
            Err(e) => {
                return Err(ChannelizerError::api_request(format!(
                    "GET {} failed: {}",
                    self.url, e
                )));
            }
        };

        let status = response.status().as_u16();
        trace!("GET {} -> HTTP {}", self.url, status);
        if status == 204 {
            return Ok(None);
        }

        let body = response
            .into_body()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_string()
            .map_err(|e| {
                ChannelizerError::api_response(format!(
                    "Failed to read response body from {}: {}",
                    self.url, e
                ))
            })?;

        parse_page(&body)
    }
}

#[async_trait]
impl LogSource for ApiClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Option<Vec<TrackingEvent>>> {
        debug!(
            "Requesting tracking logs: offset={}, limit={}, from={:?}, to={:?}",
            request.offset, request.limit, request.from_date, request.to_date
        );

        let client = self.clone();
        let request = request.clone();
        tokio::task::spawn_blocking(move || client.fetch_page_sync(&request))
            .await
            .map_err(|e| {
                warn!("Tracking log request task failed: {}", e);
                ChannelizerError::api_request(format!("Request task failed: {}", e))
            })?
    }
}

/// 解析一页响应：JSON 数组为日志；空响应体或 `null` 为无数据
pub fn parse_page(body: &str) -> Result<Option<Vec<TrackingEvent>>> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str::<Option<Vec<TrackingEvent>>>(body).map_err(|e| {
        ChannelizerError::api_response(format!("Unexpected tracking log payload: {}", e))
    })
}

fn join_url(base_url: &str, endpoint: &str) -> String {
    match (base_url.ends_with('/'), endpoint.starts_with('/')) {
        (true, true) => format!("{}{}", base_url, &endpoint[1..]),
        (false, false) if !endpoint.is_empty() => format!("{}/{}", base_url, endpoint),
        _ => format!("{}{}", base_url, endpoint),
    }
}
