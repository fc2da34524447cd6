//! 追踪日志获取
//!
//! `LogSource` 是流水线消费的获取接口；`ApiClient` 是基于 HTTP API 的实现。
//! 分页参数（offset/limit/日期范围）只在这一层出现。

pub mod client;

pub use client::ApiClient;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::Result;
use crate::tracking::TrackingEvent;

/// 单页请求参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u32,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

/// 完整抓取窗口
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchWindow {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub page_limit: u32,
    /// 防止 API 忽略 offset 时无限翻页
    pub max_pages: u32,
}

impl FetchWindow {
    fn page(&self, offset: u64) -> PageRequest {
        PageRequest {
            offset,
            limit: self.page_limit,
            from_date: self.from_date.clone(),
            to_date: self.to_date.clone(),
        }
    }
}

/// 追踪日志来源
#[async_trait]
pub trait LogSource: Send + Sync {
    /// 获取一页日志；`Ok(None)` 表示 API 明确没有数据
    async fn fetch_page(&self, request: &PageRequest) -> Result<Option<Vec<TrackingEvent>>>;

    /// 逐页获取直到返回不足一页或达到页数上限
    ///
    /// 第一页即无数据时返回 `Ok(None)`。
    async fn fetch_all(&self, window: &FetchWindow) -> Result<Option<Vec<TrackingEvent>>> {
        let mut events: Vec<TrackingEvent> = Vec::new();
        let mut offset: u64 = 0;
        let mut pages: u32 = 0;

        loop {
            let page = match self.fetch_page(&window.page(offset)).await? {
                Some(page) => page,
                None if pages == 0 => return Ok(None),
                None => break,
            };
            pages += 1;

            let received = page.len();
            debug!(
                "Fetched page {} (offset={}, limit={}): {} events",
                pages, offset, window.page_limit, received
            );
            events.extend(page);

            if received < window.page_limit as usize {
                break;
            }
            if pages >= window.max_pages {
                tracing::warn!(
                    "Stopped paging after {} pages ({} events); raise api.max_pages to fetch more",
                    pages,
                    events.len()
                );
                break;
            }
            offset += received as u64;
        }

        Ok(Some(events))
    }
}
