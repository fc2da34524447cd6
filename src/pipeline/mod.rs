//! 流水线编排
//!
//! 获取 → 映射 pageview 与归因 → 在同一事务内全量刷新 pageviews 和 channel →
//! 重建汇总视图。获取和存储通过 `LogSource` / `EventSink` 注入，
//! 配置在构造时显式传入。

mod sink;

pub use sink::{BatchWritten, ChannelCount, EventSink};

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::attribution::Channel;
use crate::config::{DatabaseConfig, StaticConfig, validators};
use crate::errors::{ChannelizerError, Result};
use crate::fetch::{ApiClient, FetchWindow, LogSource};
use crate::storage::SeaOrmStorage;
use crate::tracking::{TrackingEvent, map_batch};

/// debug 日志中展示的样本事件数
const SAMPLE_EVENTS: usize = 5;

/// 流水线配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub api_base_url: String,
    pub api_key: String,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    /// 数据库 URL
    pub storage_target: String,
    pub endpoint: String,
    pub page_limit: u32,
    pub max_pages: u32,
    pub timeout_secs: u64,
    pub brand_domain: String,
}

impl PipelineConfig {
    /// 从静态配置构造并校验
    pub fn from_static(config: &StaticConfig) -> Result<Self> {
        let pipeline = Self {
            api_base_url: config.api.base_url.clone(),
            api_key: config.api.api_key.clone(),
            from_date: config.api.from_date.clone(),
            to_date: config.api.to_date.clone(),
            storage_target: config.database.database_url.clone(),
            endpoint: config.api.endpoint.clone(),
            page_limit: config.api.page_limit,
            max_pages: config.api.max_pages,
            timeout_secs: config.api.timeout_secs,
            brand_domain: config.report.brand_domain.clone(),
        };
        pipeline.validate()?;
        Ok(pipeline)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(ChannelizerError::config("api.base_url must not be empty"));
        }
        if self.storage_target.trim().is_empty() {
            return Err(ChannelizerError::config(
                "database.database_url must not be empty",
            ));
        }
        validators::validate_api_key(&self.api_key)?;
        validators::validate_page_limit(self.page_limit)?;
        validators::validate_brand_domain(&self.brand_domain)?;

        let from = validators::validate_date("api.from_date", self.from_date.as_deref())?;
        let to = validators::validate_date("api.to_date", self.to_date.as_deref())?;
        validators::validate_date_range(from, to)
    }

    pub fn fetch_window(&self) -> FetchWindow {
        FetchWindow {
            from_date: self.from_date.clone(),
            to_date: self.to_date.clone(),
            page_limit: self.page_limit,
            max_pages: self.max_pages,
        }
    }
}

/// 一次运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// API 没有返回数据，存储未被改动
    NoData,
    Completed(RunSummary),
}

/// 运行摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub events: usize,
    pub pageviews_written: u64,
    pub attributions_written: u64,
    /// 全部七个渠道，按声明顺序，包括计数为 0 的渠道
    pub channel_tallies: Vec<(Channel, u64)>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn tally(&self, channel: Channel) -> u64 {
        self.channel_tallies
            .iter()
            .find(|(c, _)| *c == channel)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// 统计每个渠道的事件数
pub fn tally_channels<'a>(
    channels: impl IntoIterator<Item = &'a Channel>,
) -> Vec<(Channel, u64)> {
    let mut tallies: Vec<(Channel, u64)> = Channel::all().into_iter().map(|c| (c, 0)).collect();
    for channel in channels {
        if let Some(entry) = tallies.iter_mut().find(|(c, _)| c == channel) {
            entry.1 += 1;
        }
    }
    tallies
}

pub struct Pipeline {
    config: PipelineConfig,
    source: Arc<dyn LogSource>,
    sink: Arc<dyn EventSink>,
}

impl Pipeline {
    pub fn new(
        config: PipelineConfig,
        source: Arc<dyn LogSource>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            config,
            source,
            sink,
        }
    }

    /// 使用 HTTP API 和 SeaORM 存储构造流水线
    pub async fn connect(config: PipelineConfig, database: &DatabaseConfig) -> Result<Self> {
        let source = ApiClient::new(
            &config.api_base_url,
            &config.endpoint,
            &config.api_key,
            Duration::from_secs(config.timeout_secs),
        );

        let mut database = database.clone();
        database.database_url = config.storage_target.clone();
        let storage = SeaOrmStorage::new(&database).await?;

        Ok(Self::new(config, Arc::new(source), Arc::new(storage)))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// 执行一次完整的全量刷新
    pub async fn run(&self) -> Result<RunOutcome> {
        let started_at = Utc::now();
        info!(
            "Fetching tracking logs ({} .. {})",
            self.config.from_date.as_deref().unwrap_or("*"),
            self.config.to_date.as_deref().unwrap_or("*")
        );

        let events = match self.source.fetch_all(&self.config.fetch_window()).await? {
            Some(events) if !events.is_empty() => events,
            _ => {
                info!("API returned no data, nothing to do");
                return Ok(RunOutcome::NoData);
            }
        };
        info!("Fetched {} tracking events", events.len());
        log_sample(&events);

        let batch = map_batch(&events);
        let channel_tallies = tally_channels(batch.attributions.iter().map(|row| &row.channel));
        let written = self
            .sink
            .replace_batch(&batch)
            .await
            .map_err(storage_error)?;
        info!(
            "Stored {} rows in pageviews and {} rows in channel",
            written.pageviews, written.attributions
        );

        self.sink
            .rebuild_channel_view(&self.config.brand_domain)
            .await
            .map_err(storage_error)?;
        info!(
            "Aggregation view rebuilt for brand domain '{}'",
            self.config.brand_domain
        );

        Ok(RunOutcome::Completed(RunSummary {
            events: events.len(),
            pageviews_written: written.pageviews,
            attributions_written: written.attributions,
            channel_tallies,
            started_at,
            finished_at: Utc::now(),
        }))
    }

    /// 读取汇总视图
    pub async fn report(&self) -> Result<Vec<ChannelCount>> {
        self.sink.channel_report().await.map_err(storage_error)
    }
}

fn log_sample(events: &[TrackingEvent]) {
    for (i, event) in events.iter().take(SAMPLE_EVENTS).enumerate() {
        debug!("Sample event #{}: {:?}", i, event);
    }
}

fn storage_error(e: anyhow::Error) -> ChannelizerError {
    ChannelizerError::database_operation(format!("{:#}", e))
}
