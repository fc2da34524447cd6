//! Pipeline orchestration tests
//!
//! Mock log sources and sinks, plus an end-to-end run into a temporary
//! SQLite database.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use channelizer::attribution::Channel;
use channelizer::config::{DatabaseConfig, StaticConfig};
use channelizer::errors::{ChannelizerError, Result};
use channelizer::fetch::{LogSource, PageRequest};
use channelizer::pipeline::{
    BatchWritten, ChannelCount, EventSink, Pipeline, PipelineConfig, RunOutcome,
};
use channelizer::storage::SeaOrmStorage;
use channelizer::tracking::{AttributionRow, MappedBatch, TrackingEvent};
use tempfile::TempDir;

/// 固定返回一页数据的来源
struct FixedSource {
    page: Option<Vec<TrackingEvent>>,
}

#[async_trait]
impl LogSource for FixedSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Option<Vec<TrackingEvent>>> {
        if request.offset > 0 {
            return Ok(Some(Vec::new()));
        }
        Ok(self.page.clone())
    }
}

struct FailingSource;

#[async_trait]
impl LogSource for FailingSource {
    async fn fetch_page(&self, _request: &PageRequest) -> Result<Option<Vec<TrackingEvent>>> {
        Err(ChannelizerError::api_request("HTTP 401 Unauthorized"))
    }
}

/// 记录调用顺序的 Sink
#[derive(Default)]
struct RecordingSink {
    calls: Mutex<Vec<String>>,
    attributions: Mutex<Vec<AttributionRow>>,
    fail_on_batch: bool,
    fail_on_view: bool,
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn replace_batch(&self, batch: &MappedBatch) -> anyhow::Result<BatchWritten> {
        if self.fail_on_batch {
            anyhow::bail!("UNIQUE constraint failed: channel.seq");
        }
        self.calls.lock().unwrap().push(format!(
            "batch:{}/{}",
            batch.pageviews.len(),
            batch.attributions.len()
        ));
        *self.attributions.lock().unwrap() = batch.attributions.clone();
        Ok(BatchWritten {
            pageviews: batch.pageviews.len() as u64,
            attributions: batch.attributions.len() as u64,
        })
    }

    async fn rebuild_channel_view(&self, brand_domain: &str) -> anyhow::Result<()> {
        if self.fail_on_view {
            anyhow::bail!("database is locked");
        }
        self.calls
            .lock()
            .unwrap()
            .push(format!("view:{}", brand_domain));
        Ok(())
    }

    async fn channel_report(&self) -> anyhow::Result<Vec<ChannelCount>> {
        Ok(vec![ChannelCount {
            channel: Some("Direct".into()),
            pageview_count: 1,
        }])
    }
}

fn event(location: &str, referrer: Option<&str>) -> TrackingEvent {
    TrackingEvent {
        log_id: Some("1".into()),
        cookie_id: Some("c".into()),
        location: Some(location.to_string()),
        referrer_domain: referrer.map(str::to_string),
        timestamp: Some("2021-08-02 08:00:00".into()),
        action: Some("pageview".into()),
    }
}

fn sample_events() -> Vec<TrackingEvent> {
    vec![
        event("https://shop.com/?utm_medium=organic", Some("fashion-brand.com")),
        event("https://shop.com/?utm_medium=email", Some("fashion-brand.com")),
        event("https://shop.com/", Some("fashion-brand.com")),
        event("https://shop.com/", None),
        event("https://shop.com/?utm_campaign=aug", None),
    ]
}

fn test_config() -> PipelineConfig {
    let mut config = StaticConfig::default();
    config.api.api_key = "test-key".into();
    PipelineConfig::from_static(&config).unwrap()
}

#[cfg(test)]
mod mock_tests {
    use super::*;

    #[tokio::test]
    async fn test_run_writes_in_order_and_tallies() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = Pipeline::new(
            test_config(),
            Arc::new(FixedSource {
                page: Some(sample_events()),
            }),
            sink.clone(),
        );

        let outcome = pipeline.run().await.unwrap();
        let RunOutcome::Completed(summary) = outcome else {
            panic!("expected a completed run");
        };

        assert_eq!(summary.events, 5);
        assert_eq!(summary.pageviews_written, 5);
        assert_eq!(summary.attributions_written, 5);
        assert_eq!(summary.channel_tallies.len(), 7);
        assert_eq!(summary.tally(Channel::OrganicSearch), 1);
        assert_eq!(summary.tally(Channel::Email), 1);
        assert_eq!(summary.tally(Channel::Referral), 1);
        assert_eq!(summary.tally(Channel::Direct), 1);
        assert_eq!(summary.tally(Channel::Unknown), 1);
        assert_eq!(summary.tally(Channel::Social), 0);
        assert!(summary.finished_at >= summary.started_at);

        assert_eq!(
            *sink.calls.lock().unwrap(),
            vec![
                "batch:5/5".to_string(),
                "view:fashion-brand.com".to_string(),
            ]
        );
        let seqs: Vec<i64> = sink
            .attributions
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.seq)
            .collect();
        assert_eq!(seqs, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_no_data_is_a_noop() {
        for page in [None, Some(Vec::new())] {
            let sink = Arc::new(RecordingSink::default());
            let pipeline =
                Pipeline::new(test_config(), Arc::new(FixedSource { page }), sink.clone());

            assert_eq!(pipeline.run().await.unwrap(), RunOutcome::NoData);
            assert!(sink.calls.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_fetch_error_propagates_without_writes() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = Pipeline::new(test_config(), Arc::new(FailingSource), sink.clone());

        let err = pipeline.run().await.unwrap_err();
        assert_eq!(err.code(), "E003");
        assert!(sink.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sink_error_becomes_database_operation() {
        let sink = Arc::new(RecordingSink {
            fail_on_view: true,
            ..Default::default()
        });
        let pipeline = Pipeline::new(
            test_config(),
            Arc::new(FixedSource {
                page: Some(sample_events()),
            }),
            sink,
        );

        let err = pipeline.run().await.unwrap_err();
        assert_eq!(err.code(), "E007");
        assert!(err.message().contains("database is locked"));
    }

    #[tokio::test]
    async fn test_failed_batch_write_skips_view() {
        let sink = Arc::new(RecordingSink {
            fail_on_batch: true,
            ..Default::default()
        });
        let pipeline = Pipeline::new(
            test_config(),
            Arc::new(FixedSource {
                page: Some(sample_events()),
            }),
            sink.clone(),
        );

        let err = pipeline.run().await.unwrap_err();
        assert_eq!(err.code(), "E007");
        assert!(err.message().contains("UNIQUE constraint failed"));
        assert!(sink.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_report_reads_sink() {
        let pipeline = Pipeline::new(
            test_config(),
            Arc::new(FixedSource { page: None }),
            Arc::new(RecordingSink::default()),
        );
        let report = pipeline.report().await.unwrap();
        assert_eq!(report[0].channel.as_deref(), Some("Direct"));
    }
}

#[cfg(test)]
mod sqlite_tests {
    use super::*;

    async fn sqlite_storage(dir: &TempDir) -> Arc<SeaOrmStorage> {
        let db_path = dir.path().join("logs.db");
        let config = DatabaseConfig {
            database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
            ..Default::default()
        };
        Arc::new(SeaOrmStorage::new(&config).await.unwrap())
    }

    #[tokio::test]
    async fn test_end_to_end_into_sqlite() {
        let dir = TempDir::new().unwrap();
        let storage = sqlite_storage(&dir).await;
        let pipeline = Pipeline::new(
            test_config(),
            Arc::new(FixedSource {
                page: Some(sample_events()),
            }),
            storage.clone(),
        );

        assert!(matches!(pipeline.run().await.unwrap(), RunOutcome::Completed(_)));

        let report = pipeline.report().await.unwrap();
        let counts: Vec<(Option<&str>, u64)> = report
            .iter()
            .map(|r| (r.channel.as_deref(), r.pageview_count))
            .collect();
        assert_eq!(
            counts,
            vec![
                (Some("Email"), 1),
                (Some("Organic Search"), 1),
                (Some("Referral"), 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_no_data_keeps_previous_load() {
        let dir = TempDir::new().unwrap();
        let storage = sqlite_storage(&dir).await;

        let loaded = Pipeline::new(
            test_config(),
            Arc::new(FixedSource {
                page: Some(sample_events()),
            }),
            storage.clone(),
        );
        loaded.run().await.unwrap();

        let empty = Pipeline::new(
            test_config(),
            Arc::new(FixedSource { page: None }),
            storage.clone(),
        );
        assert_eq!(empty.run().await.unwrap(), RunOutcome::NoData);

        assert_eq!(storage.load_pageviews().await.unwrap().len(), 5);
        assert_eq!(empty.report().await.unwrap().len(), 3);
    }
}
