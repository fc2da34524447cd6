//! Channel report command

use colored::Colorize;

use crate::cli::ReportFormat;
use crate::config::{StaticConfig, validators};
use crate::interfaces::cli::CliError;
use crate::pipeline::{ChannelCount, EventSink};
use crate::storage::StorageFactory;
use crate::utils::report_export::{
    UNATTRIBUTED_LABEL, export_to_csv, export_to_json, render_json, write_csv,
};

pub async fn show_report(
    config: &StaticConfig,
    format: ReportFormat,
    output: Option<String>,
) -> Result<(), CliError> {
    validators::validate_brand_domain(&config.report.brand_domain)?;

    let brand_domain = config.report.brand_domain.as_str();
    let storage = StorageFactory::create(&config.database)
        .await
        .map_err(|e| CliError::StorageError(e.to_string()))?;

    // 视图以上一次 run 的品牌域名构建，按当前配置重建后再读
    EventSink::rebuild_channel_view(storage.as_ref(), brand_domain)
        .await
        .map_err(|e| CliError::StorageError(format!("Failed to rebuild view: {:#}", e)))?;
    let rows = EventSink::channel_report(storage.as_ref())
        .await
        .map_err(|e| CliError::StorageError(format!("Failed to read report: {:#}", e)))?;

    match (format, output) {
        (ReportFormat::Table, Some(_)) => Err(CliError::ParseError(
            "--output requires --format csv or --format json".to_string(),
        )),
        (ReportFormat::Table, None) => {
            print_table(&rows, brand_domain);
            Ok(())
        }
        (ReportFormat::Json, None) => {
            println!("{}", render_json(&rows)?);
            Ok(())
        }
        (ReportFormat::Csv, None) => Ok(write_csv(&rows, std::io::stdout().lock())?),
        (ReportFormat::Json, Some(path)) => {
            export_to_json(&rows, &path)?;
            print_exported(&path, rows.len());
            Ok(())
        }
        (ReportFormat::Csv, Some(path)) => {
            export_to_csv(&rows, &path)?;
            print_exported(&path, rows.len());
            Ok(())
        }
    }
}

fn print_table(rows: &[ChannelCount], brand_domain: &str) {
    if rows.is_empty() {
        println!(
            "{} No pageviews referred from '{}' (run `channelizer run` first)",
            "ℹ".bold().blue(),
            brand_domain
        );
        return;
    }

    println!(
        "{} {}",
        "Pageviews per channel, referrer matching".bold().green(),
        brand_domain.cyan()
    );
    println!();
    println!("  {}", format!("{:<16} {:>10}", "CHANNEL", "PAGEVIEWS").bold());
    let mut total = 0u64;
    for row in rows {
        total += row.pageview_count;
        println!(
            "  {:<16} {:>10}",
            row.channel.as_deref().unwrap_or(UNATTRIBUTED_LABEL),
            row.pageview_count
        );
    }
    println!("  {}", format!("{:<16} {:>10}", "total", total).green());
}

fn print_exported(path: &str, count: usize) {
    println!(
        "{} Exported {} rows to {}",
        "✓".bold().green(),
        count.to_string().green(),
        path.blue()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::{TrackingEvent, map_batch};
    use tempfile::TempDir;

    fn pageview(location: &str, referrer: &str) -> TrackingEvent {
        TrackingEvent {
            location: Some(location.to_string()),
            referrer_domain: Some(referrer.to_string()),
            action: Some("pageview".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_report_uses_configured_brand_domain() {
        let dir = TempDir::new().unwrap();
        let mut config = StaticConfig::default();
        config.database.database_url =
            format!("sqlite://{}?mode=rwc", dir.path().join("logs.db").display());

        let storage = StorageFactory::create(&config.database).await.unwrap();
        storage
            .replace_batch(&map_batch(&[
                pageview("https://shop.com/?utm_medium=cpc", "fashion-brand.com"),
                pageview("https://shop.com/?utm_medium=email", "other.com"),
            ]))
            .await
            .unwrap();
        // 上一次 run 使用的是另一个品牌域名
        storage.rebuild_channel_view("other.com").await.unwrap();

        config.report.brand_domain = "fashion-brand.com".into();
        let output = dir.path().join("report.json");
        show_report(
            &config,
            ReportFormat::Json,
            Some(output.display().to_string()),
        )
        .await
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["channel"], "Paid Search");
        assert_eq!(json[0]["pageview_count"], 1);
    }

    #[tokio::test]
    async fn test_table_with_output_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut config = StaticConfig::default();
        config.database.database_url =
            format!("sqlite://{}?mode=rwc", dir.path().join("logs.db").display());

        let err = show_report(&config, ReportFormat::Table, Some("out.txt".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::ParseError(_)));
    }
}
