//! Run pipeline command

use colored::Colorize;

use crate::config::StaticConfig;
use crate::interfaces::cli::CliError;
use crate::pipeline::{Pipeline, PipelineConfig, RunOutcome, RunSummary};

pub async fn run_pipeline(
    config: &StaticConfig,
    from_date: Option<String>,
    to_date: Option<String>,
) -> Result<(), CliError> {
    // 命令行日期优先于配置文件
    let mut effective = config.clone();
    if from_date.is_some() {
        effective.api.from_date = from_date;
    }
    if to_date.is_some() {
        effective.api.to_date = to_date;
    }
    let pipeline_config = PipelineConfig::from_static(&effective)?;

    let pipeline = Pipeline::connect(pipeline_config, &config.database).await?;

    match pipeline.run().await? {
        RunOutcome::NoData => {
            println!(
                "{} No tracking logs returned for the requested range, database left untouched",
                "ℹ".bold().blue()
            );
        }
        RunOutcome::Completed(summary) => print_summary(&summary),
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!(
        "{} Processed {} events in {:.1}s",
        "✓".bold().green(),
        summary.events.to_string().green(),
        summary.duration().num_milliseconds() as f64 / 1000.0
    );
    println!(
        "  {} pageviews, {} channel rows written",
        summary.pageviews_written.to_string().cyan(),
        summary.attributions_written.to_string().cyan()
    );
    println!();
    println!("{}", "Events per channel:".bold());
    for (channel, count) in &summary.channel_tallies {
        let line = format!("  {:<16} {:>10}", channel.as_str(), count);
        if *count == 0 {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }
}
