use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;
use tracing::{info, warn};

mod client;
mod config;
mod error;
mod fetch;
mod models;
mod pipeline;
mod subtitle;

use crate::config::Config;
use crate::pipeline::DownloadPipeline;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "course_dl=info,warn".into()),
        )
        .init();

    let matches = Command::new("course-dl")
        .version("0.1.0")
        .about("Download course videos and subtitles, converting VTT captions to SRT")
        .arg(
            Arg::new("course-url")
                .short('u')
                .long("course-url")
                .value_name("URL")
                .help("Course page URL, e.g. https://hahow.in/courses/<id>"),
        )
        .arg(
            Arg::new("authorization")
                .short('a')
                .long("authorization")
                .value_name("TOKEN")
                .help("Authorization header value for the vendor API"),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .help("Directory to create the course folder under"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to a TOML configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Load configuration; CLI flags override file and environment values
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => Config::from_file(path)?,
        None => Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }),
    };

    if let Some(course_url) = matches.get_one::<String>("course-url") {
        config.course_url = course_url.clone();
    }
    if let Some(authorization) = matches.get_one::<String>("authorization") {
        config.authorization = authorization.clone();
    }
    if let Some(output_dir) = matches.get_one::<String>("output-dir") {
        config.output_dir = PathBuf::from(output_dir);
    }

    config.validate()?;

    if matches.get_flag("verbose") {
        info!("Verbose logging enabled");
    }

    info!("🚀 course-dl starting...");
    info!("🔗 Course URL: {}", config.course_url);
    info!("📂 Output directory: {}", config.output_dir.display());

    let pipeline = DownloadPipeline::new(&config)?;

    let start_time = std::time::Instant::now();
    let report = pipeline.run().await?;
    let duration = start_time.elapsed();

    info!("🎉 Run completed in {:.2}s", duration.as_secs_f64());
    info!(
        "✅ Items processed: {}/{}",
        report.items_total - report.items_failed,
        report.items_total
    );
    info!("🎬 Videos downloaded: {}", report.videos_downloaded);
    info!("💬 Subtitles converted: {}", report.subtitles_converted);
    if report.items_failed > 0 || report.subtitles_failed > 0 {
        warn!(
            "⚠️ Failures: {} items, {} subtitles (see log above)",
            report.items_failed, report.subtitles_failed
        );
    }

    Ok(())
}
