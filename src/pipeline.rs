//! Sequential download orchestration with per-item failure isolation.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::client::CourseClient;
use crate::config::Config;
use crate::error::DownloadError;
use crate::fetch::FileFetcher;
use crate::models::{CourseItem, ItemContent, SubtitleTrack, VideoRendition};
use crate::subtitle::vtt_to_srt;

/// Counts collected over one run. Per-item failures land here instead of
/// aborting the traversal.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub items_total: usize,
    pub items_failed: usize,
    pub videos_downloaded: usize,
    pub subtitles_converted: usize,
    pub subtitles_failed: usize,
}

/// Walks chapters, items, and lectures strictly sequentially, downloading
/// each lecture's video rendition and subtitle tracks into the course folder.
///
/// Course-title resolution and item listing are fatal phases; everything
/// inside a single item is caught at the item boundary so one broken lecture
/// never stops the rest of the course.
pub struct DownloadPipeline {
    client: CourseClient,
    fetcher: FileFetcher,
    output_dir: PathBuf,
}

impl DownloadPipeline {
    pub fn new(config: &Config) -> Result<Self, DownloadError> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        Ok(Self {
            client: CourseClient::new(
                &config.api_base,
                &config.course_url,
                &config.authorization,
                timeout,
            )?,
            fetcher: FileFetcher::new(timeout)?,
            output_dir: config.output_dir.clone(),
        })
    }

    pub async fn run(&self) -> Result<RunReport, DownloadError> {
        let title = self.client.fetch_course_title().await?;
        let course_dir = self.output_dir.join(sanitize_title(&title));
        // create_dir_all is a no-op on an existing folder; reruns reuse it.
        tokio::fs::create_dir_all(&course_dir).await?;
        info!("📁 Course folder: {}", course_dir.display());

        let chapters = self.client.fetch_course_items().await?;
        let mut report = RunReport::default();

        for chapter in &chapters {
            for item in &chapter.items {
                if !item.is_lecture() {
                    debug!(
                        "skipping non-lecture item {} ({:?})",
                        item.chapter_number, item.kind
                    );
                    continue;
                }
                let Some(content) = &item.content else {
                    debug!("skipping item {} with no content", item.chapter_number);
                    continue;
                };
                report.items_total += 1;
                if let Err(e) = self
                    .process_item(item, content, &course_dir, &mut report)
                    .await
                {
                    error!("item {} failed: {}", item.chapter_number, e);
                    report.items_failed += 1;
                }
            }
        }

        Ok(report)
    }

    async fn process_item(
        &self,
        item: &CourseItem,
        content: &ItemContent,
        course_dir: &Path,
        report: &mut RunReport,
    ) -> Result<(), DownloadError> {
        let detail = self.client.fetch_lecture_detail(&content.id).await?;
        let stem = format!("{}-{}", item.chapter_number, sanitize_title(&detail.title));

        if let Some(video) = select_rendition(&detail.video.videos) {
            info!("⬇️ Downloading video: {}.mp4 ({}p)", stem, video.height);
            let dest = course_dir.join(format!("{}.mp4", stem));
            self.fetcher.fetch_to_file(&video.link, &dest).await?;
            report.videos_downloaded += 1;
        } else {
            debug!("no rendition above 720p for {}, skipping video", stem);
        }

        for track in detail.video.subtitles.iter().flatten() {
            match self.process_subtitle(track, &stem, course_dir).await {
                Ok(()) => report.subtitles_converted += 1,
                Err(e) => {
                    warn!("subtitle {}.{} failed: {}", stem, track.language, e);
                    report.subtitles_failed += 1;
                }
            }
        }

        Ok(())
    }

    /// Download the raw VTT next to the working directory, convert it, write
    /// the SRT into the course folder, then delete the raw file. The raw
    /// file is only removed after a successful write.
    async fn process_subtitle(
        &self,
        track: &SubtitleTrack,
        stem: &str,
        course_dir: &Path,
    ) -> Result<(), DownloadError> {
        let raw_path = self
            .output_dir
            .join(format!("{}.{}.vtt", stem, track.language));
        let srt_path = course_dir.join(format!("{}.{}.srt", stem, track.language));

        info!("⬇️ Downloading subtitle: {}.{}.vtt", stem, track.language);
        self.fetcher.fetch_to_file(&track.link, &raw_path).await?;

        info!("🔤 Converting to SRT: {}", srt_path.display());
        convert_subtitle_file(&raw_path, &srt_path).await?;
        remove_raw_subtitle(&raw_path).await;
        Ok(())
    }
}

/// Once the SRT is on disk the track is complete; a leftover raw file is
/// only worth a warning.
async fn remove_raw_subtitle(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!("could not delete raw subtitle {}: {}", path.display(), e);
    }
}

async fn convert_subtitle_file(raw: &Path, dest: &Path) -> Result<(), DownloadError> {
    let source = tokio::fs::read_to_string(raw)
        .await
        .map_err(|e| DownloadError::Conversion(format!("cannot read {}: {}", raw.display(), e)))?;
    let srt = vtt_to_srt(&source);
    tokio::fs::write(dest, srt).await?;
    Ok(())
}

/// First rendition above 720p, a good-enough-quality policy rather than a
/// best-quality one. `None` means the video step is skipped for this item.
pub fn select_rendition(videos: &[VideoRendition]) -> Option<&VideoRendition> {
    videos.iter().find(|v| v.height > 720)
}

/// Replace only the first `/` in a title so it cannot split the filename
/// into an unintended subdirectory.
pub fn sanitize_title(title: &str) -> String {
    title.replacen('/', "-", 1)
}
