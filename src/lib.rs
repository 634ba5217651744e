/// course-dl
///
/// Downloads a remote course's video lectures and subtitle tracks through the
/// vendor API and converts WebVTT captions to SRT.

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod subtitle;

// Re-export main types for easy access
pub use crate::client::CourseClient;
pub use crate::config::Config;
pub use crate::error::DownloadError;
pub use crate::fetch::FileFetcher;
pub use crate::models::{Chapter, CourseItem, LectureDetail, SubtitleTrack, VideoRendition};
pub use crate::pipeline::{DownloadPipeline, RunReport};
pub use crate::subtitle::vtt_to_srt;
