use serde::Deserialize;
use std::fmt;

/// One chapter of the course item listing. The vendor omits `items` for
/// empty chapters, so it defaults to an empty list.
#[derive(Debug, Clone, Deserialize)]
pub struct Chapter {
    #[serde(default)]
    pub items: Vec<CourseItem>,
}

/// Leaf entry of the item listing. Only items of type `LECTURE` carry
/// downloadable content; other kinds (assignments, quizzes) are skipped and
/// may omit `content` entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseItem {
    #[serde(rename = "chapterNumber")]
    pub chapter_number: ChapterNumber,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub content: Option<ItemContent>,
}

impl CourseItem {
    pub fn is_lecture(&self) -> bool {
        match &self.kind {
            Some(kind) => kind == "LECTURE",
            None => true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemContent {
    #[serde(rename = "_id")]
    pub id: String,
}

/// Chapter numbers arrive as either a bare number or a dotted string
/// depending on course age; both print the same way into filenames.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ChapterNumber {
    Number(u64),
    Text(String),
}

impl fmt::Display for ChapterNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChapterNumber::Number(n) => write!(f, "{}", n),
            ChapterNumber::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseMeta {
    pub title: String,
}

/// Full lecture payload: title plus the available video renditions and
/// subtitle tracks.
#[derive(Debug, Clone, Deserialize)]
pub struct LectureDetail {
    pub title: String,
    #[serde(default)]
    pub video: VideoAssets,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoAssets {
    #[serde(default)]
    pub videos: Vec<VideoRendition>,
    /// The vendor emits explicit `null` entries for withdrawn tracks; they
    /// are skipped, not treated as errors.
    #[serde(default)]
    pub subtitles: Vec<Option<SubtitleTrack>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoRendition {
    pub height: u32,
    pub link: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubtitleTrack {
    pub language: String,
    pub link: String,
}
