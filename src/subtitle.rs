//! WebVTT to SRT conversion.
//!
//! The converter is a pure text transform: timing lines are parsed into typed
//! cue records, rewritten with comma-separated milliseconds and a sequential
//! index, and every other line passes through verbatim.

use regex::Regex;
use std::fmt;

/// One endpoint of a cue timing. VTT allows the hour component to be
/// omitted; SRT requires it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CueTimestamp {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub millis: u32,
}

impl fmt::Display for CueTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

/// A parsed `START --> END` timing line. Cue settings after the end
/// timestamp are carried through untouched.
#[derive(Debug, Clone)]
struct CueTiming<'a> {
    start: CueTimestamp,
    end: CueTimestamp,
    trailing: &'a str,
}

/// Classification of one source line.
enum Segment<'a> {
    Timing(CueTiming<'a>),
    Verbatim(&'a str),
}

/// Convert a WebVTT document into SRT text.
///
/// Every timing line becomes one numbered block, labelled 1..N in document
/// order with no gaps. Lines that do not match the timing pattern are left
/// exactly as they were, so malformed cues neither break the conversion nor
/// consume an index.
pub fn vtt_to_srt(source: &str) -> String {
    // Some sources glue the WEBVTT header directly onto the first timing
    // line; dropping the header token leaves just the timestamp.
    let header = Regex::new(r"WEBVTT\s+(\d{2}:)").unwrap();
    let stripped = header.replace_all(source, "$1");

    let timing = Regex::new(
        r"^((?:\d{2}:)?\d{2}:\d{2})\.(\d{3})\s+-->\s+((?:\d{2}:)?\d{2}:\d{2})\.(\d{3})(.*)$",
    )
    .unwrap();

    let mut out = String::with_capacity(stripped.len());
    let mut index = 0u32;

    for segment in stripped.lines().map(|line| classify(&timing, line)) {
        match segment {
            Segment::Timing(cue) => {
                index += 1;
                out.push_str(&format!(
                    "{}\n{} --> {}{}\n",
                    index, cue.start, cue.end, cue.trailing
                ));
            }
            Segment::Verbatim(line) => {
                out.push_str(line);
                out.push('\n');
            }
        }
    }

    if !stripped.ends_with('\n') {
        out.pop();
    }
    out
}

fn classify<'a>(timing: &Regex, line: &'a str) -> Segment<'a> {
    let Some(caps) = timing.captures(line) else {
        return Segment::Verbatim(line);
    };
    // Each endpoint is normalized on its own: one may carry an hour
    // component while the other does not.
    let start = parse_timestamp(&caps[1], &caps[2]);
    let end = parse_timestamp(&caps[3], &caps[4]);
    match (start, end) {
        (Some(start), Some(end)) => Segment::Timing(CueTiming {
            start,
            end,
            trailing: caps.get(5).map_or("", |m| m.as_str()),
        }),
        _ => Segment::Verbatim(line),
    }
}

/// Parse `HH:MM:SS` or bare `MM:SS` plus a millisecond field. A missing
/// hour component defaults to zero, which pads the SRT output with `00:`.
fn parse_timestamp(clock: &str, millis: &str) -> Option<CueTimestamp> {
    let mut parts = clock.split(':').rev();
    let seconds = parts.next()?.parse().ok()?;
    let minutes = parts.next()?.parse().ok()?;
    let hours = match parts.next() {
        Some(h) => h.parse().ok()?,
        None => 0,
    };
    Some(CueTimestamp {
        hours,
        minutes,
        seconds,
        millis: millis.parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_labels_in_document_order() {
        let vtt = "WEBVTT\n\n00:01.000 --> 00:03.000\nfirst\n\n00:04.000 --> 00:06.000\nsecond\n\n00:07.000 --> 00:09.000\nthird\n";
        let srt = vtt_to_srt(vtt);
        let labels: Vec<&str> = srt
            .lines()
            .filter(|l| l.chars().all(|c| c.is_ascii_digit()) && !l.is_empty())
            .collect();
        assert_eq!(labels, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_short_timestamp_gains_hour_component() {
        let srt = vtt_to_srt("00:01.500 --> 00:03.250\nhello\n");
        assert!(srt.contains("00:00:01,500 --> 00:00:03,250"));
    }

    #[test]
    fn test_long_timestamp_keeps_hour_component() {
        let srt = vtt_to_srt("01:02:03.400 --> 01:02:05.600\nhello\n");
        assert!(srt.contains("01:02:03,400 --> 01:02:05,600"));
    }

    #[test]
    fn test_mixed_forms_normalized_independently() {
        let srt = vtt_to_srt("59:58.000 --> 01:00:01.000\nrollover\n");
        assert!(srt.contains("00:59:58,000 --> 01:00:01,000"));
    }

    #[test]
    fn test_cue_text_preserved_verbatim() {
        let vtt = "WEBVTT\n\n00:01.000 --> 00:03.000\n<v Speaker>Hello --> world</v>\n  indented line\n";
        let srt = vtt_to_srt(vtt);
        assert!(srt.contains("<v Speaker>Hello --> world</v>\n  indented line"));
    }

    #[test]
    fn test_header_adjacent_to_timing_line_collapses() {
        let vtt = "WEBVTT\n00:01.000 --> 00:03.000\nhello\n";
        let srt = vtt_to_srt(vtt);
        assert!(srt.starts_with("1\n00:00:01,000 --> 00:00:03,000"));
        assert!(!srt.contains("WEBVTT"));
    }

    #[test]
    fn test_plain_header_line_passes_through() {
        // A header separated from the cues by an identifier line is not the
        // glued-artifact case and stays put.
        let vtt = "WEBVTT\n\ncue-1\n00:01.000 --> 00:03.000\nhello\n";
        let srt = vtt_to_srt(vtt);
        assert!(srt.starts_with("WEBVTT\n"));
        assert!(srt.contains("cue-1\n1\n00:00:01,000 --> 00:00:03,000"));
    }

    #[test]
    fn test_malformed_timing_line_consumes_no_label() {
        let vtt = "00:01.000 --> 00:03.000\nok\n\n00:05 --> 00:07\nbroken\n\n00:08.000 --> 00:09.000\nok again\n";
        let srt = vtt_to_srt(vtt);
        assert!(srt.contains("00:05 --> 00:07"));
        assert!(srt.contains("1\n00:00:01,000"));
        assert!(srt.contains("2\n00:00:08,000"));
        assert!(!srt.contains("3\n"));
    }

    #[test]
    fn test_cue_settings_carried_through() {
        let srt = vtt_to_srt("00:01.000 --> 00:03.000 align:start position:10%\nhi\n");
        assert!(srt.contains("00:00:01,000 --> 00:00:03,000 align:start position:10%"));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(vtt_to_srt(""), "");
    }
}
