use std::fmt;
use std::path::Path;
use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::{Result, Context};

use crate::file_utils::FileManager;
use serde::Serialize;
use log::{debug, warn};

// @module: Timed-text caption parsing

/// Marker separating the start and end timestamps on a timing line
pub const TIMING_DELIMITER: &str = "-->";

// @const: Strict timestamp shape (SS.mmm, MM:SS.mmm or HH:MM:SS.mmm)
static STRICT_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d+:){0,2}\d+(?:\.\d+)?$").unwrap()
});

// @struct: Single caption entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cue {
    // @field: Start time in seconds
    pub start_time: f64,

    // @field: End time in seconds
    pub end_time: f64,

    // @field: Caption text, lines joined with a single space
    pub text: String,
}

impl Cue {
    /// Creates a new cue
    pub fn new(start_time: f64, end_time: f64, text: impl Into<String>) -> Self {
        Cue {
            start_time,
            end_time,
            text: text.into(),
        }
    }

    /// Whether `time` falls inside the cue, both ends inclusive.
    ///
    /// A cue with a NaN bound never contains anything.
    pub fn contains(&self, time: f64) -> bool {
        self.start_time <= time && time <= self.end_time
    }

    /// Length of the cue in seconds
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Parse a caption timestamp into seconds.
    ///
    /// Accepts `HH:MM:SS.mmm`, `MM:SS.mmm` and `SS.mmm`, with the fractional part
    /// optional. The number of colon-separated fields decides which of hours,
    /// minutes and seconds are present. Empty fields count as zero and
    /// non-numeric fields produce NaN; no error is raised.
    pub fn parse_timestamp(timestamp: &str) -> f64 {
        let fields: Vec<&str> = timestamp.trim().split(':').collect();
        let last = fields[fields.len() - 1];

        let (whole, fraction) = match last.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (last, ""),
        };
        let seconds = parse_field(whole) + parse_fraction(fraction);

        match fields.len() {
            1 => seconds,
            2 => parse_field(fields[0]) * 60.0 + seconds,
            3 => parse_field(fields[0]) * 3600.0 + parse_field(fields[1]) * 60.0 + seconds,
            _ => f64::NAN,
        }
    }

    /// Check whether a timestamp string has one of the accepted shapes.
    ///
    /// [`Cue::parse_timestamp`] never fails, so callers that need strict input
    /// validate the raw fields with this first.
    pub fn is_well_formed_timestamp(timestamp: &str) -> bool {
        STRICT_TIMESTAMP_REGEX.is_match(timestamp.trim())
    }

    /// Format seconds as a WebVTT timestamp (HH:MM:SS.mmm)
    pub fn format_timestamp(seconds: f64) -> String {
        // Saturating cast: NaN and negatives render as zero
        let ms = (seconds * 1000.0).round() as u64;
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let secs = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
    }
}

fn parse_field(field: &str) -> f64 {
    let field = field.trim();
    if field.is_empty() {
        return 0.0;
    }
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return f64::NAN;
    }
    field.parse().unwrap_or(f64::NAN)
}

// "250" -> 0.250, "5" -> 0.5
fn parse_fraction(fraction: &str) -> f64 {
    let fraction = fraction.trim();
    if fraction.is_empty() {
        return 0.0;
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return f64::NAN;
    }
    format!("0.{}", fraction).parse().unwrap_or(f64::NAN)
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{} {} {}",
            Self::format_timestamp(self.start_time),
            TIMING_DELIMITER,
            Self::format_timestamp(self.end_time)
        )?;
        writeln!(f, "{}", self.text)
    }
}

/// Ordered sequence of cues loaded from one caption resource.
///
/// Cues keep the order they had in the source; nothing is re-sorted. A track is
/// never edited after construction, a reload builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaptionTrack {
    cues: Vec<Cue>,
}

impl CaptionTrack {
    /// Build a track from cues already in the desired order
    pub fn from_cues(cues: Vec<Cue>) -> Self {
        CaptionTrack { cues }
    }

    /// Parse timed-text content into a track.
    ///
    /// Everything before the first timing line is skipped as header. Each timing
    /// line opens a cue whose text is the following non-blank lines joined with a
    /// single space; a blank line or the end of input closes it. Any other line is
    /// ignored.
    pub fn parse(content: &str) -> Self {
        let mut cues = Vec::new();
        let mut lines = content.lines().peekable();

        while let Some(line) = lines.next() {
            let Some((start_field, rest)) = line.split_once(TIMING_DELIMITER) else {
                continue;
            };

            // Cue settings may trail the end timestamp
            let end_field = rest.split_whitespace().next().unwrap_or("");
            let start_time = Cue::parse_timestamp(start_field);
            let end_time = Cue::parse_timestamp(end_field);

            let mut text_lines = Vec::new();
            while let Some(next) = lines.peek() {
                let trimmed = next.trim();
                if trimmed.is_empty() {
                    break;
                }
                text_lines.push(trimmed);
                lines.next();
            }

            if start_time.is_nan() || end_time.is_nan() {
                warn!("Malformed timing line kept as-is: {}", line.trim());
            }

            cues.push(Cue::new(start_time, end_time, text_lines.join(" ")));
        }

        debug!("Parsed {} caption cue(s)", cues.len());
        CaptionTrack { cues }
    }

    /// Read and parse a local caption file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)
            .with_context(|| format!("Failed to load caption file: {}", path.display()))?;
        let track = Self::parse(&content);
        if track.is_empty() {
            warn!("No cues found in {}", path.display());
        }
        Ok(track)
    }

    /// First cue, in stored order, whose interval contains `time`.
    ///
    /// Overlapping cues resolve to the one inserted first, regardless of which
    /// starts earlier.
    pub fn active_cue_at(&self, time: f64) -> Option<&Cue> {
        self.cues.iter().find(|cue| cue.contains(time))
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cue> {
        self.cues.iter()
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Latest end time in the track, ignoring NaN bounds
    pub fn total_duration(&self) -> f64 {
        self.cues
            .iter()
            .map(|cue| cue.end_time)
            .filter(|end| !end.is_nan())
            .fold(0.0, f64::max)
    }

    /// Number of adjacent cue pairs where the first ends after the next starts
    pub fn overlap_count(&self) -> usize {
        self.cues
            .windows(2)
            .filter(|pair| pair[0].end_time > pair[1].start_time)
            .count()
    }

    /// Render the track as a WebVTT document
    pub fn to_vtt_string(&self) -> String {
        let mut output = String::from("WEBVTT\n\n");
        for cue in &self.cues {
            output.push_str(&cue.to_string());
            output.push('\n');
        }
        output
    }
}

impl<'a> IntoIterator for &'a CaptionTrack {
    type Item = &'a Cue;
    type IntoIter = std::slice::Iter<'a, Cue>;

    fn into_iter(self) -> Self::IntoIter {
        self.cues.iter()
    }
}

impl fmt::Display for CaptionTrack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Caption Track")?;
        writeln!(f, "Cues: {}", self.cues.len())?;
        writeln!(f, "Duration: {}", Cue::format_timestamp(self.total_duration()))?;
        Ok(())
    }
}
