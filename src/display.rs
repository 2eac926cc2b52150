/*!
 * Display surfaces that captions are published to.
 *
 * - `RecordingDisplay`: keeps every publication, for tests and embedding
 * - `TerminalDisplay`: shows the caption as the message of a progress bar
 */

use indicatif::{ProgressBar, ProgressStyle};

/// Something that can show one line of caption text
///
/// `active` is true while the text belongs to a cue, false for placeholders and
/// status messages.
pub trait DisplaySurface {
    fn show(&mut self, text: &str, active: bool);
}

impl<D: DisplaySurface + ?Sized> DisplaySurface for Box<D> {
    fn show(&mut self, text: &str, active: bool) {
        (**self).show(text, active)
    }
}

// @struct: Display surface that records everything it is asked to show
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    publications: Vec<(String, bool)>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(text, active)` pair in publication order
    pub fn publications(&self) -> &[(String, bool)] {
        &self.publications
    }

    /// Most recent publication, if any
    pub fn last(&self) -> Option<(&str, bool)> {
        self.publications
            .last()
            .map(|(text, active)| (text.as_str(), *active))
    }

    /// How many times `text` has been published
    pub fn count_of(&self, text: &str) -> usize {
        self.publications.iter().filter(|(t, _)| t == text).count()
    }

    pub fn is_untouched(&self) -> bool {
        self.publications.is_empty()
    }
}

impl DisplaySurface for RecordingDisplay {
    fn show(&mut self, text: &str, active: bool) {
        self.publications.push((text.to_string(), active));
    }
}

// @struct: Terminal surface backed by an indicatif progress bar
pub struct TerminalDisplay {
    bar: ProgressBar,
    active_style: ProgressStyle,
    idle_style: ProgressStyle,
    active: Option<bool>,
}

impl TerminalDisplay {
    /// Create a surface whose bar spans `duration_secs` of playback
    pub fn new(duration_secs: f64) -> Self {
        let length_ms = (duration_secs.max(0.0) * 1000.0).round() as u64;
        let bar = ProgressBar::new(length_ms);

        let active_style = Self::style("{spinner:.green} [{bar:30.cyan/blue}] {msg:.bold}");
        let idle_style = Self::style("{spinner:.green} [{bar:30.cyan/blue}] {msg:.dim}");
        bar.set_style(idle_style.clone());

        Self {
            bar,
            active_style,
            idle_style,
            active: None,
        }
    }

    fn style(template: &str) -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(template)
            .or_else(|_| ProgressStyle::default_bar().template("[{bar:30}] {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
    }

    /// Resize the bar once the playback length is known
    pub fn set_duration(&self, duration_secs: f64) {
        self.bar.set_length((duration_secs.max(0.0) * 1000.0).round() as u64);
    }

    /// Move the bar to the current playback position
    pub fn set_position(&self, seconds: f64) {
        self.bar.set_position((seconds.max(0.0) * 1000.0).round() as u64);
    }

    pub fn finish(&self) {
        self.bar.finish();
    }
}

impl DisplaySurface for TerminalDisplay {
    fn show(&mut self, text: &str, active: bool) {
        if self.active != Some(active) {
            let style = if active { &self.active_style } else { &self.idle_style };
            self.bar.set_style(style.clone());
            self.active = Some(active);
        }
        self.bar.set_message(text.to_string());
    }
}
