//! Timed caption cues and their layout settings.
//!
//! A WebVTT timing line may be followed by a settings list:
//!
//! ```text
//! 00:00:01.000 --> 00:00:04.000 line:10% position:50% align:middle
//! ```
//!
//! [`Cue::apply_settings`] takes everything after the end timestamp. Each
//! whitespace separated `key:value` word is validated on its own; a malformed
//! word or an unknown key is skipped and the rest of the list still applies.
//! A rejected value never changes the setting it names.

pub mod defaults;
mod settings;
mod tokenizer;

#[cfg(test)]
mod tests;

use core::{fmt, time::Duration};

use bstr::ByteSlice;
use settings::{in_percent_range, parse_line, parse_percentage};
pub use settings::{Align, CueSettings, Line, Vertical};
use tokenizer::{SettingsTokens, Token};
use tracing::{debug, trace};

use crate::CueError;

/// Kind of track a cue belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum CueKind {
    /// A cue from a WebVTT track.
    #[default]
    WebVtt,
}

/// Cue start or end time, in milliseconds from the start of the media.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(u64);

impl Timestamp {
    /// Timestamp `ms` milliseconds from the start.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Timestamp from clock components. Components past their usual range
    /// carry over; the total saturates at `u64::MAX` milliseconds.
    #[must_use]
    pub const fn from_hms(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Self {
        let minutes = hours.saturating_mul(60).saturating_add(minutes);
        let seconds = minutes.saturating_mul(60).saturating_add(seconds);
        Self(seconds.saturating_mul(1000).saturating_add(millis))
    }

    /// Milliseconds from the start.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

impl From<Timestamp> for Duration {
    fn from(ts: Timestamp) -> Self {
        Duration::from_millis(ts.0)
    }
}

/// WebVTT timestamp form, `hh:mm:ss.ttt`. Hours grow past two digits as
/// needed.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.0 % 1000;
        let total_secs = self.0 / 1000;
        let (h, m, s) = (total_secs / 3600, (total_secs / 60) % 60, total_secs % 60);
        write!(f, "{h:02}:{m:02}:{s:02}.{ms:03}")
    }
}

/// One timed caption entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cue {
    kind: CueKind,
    start_time: Timestamp,
    end_time: Timestamp,
    id: String,
    text: String,
    dirty: bool,
    settings: CueSettings,
}

impl Cue {
    /// Empty cue with default settings.
    #[must_use]
    pub fn new(kind: CueKind) -> Self {
        Self::with_content(kind, Timestamp::default(), Timestamp::default(), "", "")
    }

    /// Cue with timing, identifier and text. Non-empty text marks the cue
    /// dirty.
    #[must_use]
    pub fn with_content(
        kind: CueKind,
        start_time: Timestamp,
        end_time: Timestamp,
        id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let text = text.into();
        Self {
            kind,
            start_time,
            end_time,
            id: id.into(),
            dirty: !text.is_empty(),
            text,
            settings: defaults::SETTINGS,
        }
    }

    /// Track kind.
    #[must_use]
    pub fn kind(&self) -> CueKind {
        self.kind
    }

    /// Time the cue becomes active.
    #[must_use]
    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    /// Time the cue stops being active.
    #[must_use]
    pub fn end_time(&self) -> Timestamp {
        self.end_time
    }

    /// Cue identifier, empty when the track gave none.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw cue payload.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text changed since the layout consumer last called
    /// [`mark_clean`](Self::mark_clean).
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag once the text has been laid out.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Current layout settings.
    #[must_use]
    pub fn settings(&self) -> &CueSettings {
        &self.settings
    }

    /// Replaces the identifier.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Replaces the payload. Non-empty text marks the cue dirty, empty text
    /// clears the flag.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.dirty = !self.text.is_empty();
    }

    /// Sets the start time.
    pub fn set_start_time(&mut self, ts: Timestamp) {
        self.start_time = ts;
    }

    /// Sets the end time.
    pub fn set_end_time(&mut self, ts: Timestamp) {
        self.end_time = ts;
    }

    /// Restores every layout setting to its initial value.
    pub fn reset_cue_settings(&mut self) {
        self.settings = defaults::SETTINGS;
    }

    /// Parses a cue settings list and applies every valid setting in it.
    /// Returns how many settings were applied.
    ///
    /// ```rust
    /// use timedtext::{Cue, CueKind, Vertical};
    ///
    /// let mut cue = Cue::new(CueKind::WebVtt);
    /// assert_eq!(cue.apply_settings("vertical:rl size:101% region:top"), 1);
    /// assert_eq!(cue.settings().vertical(), Vertical::VerticalRightToLeft);
    /// assert_eq!(cue.settings().size(), 100);
    /// ```
    pub fn apply_settings(&mut self, settings: &str) -> usize {
        let mut applied = 0;
        for token in SettingsTokens::new(settings.as_bytes()) {
            let (key, value) = match token {
                Token::Setting { key, value } => (key, value),
                Token::Malformed(word) => {
                    debug!(word = %word.as_bstr(), "skipping malformed cue setting");
                    continue;
                }
                Token::Oversized(len) => {
                    debug!(len, "skipping oversized cue setting");
                    continue;
                }
            };

            let result = match key {
                b"align" => self.set_align_str(value),
                b"line" => self.set_line_str(value),
                b"position" => self.set_position_str(value),
                b"size" => self.set_size_str(value),
                b"vertical" => self.set_vertical_str(value),
                _ => {
                    trace!(key = %key.as_bstr(), "ignoring unknown cue setting");
                    continue;
                }
            };
            match result {
                Ok(()) => applied += 1,
                Err(err) => debug!(%err, "rejected cue setting"),
            }
        }
        applied
    }

    // --------------------------------------------------------------------------------------------
    // Typed setters
    // --------------------------------------------------------------------------------------------

    /// Sets the line position. With `snap_to_lines` any line index is
    /// accepted, negative ones included; without it `line` is a percentage
    /// and must lie in `0..=100`.
    ///
    /// # Errors
    ///
    /// [`CueError::OutOfRange`] for a percentage outside `0..=100`.
    pub fn set_line(&mut self, line: i32, snap_to_lines: bool) -> Result<(), CueError> {
        self.settings.line = if snap_to_lines {
            Line::Lines(line)
        } else if in_percent_range(line) {
            Line::Percent(line)
        } else {
            return Err(CueError::OutOfRange {
                setting: "line",
                value: line,
            });
        };
        Ok(())
    }

    /// Sets the cue box size, a percentage.
    ///
    /// # Errors
    ///
    /// [`CueError::OutOfRange`] outside `0..=100`.
    pub fn set_size(&mut self, size: i32) -> Result<(), CueError> {
        if !in_percent_range(size) {
            return Err(CueError::OutOfRange {
                setting: "size",
                value: size,
            });
        }
        self.settings.size = size;
        Ok(())
    }

    /// Sets the text position, a percentage.
    ///
    /// # Errors
    ///
    /// [`CueError::OutOfRange`] outside `0..=100`.
    pub fn set_position(&mut self, position: i32) -> Result<(), CueError> {
        if !in_percent_range(position) {
            return Err(CueError::OutOfRange {
                setting: "position",
                value: position,
            });
        }
        self.settings.position = position;
        Ok(())
    }

    /// Sets the writing direction.
    pub fn set_vertical(&mut self, vertical: Vertical) {
        self.settings.vertical = vertical;
    }

    /// Sets the text alignment.
    pub fn set_align(&mut self, align: Align) {
        self.settings.align = align;
    }

    // --------------------------------------------------------------------------------------------
    // String setters
    // --------------------------------------------------------------------------------------------

    /// Sets the line position from a `line:` value such as `10`, `-2` or
    /// `25%`. A trailing `%` turns snap-to-lines off.
    ///
    /// # Errors
    ///
    /// [`CueError::Malformed`] when the value does not match the grammar,
    /// [`CueError::OutOfRange`] for a percentage above 100.
    pub fn set_line_str(&mut self, value: impl AsRef<[u8]>) -> Result<(), CueError> {
        let value = value.as_ref();
        let (line, snap) = parse_line(value).ok_or_else(|| CueError::malformed("line", value))?;
        self.set_line(line, snap)
    }

    /// Sets the size from a `size:` value such as `80%`.
    ///
    /// # Errors
    ///
    /// [`CueError::Malformed`] when the value is not digits followed by `%`,
    /// [`CueError::OutOfRange`] above 100.
    pub fn set_size_str(&mut self, value: impl AsRef<[u8]>) -> Result<(), CueError> {
        let value = value.as_ref();
        let size = parse_percentage(value).ok_or_else(|| CueError::malformed("size", value))?;
        self.set_size(size)
    }

    /// Sets the text position from a `position:` value such as `50%`.
    ///
    /// # Errors
    ///
    /// [`CueError::Malformed`] when the value is not digits followed by `%`,
    /// [`CueError::OutOfRange`] above 100.
    pub fn set_position_str(&mut self, value: impl AsRef<[u8]>) -> Result<(), CueError> {
        let value = value.as_ref();
        let position =
            parse_percentage(value).ok_or_else(|| CueError::malformed("position", value))?;
        self.set_position(position)
    }

    /// Sets the writing direction from `lr`, `rl`, or an empty value for
    /// horizontal.
    ///
    /// # Errors
    ///
    /// [`CueError::Malformed`] for any other value.
    pub fn set_vertical_str(&mut self, value: impl AsRef<[u8]>) -> Result<(), CueError> {
        let value = value.as_ref();
        let vertical =
            Vertical::from_keyword(value).ok_or_else(|| CueError::malformed("vertical", value))?;
        self.set_vertical(vertical);
        Ok(())
    }

    /// Sets the alignment from `start`, `middle`, `end`, `left` or `right`.
    ///
    /// # Errors
    ///
    /// [`CueError::Malformed`] for any other value.
    pub fn set_align_str(&mut self, value: impl AsRef<[u8]>) -> Result<(), CueError> {
        let value = value.as_ref();
        let align = Align::from_keyword(value).ok_or_else(|| CueError::malformed("align", value))?;
        self.set_align(align);
        Ok(())
    }
}

impl Default for Cue {
    fn default() -> Self {
        Self::new(CueKind::default())
    }
}
