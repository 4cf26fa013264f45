//! Initial cue settings, applied at construction and by
//! [`Cue::reset_cue_settings`](crate::Cue::reset_cue_settings).

use super::{Align, CueSettings, Line, Vertical};

/// Horizontal text.
pub const VERTICAL: Vertical = Vertical::Horizontal;
/// `auto`, with snap-to-lines on.
pub const LINE: Line = Line::Auto;
/// Implied by [`LINE`].
pub const SNAP_TO_LINES: bool = true;
/// Centered, in percent.
pub const POSITION: i32 = 50;
/// Full width, in percent.
pub const SIZE: i32 = 100;
/// Centered text.
pub const ALIGN: Align = Align::Middle;

/// All of the above together.
pub const SETTINGS: CueSettings = CueSettings {
    vertical: VERTICAL,
    line: LINE,
    position: POSITION,
    size: SIZE,
    align: ALIGN,
};
