//! Parsing primitives for WebVTT caption tracks.
//!
//! Two pieces live here:
//!
//! - [`Buffer`], an append-only text buffer with a read cursor that can be
//!   consumed synchronously against complete input or asynchronously while a
//!   producer is still pushing chunks. Asynchronous collection never hands out
//!   a fragment of a word; it parks until the word is complete or the producer
//!   declares end of input.
//! - [`Cue`], one timed caption entry, with a parser for the cue settings list
//!   that follows a timing line (`line:10% position:50% align:middle`).
//!
//! ```rust
//! use timedtext::{Align, Cue, CueKind, Line};
//!
//! let mut cue = Cue::new(CueKind::WebVtt);
//! cue.apply_settings("line:10% position:20% bogus:xx align:left");
//! assert_eq!(cue.settings().line(), Line::Percent(10));
//! assert_eq!(cue.settings().position(), 20);
//! assert_eq!(cue.settings().align(), Align::Left);
//! ```

mod buffer;
mod chars;
mod cue;
mod error;


pub use buffer::{Buffer, BufferOptions, Collected, Mode};
pub use chars::{is_ascii_digit, is_html5_space};
pub use cue::{Align, Cue, CueKind, CueSettings, Line, Timestamp, Vertical, defaults};
pub use error::{BufferError, CueError};
