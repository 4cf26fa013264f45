//! Layout settings of a cue and the grammar of their string values.

use super::defaults;

/// Writing direction (`vertical:` setting).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Vertical {
    /// Horizontal text, the absent or empty setting.
    #[default]
    Horizontal,
    /// `vertical:lr`
    VerticalLeftToRight,
    /// `vertical:rl`
    VerticalRightToLeft,
}

impl Vertical {
    /// Setting keyword, empty for [`Vertical::Horizontal`].
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Vertical::Horizontal => "",
            Vertical::VerticalLeftToRight => "lr",
            Vertical::VerticalRightToLeft => "rl",
        }
    }

    /// Exact, case-sensitive keyword match. An empty value means horizontal.
    #[must_use]
    pub fn from_keyword(value: &[u8]) -> Option<Self> {
        match value {
            b"" => Some(Vertical::Horizontal),
            b"lr" => Some(Vertical::VerticalLeftToRight),
            b"rl" => Some(Vertical::VerticalRightToLeft),
            _ => None,
        }
    }
}

/// Text alignment (`align:` setting).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    /// `align:start`
    Start,
    /// `align:middle`
    #[default]
    Middle,
    /// `align:end`
    End,
    /// `align:left`
    Left,
    /// `align:right`
    Right,
}

impl Align {
    const ALL: [Align; 5] = [Align::Start, Align::Middle, Align::End, Align::Left, Align::Right];

    /// Setting keyword.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Align::Start => "start",
            Align::Middle => "middle",
            Align::End => "end",
            Align::Left => "left",
            Align::Right => "right",
        }
    }

    /// Exact, case-sensitive keyword match.
    #[must_use]
    pub fn from_keyword(value: &[u8]) -> Option<Self> {
        // Shorter than "end" or longer than "middle" cannot match.
        if !(3..=6).contains(&value.len()) {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|align| align.keyword().as_bytes() == value)
    }
}

/// Line position (`line:` setting) together with its snap-to-lines flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Line {
    /// Placed by the layout algorithm. Snaps to lines.
    #[default]
    Auto,
    /// Line index, negative values counting from the bottom. Snaps to lines.
    Lines(i32),
    /// Percentage of the viewport height, `0..=100`.
    Percent(i32),
}

impl Line {
    /// `false` only for a percentage.
    #[must_use]
    pub fn snap_to_lines(self) -> bool {
        !matches!(self, Line::Percent(_))
    }

    /// Numeric position, `None` for [`Line::Auto`].
    #[must_use]
    pub fn value(self) -> Option<i32> {
        match self {
            Line::Auto => None,
            Line::Lines(n) | Line::Percent(n) => Some(n),
        }
    }
}

/// The five validated layout settings of a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CueSettings {
    pub(crate) vertical: Vertical,
    pub(crate) line: Line,
    pub(crate) position: i32,
    pub(crate) size: i32,
    pub(crate) align: Align,
}

impl Default for CueSettings {
    fn default() -> Self {
        defaults::SETTINGS
    }
}

impl CueSettings {
    /// Writing direction.
    #[must_use]
    pub fn vertical(&self) -> Vertical {
        self.vertical
    }

    /// Line position.
    #[must_use]
    pub fn line(&self) -> Line {
        self.line
    }

    /// Shorthand for [`Line::snap_to_lines`] on [`line`](Self::line).
    #[must_use]
    pub fn snap_to_lines(&self) -> bool {
        self.line.snap_to_lines()
    }

    /// Text position, `0..=100`.
    #[must_use]
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Size, `0..=100`.
    #[must_use]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Text alignment.
    #[must_use]
    pub fn align(&self) -> Align {
        self.align
    }
}

pub(crate) fn in_percent_range(n: i32) -> bool {
    (0..=100).contains(&n)
}

/// Accumulates the digits of `value`, skipping a leading `-` and a trailing
/// `%`. Saturates instead of overflowing.
fn parse_int(value: &[u8]) -> i32 {
    let negative = value.first() == Some(&b'-');
    let magnitude = value
        .iter()
        .filter(|b| b.is_ascii_digit())
        .fold(0i32, |acc, &b| {
            acc.saturating_mul(10).saturating_add(i32::from(b - b'0'))
        });
    if negative { -magnitude } else { magnitude }
}

/// `line` value grammar: `-`? digit+ `%`?, where `%` is not allowed together
/// with `-`. Returns the number and the snap-to-lines flag (false when `%`
/// is present).
pub(crate) fn parse_line(value: &[u8]) -> Option<(i32, bool)> {
    let last = value.len().checked_sub(1)?;
    let mut digits = 0;
    let mut snap = true;
    for (i, &c) in value.iter().enumerate() {
        match c {
            b'0'..=b'9' => digits += 1,
            b'-' if i == 0 => {}
            b'%' if i == last && value[0] != b'-' => snap = false,
            _ => return None,
        }
    }
    if digits == 0 {
        return None;
    }
    Some((parse_int(value), snap))
}

/// `position` and `size` value grammar: digit+ `%`. The percent sign is
/// mandatory.
pub(crate) fn parse_percentage(value: &[u8]) -> Option<i32> {
    let (&b'%', digits) = value.split_last()? else {
        return None;
    };
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(parse_int(digits))
}
