//! Splits a cue settings list into `key:value` tokens.

use crate::chars::is_html5_space;

/// Longest settings word that is considered at all. Anything longer cannot
/// be a valid setting and is skipped whole.
pub(crate) const WORD_CAPACITY: usize = 0x200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Setting { key: &'a [u8], value: &'a [u8] },
    /// No `:`, an empty key, or an empty value.
    Malformed(&'a [u8]),
    /// Longer than [`WORD_CAPACITY`]; only the length is kept.
    Oversized(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct SettingsTokens<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> SettingsTokens<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    fn skip_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.input.get(self.pos).is_some_and(|&b| pred(b)) {
            self.pos += 1;
        }
    }
}

impl<'a> Iterator for SettingsTokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.skip_while(is_html5_space);
        if self.pos >= self.input.len() {
            return None;
        }

        let start = self.pos;
        self.skip_while(|b| !is_html5_space(b));
        let word = &self.input[start..self.pos];

        if word.len() > WORD_CAPACITY {
            return Some(Token::Oversized(word.len()));
        }
        // Keys never contain ':', so the first one splits key from value.
        Some(match word.iter().position(|&b| b == b':') {
            Some(sep) if sep > 0 && sep + 1 < word.len() => Token::Setting {
                key: &word[..sep],
                value: &word[sep + 1..],
            },
            _ => Token::Malformed(word),
        })
    }
}
