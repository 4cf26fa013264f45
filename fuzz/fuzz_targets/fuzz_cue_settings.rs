#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use timedtext::{Cue, CueKind, Line};

/// Settings text plus a few seeded settings words, so the fuzzer reaches
/// the value grammars without having to discover the keys first.
#[derive(Debug, Arbitrary)]
struct Input<'a> {
    raw: &'a str,
    seeded: Vec<(Key, &'a str)>,
}

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Key {
    Align,
    Line,
    Position,
    Size,
    Vertical,
}

impl Key {
    fn name(self) -> &'static str {
        match self {
            Key::Align => "align",
            Key::Line => "line",
            Key::Position => "position",
            Key::Size => "size",
            Key::Vertical => "vertical",
        }
    }
}

fn in_range(n: i32) -> bool {
    (0..=100).contains(&n)
}

fn check(cue: &Cue) {
    let s = cue.settings();
    assert!(in_range(s.position()), "position {}", s.position());
    assert!(in_range(s.size()), "size {}", s.size());
    if let Line::Percent(n) = s.line() {
        assert!(in_range(n), "line {n}%");
        assert!(!s.snap_to_lines());
    }
}

fuzz_target!(|input: Input<'_>| {
    let mut settings = String::from(input.raw);
    for (key, value) in &input.seeded {
        settings.push(' ');
        settings.push_str(key.name());
        settings.push(':');
        settings.push_str(value);
    }

    let mut cue = Cue::new(CueKind::WebVtt);
    cue.apply_settings(&settings);
    check(&cue);

    let once = *cue.settings();
    cue.apply_settings(&settings);
    assert_eq!(once, *cue.settings());

    for (key, value) in &input.seeded {
        let before = *cue.settings();
        let result = match key {
            Key::Align => cue.set_align_str(value),
            Key::Line => cue.set_line_str(value),
            Key::Position => cue.set_position_str(value),
            Key::Size => cue.set_size_str(value),
            Key::Vertical => cue.set_vertical_str(value),
        };
        if result.is_err() {
            assert_eq!(before, *cue.settings());
        }
        check(&cue);
    }

    cue.reset_cue_settings();
    assert_eq!(*cue.settings(), timedtext::defaults::SETTINGS);
});
