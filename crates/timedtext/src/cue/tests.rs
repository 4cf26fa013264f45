use rstest::rstest;

use super::*;

fn cue() -> Cue {
    Cue::new(CueKind::WebVtt)
}

#[test]
fn new_cue_has_initial_settings() {
    let cue = cue();
    let s = cue.settings();
    assert_eq!(s.vertical(), Vertical::Horizontal);
    assert_eq!(s.line(), Line::Auto);
    assert!(s.snap_to_lines());
    assert_eq!(s.position(), 50);
    assert_eq!(s.size(), 100);
    assert_eq!(s.align(), Align::Middle);
    assert_eq!(*s, CueSettings::default());
    assert!(!cue.is_dirty());
}

#[rstest]
#[case("10%", Line::Percent(10))]
#[case("-10", Line::Lines(-10))]
#[case("10", Line::Lines(10))]
#[case("0%", Line::Percent(0))]
#[case("100%", Line::Percent(100))]
#[case("-0", Line::Lines(0))]
#[case("2147483648", Line::Lines(i32::MAX))]
fn line_accepts(#[case] value: &str, #[case] expected: Line) {
    let mut cue = cue();
    assert_eq!(cue.set_line_str(value), Ok(()));
    assert_eq!(cue.settings().line(), expected);
}

#[rstest]
#[case("10-")]
#[case("%10")]
#[case("-%")]
#[case("")]
#[case("-")]
#[case("%")]
#[case("-10%")]
#[case("1%0")]
#[case("--1")]
#[case("1.5")]
#[case("+3")]
fn line_rejects_malformed(#[case] value: &str) {
    let mut cue = cue();
    cue.set_line_str("7").unwrap();
    assert!(matches!(
        cue.set_line_str(value),
        Err(CueError::Malformed { setting: "line", .. })
    ));
    assert_eq!(cue.settings().line(), Line::Lines(7));
}

#[test]
fn line_percentage_is_range_checked_but_line_count_is_not() {
    let mut cue = cue();
    assert_eq!(
        cue.set_line_str("101%"),
        Err(CueError::OutOfRange {
            setting: "line",
            value: 101
        })
    );
    assert_eq!(cue.settings().line(), Line::Auto);

    assert_eq!(cue.set_line(-5000, true), Ok(()));
    assert_eq!(cue.settings().line(), Line::Lines(-5000));
    assert!(cue.set_line(-1, false).is_err());
    assert_eq!(cue.set_line(100, false), Ok(()));
    assert!(!cue.settings().snap_to_lines());
}

#[rstest]
#[case("0%", 0)]
#[case("1%", 1)]
#[case("80%", 80)]
#[case("100%", 100)]
#[case("007%", 7)]
fn percentages_accept(#[case] value: &str, #[case] expected: i32) {
    let mut cue = cue();
    assert_eq!(cue.set_size_str(value), Ok(()));
    assert_eq!(cue.set_position_str(value), Ok(()));
    assert_eq!(cue.settings().size(), expected);
    assert_eq!(cue.settings().position(), expected);
}

#[rstest]
#[case("50")]
#[case("%50")]
#[case("5a%")]
#[case("%")]
#[case("")]
#[case("-5%")]
#[case("50%%")]
#[case("5%0")]
fn percentages_reject_malformed(#[case] value: &str) {
    let mut cue = cue();
    assert!(matches!(
        cue.set_size_str(value),
        Err(CueError::Malformed { setting: "size", .. })
    ));
    assert!(matches!(
        cue.set_position_str(value),
        Err(CueError::Malformed {
            setting: "position",
            ..
        })
    ));
    assert_eq!(cue.settings().size(), defaults::SIZE);
    assert_eq!(cue.settings().position(), defaults::POSITION);
}

#[test]
fn percentages_reject_out_of_range_after_grammar() {
    let mut cue = cue();
    assert_eq!(
        cue.set_size_str("101%"),
        Err(CueError::OutOfRange {
            setting: "size",
            value: 101
        })
    );
    assert_eq!(
        cue.set_position_str("101%"),
        Err(CueError::OutOfRange {
            setting: "position",
            value: 101
        })
    );
    assert!(cue.set_size(-1).is_err());
    assert_eq!(cue.settings().size(), 100);
    assert_eq!(cue.settings().position(), 50);
}

#[rstest]
#[case("", Vertical::Horizontal)]
#[case("lr", Vertical::VerticalLeftToRight)]
#[case("rl", Vertical::VerticalRightToLeft)]
fn vertical_accepts(#[case] value: &str, #[case] expected: Vertical) {
    let mut cue = cue();
    cue.set_vertical(Vertical::VerticalRightToLeft);
    assert_eq!(cue.set_vertical_str(value), Ok(()));
    assert_eq!(cue.settings().vertical(), expected);
}

#[rstest]
#[case("LR")]
#[case("lrx")]
#[case("l")]
#[case("rl ")]
fn vertical_rejects(#[case] value: &str) {
    let mut cue = cue();
    cue.set_vertical(Vertical::VerticalLeftToRight);
    assert!(cue.set_vertical_str(value).is_err());
    assert_eq!(cue.settings().vertical(), Vertical::VerticalLeftToRight);
}

#[rstest]
#[case("start", Align::Start)]
#[case("middle", Align::Middle)]
#[case("end", Align::End)]
#[case("left", Align::Left)]
#[case("right", Align::Right)]
fn align_accepts(#[case] value: &str, #[case] expected: Align) {
    let mut cue = cue();
    assert_eq!(cue.set_align_str(value), Ok(()));
    assert_eq!(cue.settings().align(), expected);
    assert_eq!(expected.keyword(), value);
}

#[rstest]
#[case("centre")]
#[case("")]
#[case("s")]
#[case("Start")]
#[case("center")]
#[case("middles")]
fn align_rejects(#[case] value: &str) {
    let mut cue = cue();
    cue.set_align(Align::Right);
    assert!(matches!(
        cue.set_align_str(value),
        Err(CueError::Malformed { setting: "align", .. })
    ));
    assert_eq!(cue.settings().align(), Align::Right);
}

#[test]
fn apply_settings_ignores_unknown_keys() {
    let mut cue = cue();
    let applied = cue.apply_settings("line:10% position:20% bogus:xx align:left");
    assert_eq!(applied, 3);
    let s = cue.settings();
    assert_eq!(s.line(), Line::Percent(10));
    assert!(!s.snap_to_lines());
    assert_eq!(s.position(), 20);
    assert_eq!(s.align(), Align::Left);
    assert_eq!(s.size(), 100);
    assert_eq!(s.vertical(), Vertical::Horizontal);
}

#[test]
fn apply_settings_skips_malformed_tokens() {
    let mut cue = cue();
    let applied = cue.apply_settings(":50% size: position 5a size:40% vertical:lr line:-1%");
    assert_eq!(applied, 2);
    assert_eq!(cue.settings().size(), 40);
    assert_eq!(cue.settings().vertical(), Vertical::VerticalLeftToRight);
    assert_eq!(cue.settings().position(), 50);
    assert_eq!(cue.settings().line(), Line::Auto);
}

#[test]
fn apply_settings_survives_oversized_token() {
    let mut cue = cue();
    let input = format!("position:{}% size:30% align:end", "9".repeat(600));
    assert_eq!(cue.apply_settings(&input), 2);
    assert_eq!(cue.settings().position(), 50);
    assert_eq!(cue.settings().size(), 30);
    assert_eq!(cue.settings().align(), Align::End);
}

#[rstest]
#[case::at_capacity(512, 3)]
#[case::one_past_capacity(513, 2)]
fn apply_settings_word_capacity_boundary(#[case] word_len: usize, #[case] applied: usize) {
    let mut cue = cue();
    // "position:" + zeros + "7%"
    let zeros = "0".repeat(word_len - "position:7%".len());
    let input = format!("position:{zeros}7% size:30% align:end");
    assert_eq!(cue.apply_settings(&input), applied);
    let expected = if applied == 3 { 7 } else { defaults::POSITION };
    assert_eq!(cue.settings().position(), expected);
    assert_eq!(cue.settings().size(), 30);
    assert_eq!(cue.settings().align(), Align::End);
}

#[test]
fn apply_settings_value_keeps_later_separators() {
    let mut cue = cue();
    assert_eq!(cue.apply_settings("align:end:start"), 0);
    assert_eq!(cue.settings().align(), Align::Middle);
}

#[test]
fn apply_settings_last_occurrence_wins() {
    let mut cue = cue();
    assert_eq!(cue.apply_settings("size:10% size:20%"), 2);
    assert_eq!(cue.settings().size(), 20);
}

#[test]
fn apply_settings_is_idempotent() {
    let mut once = cue();
    once.apply_settings("size:80% line:3");
    let mut twice = once.clone();
    twice.apply_settings("size:80% line:3");
    assert_eq!(once, twice);
    assert_eq!(twice.settings().size(), 80);
}

#[test]
fn reset_restores_initial_settings() {
    let mut cue = cue();
    cue.apply_settings("vertical:rl line:-3 position:0% size:1% align:start");
    assert_ne!(*cue.settings(), defaults::SETTINGS);
    cue.reset_cue_settings();
    assert_eq!(*cue.settings(), defaults::SETTINGS);
    assert_eq!(cue.settings().line(), defaults::LINE);
    assert_eq!(cue.settings().snap_to_lines(), defaults::SNAP_TO_LINES);
}

#[test]
fn text_marks_cue_dirty() {
    let mut cue = Cue::with_content(
        CueKind::WebVtt,
        Timestamp::from_millis(1_000),
        Timestamp::from_hms(0, 0, 4, 0),
        "intro",
        "<v Roger>Hello",
    );
    assert!(cue.is_dirty());
    assert_eq!(cue.id(), "intro");
    cue.mark_clean();
    assert!(!cue.is_dirty());
    cue.set_text("");
    assert!(!cue.is_dirty());
    cue.set_text("again");
    assert!(cue.is_dirty());
    assert_eq!(cue.text(), "again");
}

#[test]
fn timing_setters() {
    let mut cue = cue();
    cue.set_id("a");
    cue.set_start_time(Timestamp::from_hms(1, 2, 3, 4));
    cue.set_end_time(Timestamp::from_millis(3_723_500));
    assert_eq!(cue.id(), "a");
    assert_eq!(cue.start_time().as_millis(), 3_723_004);
    assert_eq!(cue.start_time().to_string(), "01:02:03.004");
    assert_eq!(cue.end_time().to_string(), "01:02:03.500");
    assert!(cue.start_time() < cue.end_time());
    assert_eq!(Duration::from(cue.end_time()), Duration::from_millis(3_723_500));
}

#[test]
fn timestamp_from_large_components_saturates() {
    assert_eq!(Timestamp::from_hms(u64::MAX, 59, 59, 999).as_millis(), u64::MAX);
    assert_eq!(Timestamp::from_hms(0, 0, 0, u64::MAX).as_millis(), u64::MAX);
    assert_eq!(Timestamp::from_hms(0, 61, 0, 0).to_string(), "01:01:00.000");
}

#[test]
fn timestamp_hours_are_not_capped() {
    assert_eq!(Timestamp::from_hms(123, 0, 0, 0).to_string(), "123:00:00.000");
}

#[cfg(feature = "serde")]
#[test]
fn settings_serialize_as_tagged_values() {
    let mut cue = cue();
    cue.apply_settings("line:25% vertical:lr align:end");
    assert_eq!(
        serde_json::to_value(cue.settings()).unwrap(),
        serde_json::json!({
            "vertical": "VerticalLeftToRight",
            "line": { "Percent": 25 },
            "position": 50,
            "size": 100,
            "align": "End",
        })
    );
}
