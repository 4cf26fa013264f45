#![no_main]

use arbitrary::Arbitrary;
use bstr::BString;
use libfuzzer_sys::fuzz_target;
use timedtext::{Buffer, Mode, is_html5_space};

#[derive(Debug, Arbitrary)]
struct Input {
    data: Vec<u8>,
    splits: Vec<u8>,
}

/// Words of `data` as a synchronous scan with the default word capacity
/// would produce them.
fn reference_words(data: &[u8]) -> Vec<BString> {
    data.split(|&b| is_html5_space(b))
        .filter(|w| !w.is_empty())
        .flat_map(|w| w.chunks(0x80))
        .map(BString::from)
        .collect()
}

fuzz_target!(|input: Input| {
    let buffer = Buffer::new(Mode::Asynchronous);
    let mut word = BString::default();
    let mut in_word = false;
    let mut got = Vec::new();

    let mut drain = |buffer: &Buffer, got: &mut Vec<BString>| loop {
        if !in_word {
            if !buffer.skip_whitespace().finished {
                return;
            }
            in_word = true;
        }
        let collected = buffer.collect_word(&mut word);
        if !collected.finished {
            assert_eq!(collected.len, 0);
            return;
        }
        in_word = false;
        if collected.len == 0 {
            return;
        }
        got.push(std::mem::take(&mut word));
    };

    let mut rest = &input.data[..];
    for s in &input.splits {
        if rest.is_empty() {
            break;
        }
        let (chunk, tail) = rest.split_at(1 + usize::from(*s) % rest.len());
        buffer.refill(chunk, false).unwrap();
        drain(&buffer, &mut got);
        rest = tail;
    }
    buffer.refill(rest, true).unwrap();
    drain(&buffer, &mut got);

    assert!(buffer.is_eof());
    assert_eq!(got, reference_words(&input.data));
});
