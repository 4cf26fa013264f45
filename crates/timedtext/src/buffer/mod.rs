//! Incrementally filled input buffer with a read cursor.
//!
//! Overview
//! - A producer appends raw caption bytes with [`Buffer::refill`] and marks
//!   the last chunk as final. A consumer reads through the cursor with the
//!   byte, word, digit and whitespace primitives. Both sides take `&self`; a
//!   single mutex serializes them, so a producer thread and a parsing task can
//!   share one buffer through an `Arc`.
//! - Every collection is a scan over one byte class. The scan stops at the
//!   first byte outside the class (which stays unconsumed), at the staging
//!   capacity, or when the available data runs out.
//!
//! Suspension
//! - Running out of data before the end of input means the token may still
//!   grow. In [`Mode::Asynchronous`] the scan is left staged inside the buffer
//!   (start offset plus the advanced cursor), the task waker is registered and
//!   `poll_*` returns `Pending`. The next poll resumes from the cursor; the
//!   staged prefix is never rescanned and never handed out.
//! - In [`Mode::Synchronous`] there is no way to get more data, so the scan
//!   completes immediately with `finished == false`.
//! - Once the producer sets the final flag every scan that reaches the end of
//!   the data is finished, so a parked consumer always makes progress after
//!   the last refill.
//!
//! Invariants
//! - `cursor <= text.len()`.
//! - A staged token always satisfies `start <= cursor`. Any operation other
//!   than resuming the same kind of collection first rewinds the cursor to
//!   the staged start, as if the token had never been read.
//! - Released bytes always lie before the cursor and before any staged token.

mod options;


use core::{
    future::poll_fn,
    task::{Context, Poll, Waker},
};
use std::{
    io::SeekFrom,
    sync::{Mutex, MutexGuard, PoisonError},
};

use bstr::BString;
pub use options::{BufferOptions, Mode};
use tracing::{debug, trace};

use crate::{BufferError, chars};

/// Outcome of a word, digit or whitespace collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collected {
    /// Bytes appended to the result (or skipped, for whitespace).
    pub len: usize,
    /// `true` when the scan hit a byte outside its class, the staging
    /// capacity, or the end of input. `false` when only the currently
    /// available data ran out.
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Word,
    Digits,
    Whitespace,
}

impl Class {
    #[inline]
    fn accepts(self, b: u8) -> bool {
        match self {
            Class::Word => !chars::is_html5_space(b),
            Class::Digits => chars::is_ascii_digit(b),
            Class::Whitespace => chars::is_html5_space(b),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Staged {
    class: Class,
    start: usize,
}

#[derive(Debug)]
struct Scan {
    start: usize,
    finished: bool,
    truncated: bool,
}

#[derive(Debug, Default)]
struct Inner {
    text: BString,
    cursor: usize,
    released: usize,
    is_final: bool,
    staged: Option<Staged>,
    waker: Option<Waker>,
}

impl Inner {
    fn is_eof(&self) -> bool {
        self.is_final && self.cursor >= self.text.len()
    }

    fn unstage(&mut self) {
        if let Some(staged) = self.staged.take() {
            self.cursor = staged.start;
        }
    }

    fn scan(&mut self, class: Class, cap: Option<usize>) -> Scan {
        let start = match self.staged.take() {
            Some(staged) if staged.class == class => staged.start,
            Some(staged) => {
                self.cursor = staged.start;
                staged.start
            }
            None => self.cursor,
        };

        let mut finished = false;
        let mut truncated = false;
        loop {
            if cap.is_some_and(|cap| self.cursor - start >= cap) {
                truncated = true;
                finished = true;
                break;
            }
            let Some(&b) = self.text.get(self.cursor) else {
                break;
            };
            if !class.accepts(b) {
                finished = true;
                break;
            }
            self.cursor += 1;
        }

        if self.is_eof() {
            finished = true;
        }

        Scan {
            start,
            finished,
            truncated,
        }
    }

    fn park(&mut self, class: Class, start: usize, waker: &Waker) {
        self.staged = Some(Staged { class, start });
        if !self.waker.as_ref().is_some_and(|w| w.will_wake(waker)) {
            self.waker = Some(waker.clone());
        }
    }

    fn release(&mut self, bytes: usize) -> usize {
        self.unstage();
        let n = bytes.min(self.cursor);
        if n > 0 {
            self.text.drain(..n);
            self.cursor -= n;
            self.released += n;
            trace!(released = n, retained = self.text.len(), "buffer discarded");
        }
        n
    }
}

/// Append-only input buffer shared between a producer and a consumer.
///
/// ```rust
/// use bstr::BString;
/// use timedtext::{Buffer, Mode};
///
/// let buffer = Buffer::new(Mode::Synchronous);
/// buffer.refill(b"hello world", true).unwrap();
///
/// let mut word = BString::default();
/// assert!(buffer.collect_word(&mut word).finished);
/// assert_eq!(word, "hello");
/// buffer.skip_whitespace();
/// word.clear();
/// buffer.collect_word(&mut word);
/// assert_eq!(word, "world");
/// ```
#[derive(Debug)]
pub struct Buffer {
    options: BufferOptions,
    inner: Mutex<Inner>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::with_options(BufferOptions::default())
    }
}

impl Buffer {
    /// Creates an empty buffer consumed in the given mode.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self::with_options(BufferOptions {
            mode,
            ..BufferOptions::default()
        })
    }

    /// Creates an empty buffer from explicit options.
    #[must_use]
    pub fn with_options(mut options: BufferOptions) -> Self {
        options.word_capacity = options.word_capacity.max(1);
        options.digit_capacity = options.digit_capacity.max(1);
        Self {
            options,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Consumption mode fixed at construction.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.options.mode
    }

    /// Options in effect, with capacities already raised to at least one.
    #[must_use]
    pub fn options(&self) -> &BufferOptions {
        &self.options
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // No update to `Inner` spans a panic point.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --------------------------------------------------------------------------------------------
    // Producer side
    // --------------------------------------------------------------------------------------------

    /// Appends a chunk of input. `is_final` marks the end of the logical
    /// stream; once set it stays set until [`reset`](Self::reset).
    ///
    /// # Errors
    ///
    /// [`BufferError::Alloc`] when the storage cannot grow. Nothing is
    /// appended and the final flag is not touched in that case.
    pub fn refill(&self, bytes: &[u8], is_final: bool) -> Result<(), BufferError> {
        let waker = {
            let mut inner = self.lock();
            inner.text.try_reserve(bytes.len())?;
            inner.text.extend_from_slice(bytes);
            inner.is_final |= is_final;
            trace!(
                appended = bytes.len(),
                buffered = inner.text.len(),
                is_final = inner.is_final,
                "buffer refilled"
            );
            inner.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
        Ok(())
    }

    /// Declares that no more data will arrive, without appending anything.
    pub fn finish(&self) {
        let waker = {
            let mut inner = self.lock();
            inner.is_final = true;
            inner.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    // --------------------------------------------------------------------------------------------
    // State
    // --------------------------------------------------------------------------------------------

    /// Cursor offset into the retained text.
    #[must_use]
    pub fn pos(&self) -> usize {
        let mut inner = self.lock();
        inner.unstage();
        inner.cursor
    }

    /// Number of retained bytes, consumed or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().text.len()
    }

    /// No bytes retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().text.is_empty()
    }

    /// Total bytes dropped by [`discard`](Self::discard) since creation or the
    /// last reset. `released() + pos()` is the absolute stream offset.
    #[must_use]
    pub fn released(&self) -> usize {
        self.lock().released
    }

    /// Whether the producer has declared the end of input.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.lock().is_final
    }

    /// End of input: the stream is final and every byte has been read.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        let mut inner = self.lock();
        inner.unstage();
        inner.is_eof()
    }

    /// Drops all data, the final flag and any parked waker so the buffer can
    /// take a new stream.
    pub fn reset(&self) {
        *self.lock() = Inner::default();
    }

    // --------------------------------------------------------------------------------------------
    // Cursor movement
    // --------------------------------------------------------------------------------------------

    /// Consumes the byte at the cursor. `None` when no data is available right
    /// now, in which case the cursor does not move.
    pub fn next_byte(&self) -> Option<u8> {
        let mut inner = self.lock();
        inner.unstage();
        let b = inner.text.get(inner.cursor).copied()?;
        inner.cursor += 1;
        Some(b)
    }

    /// Moves the cursor.
    ///
    /// # Errors
    ///
    /// [`BufferError::SeekOutOfRange`] when the target is outside
    /// `0..len()`. The cursor is left where it was.
    pub fn seek(&self, pos: SeekFrom) -> Result<usize, BufferError> {
        let mut inner = self.lock();
        inner.unstage();
        let len = inner.text.len();
        let base = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
        let target = match pos {
            SeekFrom::Start(n) => i64::try_from(n).unwrap_or(i64::MAX),
            SeekFrom::Current(delta) => base(inner.cursor).saturating_add(delta),
            SeekFrom::End(delta) => base(len).saturating_add(delta),
        };
        match usize::try_from(target) {
            Ok(n) if n < len => {
                inner.cursor = n;
                Ok(n)
            }
            _ => Err(BufferError::SeekOutOfRange { target, len }),
        }
    }

    /// Releases up to `bytes` already consumed bytes from the front of the
    /// buffer and returns how many were released. The cursor keeps pointing
    /// at the same byte.
    pub fn discard(&self, bytes: usize) -> usize {
        if bytes == 0 {
            return 0;
        }
        self.lock().release(bytes)
    }

    /// Releases everything before the cursor.
    pub fn discard_consumed(&self) -> usize {
        let mut inner = self.lock();
        inner.unstage();
        let n = inner.cursor;
        inner.release(n)
    }

    // --------------------------------------------------------------------------------------------
    // Reading without consuming
    // --------------------------------------------------------------------------------------------

    /// Copy of the bytes from the cursor to the end of the available data,
    /// empty when the cursor is at the end. Does not advance.
    #[must_use]
    pub fn curr(&self) -> BString {
        let mut inner = self.lock();
        inner.unstage();
        BString::from(inner.text.get(inner.cursor..).unwrap_or_default())
    }

    /// Copies up to `out.len()` bytes from the cursor into `out` without
    /// advancing. Returns the number of bytes copied.
    pub fn peek_bytes(&self, out: &mut [u8]) -> usize {
        let mut inner = self.lock();
        inner.unstage();
        let available = &inner.text[inner.cursor..];
        let n = out.len().min(available.len());
        out[..n].copy_from_slice(&available[..n]);
        n
    }

    // --------------------------------------------------------------------------------------------
    // Token collection
    // --------------------------------------------------------------------------------------------

    fn poll_collect(
        &self,
        cx: &mut Context<'_>,
        class: Class,
        cap: Option<usize>,
        out: Option<&mut BString>,
    ) -> Poll<Collected> {
        let mut inner = self.lock();
        let scan = inner.scan(class, cap);

        if !scan.finished && self.options.mode == Mode::Asynchronous {
            trace!(?class, staged = inner.cursor - scan.start, "waiting for more input");
            inner.park(class, scan.start, cx.waker());
            return Poll::Pending;
        }

        let len = inner.cursor - scan.start;
        if scan.truncated {
            debug!(?class, len, "token reached staging capacity, truncated");
        }
        if let Some(out) = out {
            out.extend_from_slice(&inner.text[scan.start..inner.cursor]);
        }
        Poll::Ready(Collected {
            len,
            finished: scan.finished,
        })
    }

    fn try_collect(&self, class: Class, cap: Option<usize>, out: Option<&mut BString>) -> Collected {
        let mut cx = Context::from_waker(Waker::noop());
        match self.poll_collect(&mut cx, class, cap, out) {
            Poll::Ready(collected) => collected,
            Poll::Pending => Collected {
                len: 0,
                finished: false,
            },
        }
    }

    /// Polls for a word: bytes up to the next HTML5 space, appended to
    /// `result`. The space itself is left unconsumed.
    pub fn poll_collect_word(&self, cx: &mut Context<'_>, result: &mut BString) -> Poll<Collected> {
        self.poll_collect(cx, Class::Word, Some(self.options.word_capacity), Some(result))
    }

    /// Polls for a run of ASCII digits, appended to `result`.
    pub fn poll_collect_digits(
        &self,
        cx: &mut Context<'_>,
        result: &mut BString,
    ) -> Poll<Collected> {
        self.poll_collect(cx, Class::Digits, Some(self.options.digit_capacity), Some(result))
    }

    /// Polls to skip a run of HTML5 spaces. `len` counts the skipped bytes.
    pub fn poll_skip_whitespace(&self, cx: &mut Context<'_>) -> Poll<Collected> {
        self.poll_collect(cx, Class::Whitespace, None, None)
    }

    /// Collects a word without waiting.
    ///
    /// On a synchronous buffer this is a plain read: running out of data
    /// yields the partial word with `finished == false`. On an asynchronous
    /// buffer an incomplete word stays staged and this returns
    /// `Collected { len: 0, finished: false }`; calling again after a refill
    /// resumes it.
    pub fn collect_word(&self, result: &mut BString) -> Collected {
        self.try_collect(Class::Word, Some(self.options.word_capacity), Some(result))
    }

    /// Collects a run of ASCII digits without waiting. See
    /// [`collect_word`](Self::collect_word) for the mode-dependent behavior.
    pub fn collect_digits(&self, result: &mut BString) -> Collected {
        self.try_collect(Class::Digits, Some(self.options.digit_capacity), Some(result))
    }

    /// Skips HTML5 spaces without waiting.
    pub fn skip_whitespace(&self) -> Collected {
        self.try_collect(Class::Whitespace, None, None)
    }

    /// Collects a complete word, waiting for the producer when needed.
    pub async fn collect_word_async(&self, result: &mut BString) -> Collected {
        poll_fn(|cx| self.poll_collect_word(cx, result)).await
    }

    /// Collects a complete run of digits, waiting for the producer when
    /// needed.
    pub async fn collect_digits_async(&self, result: &mut BString) -> Collected {
        poll_fn(|cx| self.poll_collect_digits(cx, result)).await
    }

    /// Skips whitespace, waiting for the producer when the run reaches the end
    /// of the available data.
    pub async fn skip_whitespace_async(&self) -> Collected {
        poll_fn(|cx| self.poll_skip_whitespace(cx)).await
    }
}
