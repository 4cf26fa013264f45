/// How consumers of a [`Buffer`](super::Buffer) wait for data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// All input is present up front. A collection that runs out of data
    /// returns what it has, flagged as not finished.
    #[default]
    Synchronous,
    /// Input arrives in chunks from a producer. A collection that runs out of
    /// data parks until the producer refills the buffer or declares the end
    /// of input, so consumers never see a partial token.
    Asynchronous,
}

/// Configuration for a [`Buffer`](super::Buffer).
///
/// # Examples
///
/// ```rust
/// use timedtext::{Buffer, BufferOptions, Mode};
///
/// let buffer = Buffer::with_options(BufferOptions {
///     mode: Mode::Asynchronous,
///     ..Default::default()
/// });
/// assert_eq!(buffer.mode(), Mode::Asynchronous);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferOptions {
    /// Synchronous or asynchronous consumption.
    ///
    /// # Default
    ///
    /// [`Mode::Synchronous`]
    pub mode: Mode,

    /// Largest word, in bytes, that a single word collection stages before it
    /// is forced to finish. Longer words are split at this length.
    ///
    /// This is generous: the WebVTT tokens read through the buffer (timing
    /// components, identifiers, settings) are far shorter. A value of zero is
    /// treated as one.
    ///
    /// # Default
    ///
    /// `128`
    pub word_capacity: usize,

    /// Largest run of digits, in bytes, staged by one digit collection.
    ///
    /// A value of zero is treated as one.
    ///
    /// # Default
    ///
    /// `64`
    pub digit_capacity: usize,
}

impl BufferOptions {
    /// Default word staging capacity.
    pub const WORD_CAPACITY: usize = 0x80;
    /// Default digit staging capacity.
    pub const DIGIT_CAPACITY: usize = 0x40;
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Synchronous,
            word_capacity: Self::WORD_CAPACITY,
            digit_capacity: Self::DIGIT_CAPACITY,
        }
    }
}
