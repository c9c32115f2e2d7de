//! Output primitives.
//!
//! The formatter never owns a console. It writes through an [`OutputSink`],
//! the capability that emits one byte to whatever destination the embedding
//! environment provides (UART, kernel console, test recorder).

/// Single-byte output primitive.
pub trait OutputSink {
    /// Emit one byte.
    fn put_char(&mut self, c: u8);

    /// Emit a run of bytes, one at a time by default.
    fn put_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.put_char(b);
        }
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn put_char(&mut self, c: u8) {
        (**self).put_char(c);
    }

    fn put_bytes(&mut self, bytes: &[u8]) {
        (**self).put_bytes(bytes);
    }
}

/// Recording sink: every emitted byte is appended.
impl OutputSink for Vec<u8> {
    fn put_char(&mut self, c: u8) {
        self.push(c);
    }

    fn put_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Adapts a closure such as `|c| uart.write(c)` into a sink.
#[derive(Debug, Clone, Copy)]
pub struct FnSink<F>(pub F);

impl<F: FnMut(u8)> OutputSink for FnSink<F> {
    fn put_char(&mut self, c: u8) {
        (self.0)(c);
    }
}

/// Counts bytes while forwarding them to `inner`.
#[derive(Debug)]
pub struct CountingSink<S> {
    inner: S,
    count: usize,
}

impl<S: OutputSink> CountingSink<S> {
    #[must_use]
    pub const fn new(inner: S) -> Self {
        Self { inner, count: 0 }
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }
}

impl<S: OutputSink> OutputSink for CountingSink<S> {
    fn put_char(&mut self, c: u8) {
        self.count += 1;
        self.inner.put_char(c);
    }

    fn put_bytes(&mut self, bytes: &[u8]) {
        self.count += bytes.len();
        self.inner.put_bytes(bytes);
    }
}

/// Bounded sink over a caller-provided byte slice (`snprintf` semantics).
///
/// The last byte of the slice is reserved for the NUL terminator written by
/// [`SliceSink::finish`]. Bytes past the capacity are counted but dropped.
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    written: usize,
    total: usize,
}

impl<'a> SliceSink<'a> {
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            written: 0,
            total: 0,
        }
    }

    /// Bytes actually stored (terminator excluded).
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Bytes offered to the sink, stored or not.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub const fn truncated(&self) -> bool {
        self.total > self.written
    }

    /// NUL-terminates the stored bytes and returns the untruncated length.
    pub fn finish(self) -> usize {
        if let Some(slot) = self.buf.get_mut(self.written) {
            *slot = 0;
        }
        self.total
    }

    fn capacity(&self) -> usize {
        self.buf.len().saturating_sub(1)
    }
}

impl OutputSink for SliceSink<'_> {
    fn put_char(&mut self, c: u8) {
        if self.written < self.capacity() {
            self.buf[self.written] = c;
            self.written += 1;
        }
        self.total += 1;
    }
}
