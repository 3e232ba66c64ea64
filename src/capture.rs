//! In-memory capture of extractor output
//!
//! [`MediaBuffer`] owns the bytes of one download. [`CaptureSink`] is the only
//! writer: it borrows the buffer exclusively for the duration of the download
//! phase and appends everything it is given. Closing the sink never touches the
//! buffer, so the owner can read the full contents once the borrow ends.
//!
//! ```
//! use tubegrab::capture::MediaBuffer;
//! use std::io::Write;
//!
//! let mut buffer = MediaBuffer::new();
//! {
//!     let mut sink = buffer.sink();
//!     sink.write_all(b"\x00\x01").unwrap();
//!     assert_eq!(sink.write_text("한"), 1);
//! }
//! assert_eq!(buffer.len(), 5);
//! ```

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::AsyncWrite;

/// Append-only byte accumulator for a single download
#[derive(Debug, Default)]
pub struct MediaBuffer {
    bytes: Vec<u8>,
}

impl MediaBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the buffer as a writable sink
    pub fn sink(&mut self) -> CaptureSink<'_> {
        CaptureSink {
            buffer: self,
            written: 0,
        }
    }

    /// Number of bytes captured so far
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing has been captured
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// View the captured bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the buffer, returning everything that was captured
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Writable sink that appends into a borrowed [`MediaBuffer`]
///
/// Implements both [`std::io::Write`] and [`tokio::io::AsyncWrite`]. Writes
/// never fail and never apply backpressure. `flush` and `shutdown` are no-ops.
#[derive(Debug)]
pub struct CaptureSink<'a> {
    buffer: &'a mut MediaBuffer,
    written: u64,
}

impl CaptureSink<'_> {
    /// Append raw bytes, returning the number accepted (always `data.len()`)
    pub fn write_bytes(&mut self, data: &[u8]) -> usize {
        self.buffer.bytes.extend_from_slice(data);
        self.written += data.len() as u64;
        data.len()
    }

    /// Append text as UTF-8
    ///
    /// Returns the number of characters in `text`, not the encoded length.
    pub fn write_text(&mut self, text: &str) -> usize {
        self.write_bytes(text.as_bytes());
        text.chars().count()
    }

    /// Total bytes appended through this sink
    pub fn bytes_written(&self) -> u64 {
        self.written
    }
}

impl io::Write for CaptureSink<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_bytes(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl AsyncWrite for CaptureSink<'_> {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Ok(self.get_mut().write_bytes(buf)))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    // Callers that shut the stream down when they finish must not lose the
    // buffer, so this only reports success.
    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
