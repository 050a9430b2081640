use futures::io::{AsyncBufRead, AsyncRead};
use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Response body as handed over by an [`HttpExecutor`](crate::HttpExecutor).
pub type BoxBody = Pin<Box<dyn AsyncBufRead + Send>>;

/// An open log body. Owns the underlying connection.
///
/// The connection is released when the stream is closed or dropped, which
/// also cancels a pending read. For `follow` requests the server never ends
/// the body on its own, so a stream that is kept around keeps the connection
/// open indefinitely.
///
/// Read it with `futures::io::AsyncBufReadExt::lines` or
/// `futures::io::AsyncReadExt::read_to_string`.
pub struct LogStream {
    body: BoxBody,
}

impl LogStream {
    pub fn new(body: BoxBody) -> Self {
        Self { body }
    }

    /// Release the connection now.
    pub fn close(self) {
        drop(self.body);
    }
}

impl fmt::Debug for LogStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogStream").finish_non_exhaustive()
    }
}

impl AsyncRead for LogStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        self.get_mut().body.as_mut().poll_read(cx, buf)
    }
}

impl AsyncBufRead for LogStream {
    fn poll_fill_buf(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<&[u8]>> {
        self.get_mut().body.as_mut().poll_fill_buf(cx)
    }

    fn consume(self: Pin<&mut Self>, amt: usize) {
        self.get_mut().body.as_mut().consume(amt)
    }
}
