use bytes::{Buf, Bytes};
use futures::TryStreamExt;
use futures::stream::Stream;
use http::{Request, Response};
use http_body::Body as HttpBody;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, ready};

use crate::error::BoxError;
use crate::stream::BoxBody;

/// Status, headers and an unread body.
pub type HttpResponse = Response<BoxBody>;

/// Executes a fully built API request against the cluster.
///
/// Implementations own base URL, credentials and TLS setup. They must hand
/// back every response the server produced, whatever its status; only
/// failures to obtain a response at all belong in the error.
pub trait HttpExecutor: Send + Sync {
    fn execute(
        &self,
        request: Request<Vec<u8>>,
    ) -> impl Future<Output = Result<HttpResponse, BoxError>> + Send;
}

impl<E: HttpExecutor> HttpExecutor for Arc<E> {
    fn execute(
        &self,
        request: Request<Vec<u8>>,
    ) -> impl Future<Output = Result<HttpResponse, BoxError>> + Send {
        (**self).execute(request)
    }
}

impl HttpExecutor for kube::Client {
    async fn execute(&self, request: Request<Vec<u8>>) -> Result<HttpResponse, BoxError> {
        let response = self.send(request.map(kube::client::Body::from)).await?;
        Ok(response.map(into_reader))
    }
}

/// Adapt an `http_body` body into a buffered async reader.
pub(crate) fn into_reader<B>(body: B) -> BoxBody
where
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    Box::pin(DataStream { body: Box::pin(body) }.into_async_read())
}

/// Data frames of a body as a stream of chunks. Trailers and empty frames are skipped.
struct DataStream<B> {
    body: Pin<Box<B>>,
}

impl<B> Stream for DataStream<B>
where
    B: HttpBody,
    B::Error: Into<BoxError>,
{
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match ready!(this.body.as_mut().poll_frame(cx)) {
                Some(Ok(frame)) => {
                    if let Ok(mut data) = frame.into_data()
                        && data.has_remaining()
                    {
                        let chunk = data.copy_to_bytes(data.remaining());
                        return Poll::Ready(Some(Ok(chunk)));
                    }
                }
                Some(Err(e)) => return Poll::Ready(Some(Err(io::Error::other(e)))),
                None => return Poll::Ready(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::io::AsyncReadExt;
    use http::HeaderMap;
    use http_body::Frame;
    use std::collections::VecDeque;

    struct ChunkedBody {
        frames: VecDeque<Result<Frame<Bytes>, io::Error>>,
    }

    impl HttpBody for ChunkedBody {
        type Data = Bytes;
        type Error = io::Error;

        fn poll_frame(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<Option<Result<Frame<Bytes>, io::Error>>> {
            Poll::Ready(self.get_mut().frames.pop_front())
        }
    }

    fn data(s: &str) -> Result<Frame<Bytes>, io::Error> {
        Ok(Frame::data(Bytes::copy_from_slice(s.as_bytes())))
    }

    #[tokio::test]
    async fn test_reader_joins_chunks_and_skips_empty_frames() {
        let body = ChunkedBody {
            frames: VecDeque::from(vec![
                data("line1\n"),
                data(""),
                data("li"),
                Ok(Frame::trailers(HeaderMap::new())),
                data("ne2\n"),
            ]),
        };
        let mut out = String::new();
        into_reader(body).read_to_string(&mut out).await.unwrap();
        assert_eq!(out, "line1\nline2\n");
    }

    #[tokio::test]
    async fn test_reader_surfaces_body_errors() {
        let body = ChunkedBody {
            frames: VecDeque::from(vec![
                data("partial"),
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
            ]),
        };
        let mut out = String::new();
        let err = into_reader(body).read_to_string(&mut out).await.unwrap_err();
        assert_eq!(err.to_string(), "reset");
    }
}
