//! Streaming access to Kubernetes pod container logs.
//!
//! [`LogFetcher`] turns a [`LogRequest`] into one GET against the pod `log`
//! sub-resource and hands back the response body as a [`LogStream`]. The
//! HTTP side is injected through [`HttpExecutor`], implemented for
//! `kube::Client`.

pub mod client;
pub mod error;
pub mod executor;
pub mod logs;
pub mod stream;
pub mod types;

pub use error::{BoxError, Error, Result};
pub use executor::{HttpExecutor, HttpResponse};
pub use logs::LogFetcher;
pub use stream::{BoxBody, LogStream};
pub use types::{LogRequest, PodReference};
