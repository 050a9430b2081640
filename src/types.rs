use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::Pod;

use crate::error::{Error, Result};

/// Coordinates and query options for a single container log request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRequest {
    pub namespace: String,
    pub name: String,
    pub container: String,
    pub since_seconds: Option<i64>,
    pub since_time: Option<DateTime<Utc>>,
    pub tail_lines: Option<i64>,
    pub limit_bytes: Option<i64>,
    pub timestamps: bool,
    pub follow: bool,
    pub previous: bool,
}

impl LogRequest {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        container: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            container: container.into(),
            since_seconds: None,
            since_time: None,
            tail_lines: None,
            limit_bytes: None,
            timestamps: false,
            follow: false,
            previous: false,
        }
    }

    pub fn since_seconds(mut self, seconds: i64) -> Self {
        self.since_seconds = Some(seconds);
        self
    }

    pub fn since_time(mut self, time: DateTime<Utc>) -> Self {
        self.since_time = Some(time);
        self
    }

    pub fn tail_lines(mut self, lines: i64) -> Self {
        self.tail_lines = Some(lines);
        self
    }

    pub fn limit_bytes(mut self, bytes: i64) -> Self {
        self.limit_bytes = Some(bytes);
        self
    }

    pub fn timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    pub fn follow(mut self, enabled: bool) -> Self {
        self.follow = enabled;
        self
    }

    pub fn previous(mut self, enabled: bool) -> Self {
        self.previous = enabled;
        self
    }

    /// Check the request before any I/O is attempted.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("namespace", &self.namespace),
            ("name", &self.name),
            ("container", &self.container),
        ] {
            if value.is_empty() {
                return Err(Error::invalid(format!("{} must not be empty", field)));
            }
        }
        // namespace and name become path segments of the request URI
        for (field, value) in [("namespace", &self.namespace), ("name", &self.name)] {
            if value == "."
                || value == ".."
                || value
                    .chars()
                    .any(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
            {
                return Err(Error::invalid(format!(
                    "{} '{}' is not a valid path segment",
                    field, value
                )));
            }
        }
        if let Some(secs) = self.since_seconds
            && secs < 0
        {
            return Err(Error::invalid(format!(
                "sinceSeconds must not be negative, got {}",
                secs
            )));
        }
        if let Some(lines) = self.tail_lines
            && lines < 0
        {
            return Err(Error::invalid(format!(
                "tailLines must not be negative, got {}",
                lines
            )));
        }
        if let Some(bytes) = self.limit_bytes
            && bytes < 1
        {
            return Err(Error::invalid(format!(
                "limitBytes must be positive, got {}",
                bytes
            )));
        }
        if self.since_seconds.is_some() && self.since_time.is_some() {
            return Err(Error::invalid(
                "at most one of sinceSeconds or sinceTime may be set",
            ));
        }
        Ok(())
    }
}

/// The parts of a pod needed to address its logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodReference {
    pub namespace: String,
    pub name: String,
    pub containers: Vec<String>,
}

impl PodReference {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        containers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            containers: containers.into_iter().map(Into::into).collect(),
        }
    }

    /// First container in pod spec order; this is what an unqualified request targets.
    pub fn default_container(&self) -> Option<&str> {
        self.containers.first().map(String::as_str)
    }

    /// Request for the default container with no query options set.
    pub fn log_request(&self) -> Result<LogRequest> {
        let container = self.default_container().ok_or_else(|| {
            Error::invalid(format!(
                "pod {}/{} has no containers",
                self.namespace, self.name
            ))
        })?;
        Ok(LogRequest::new(&self.namespace, &self.name, container))
    }
}

impl From<&Pod> for PodReference {
    fn from(pod: &Pod) -> Self {
        let containers = pod
            .spec
            .as_ref()
            .map(|spec| spec.containers.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default();
        Self {
            namespace: pod.metadata.namespace.clone().unwrap_or_default(),
            name: pod.metadata.name.clone().unwrap_or_default(),
            containers,
        }
    }
}
