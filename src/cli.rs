use chrono::{DateTime, Utc};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "kube-logs")]
#[command(about = "Stream logs from a Kubernetes pod container")]
pub struct Cli {
    /// Pod name
    pub pod: String,

    /// Namespace (defaults to the context's namespace)
    #[arg(short = 'n', long)]
    pub namespace: Option<String>,

    /// Container name (defaults to the pod's first container)
    #[arg(short = 'c', long)]
    pub container: Option<String>,

    /// Kubeconfig context
    #[arg(long)]
    pub context: Option<String>,

    /// Keep the stream open and print new lines as they arrive
    #[arg(short = 'f', long)]
    pub follow: bool,

    /// Only return logs newer than this many seconds
    #[arg(long, conflicts_with = "since_time")]
    pub since: Option<i64>,

    /// Only return logs after this RFC3339 timestamp
    #[arg(long)]
    pub since_time: Option<DateTime<Utc>>,

    /// Number of lines from the end of the log to show
    #[arg(long)]
    pub tail: Option<i64>,

    /// Stop after this many bytes
    #[arg(long)]
    pub limit_bytes: Option<i64>,

    /// Prefix every line with its timestamp
    #[arg(long)]
    pub timestamps: bool,

    /// Show the log of the previous container instance
    #[arg(short = 'p', long)]
    pub previous: bool,

    /// Prefix each line with [namespace/pod/container]
    #[arg(long)]
    pub prefix: bool,

    /// Only print lines matching this regex
    #[arg(long)]
    pub grep: Option<String>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use chrono::{TimeZone, Utc};
    use clap::Parser;

    #[test]
    fn test_cli_parsing_pod() {
        let cli = Cli::try_parse_from(["kube-logs", "my-pod"]).unwrap();
        assert_eq!(cli.pod, "my-pod");
        assert!(cli.namespace.is_none());
        assert!(cli.container.is_none());
        assert!(!cli.follow);
    }

    #[test]
    fn test_cli_parsing_container_and_namespace() {
        let cli = Cli::try_parse_from(["kube-logs", "my-pod", "-c", "app", "-n", "prod"]).unwrap();
        assert_eq!(cli.container, Some("app".to_string()));
        assert_eq!(cli.namespace, Some("prod".to_string()));
    }

    #[test]
    fn test_cli_parsing_follow_tail_since() {
        let cli = Cli::try_parse_from([
            "kube-logs", "my-pod", "-f", "--tail", "10", "--since", "60", "--timestamps",
        ])
        .unwrap();
        assert!(cli.follow);
        assert_eq!(cli.tail, Some(10));
        assert_eq!(cli.since, Some(60));
        assert!(cli.timestamps);
    }

    #[test]
    fn test_cli_parsing_since_time() {
        let cli =
            Cli::try_parse_from(["kube-logs", "my-pod", "--since-time", "2024-01-02T03:04:05Z"])
                .unwrap();
        assert_eq!(
            cli.since_time,
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
        );
    }

    #[test]
    fn test_cli_rejects_since_with_since_time() {
        let res = Cli::try_parse_from([
            "kube-logs", "my-pod", "--since", "60", "--since-time", "2024-01-02T03:04:05Z",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_cli_requires_pod() {
        assert!(Cli::try_parse_from(["kube-logs"]).is_err());
    }

    #[test]
    fn test_cli_parsing_verbose_prefix_grep() {
        let cli =
            Cli::try_parse_from(["kube-logs", "my-pod", "-v", "--prefix", "--grep", "ERROR"])
                .unwrap();
        assert!(cli.verbose);
        assert!(cli.prefix);
        assert_eq!(cli.grep, Some("ERROR".to_string()));
    }
}
