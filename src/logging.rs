use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set.
fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("postboard={}", level)
}

/// Split a log file path into the rolling appender's directory and file prefix.
fn appender_target(log_path: &Path) -> (PathBuf, PathBuf) {
    let dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let prefix = log_path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("postboard.log"));
    (dir, prefix)
}

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable verbose (DEBUG) logging
/// * `log_file` - Optional path to a JSON log file, rotated daily. If None, logs only to stderr
pub fn init(verbose: bool, log_file: Option<PathBuf>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    if let Some(log_path) = log_file {
        let (dir, prefix) = appender_target(&log_path);
        let _ = std::fs::create_dir_all(&dir);

        let file_layer = fmt::layer()
            .with_writer(tracing_appender::rolling::daily(dir, prefix))
            .with_ansi(false)
            .json();

        subscriber.with(file_layer).init();
    } else {
        subscriber.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "postboard=info");
        assert_eq!(default_directive(true), "postboard=debug");
    }

    #[test]
    fn test_appender_target_splits_path() {
        let (dir, prefix) = appender_target(Path::new("/var/log/postboard/server.log"));
        assert_eq!(dir, PathBuf::from("/var/log/postboard"));
        assert_eq!(prefix, PathBuf::from("server.log"));
    }

    #[test]
    fn test_appender_target_bare_file_name() {
        let (dir, prefix) = appender_target(Path::new("server.log"));
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(prefix, PathBuf::from("server.log"));
    }
}
