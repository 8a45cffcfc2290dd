//! Tests for the logger module

use crate::logger::config::*;
use crate::logger::writer::{RotatingFileWriter, backup_path};
use std::path::PathBuf;

fn file_config(path: PathBuf, max_size: u64, max_files: usize) -> FileConfig {
    FileConfig {
        enabled: true,
        path,
        append: true,
        format: LogFormat::Full,
        max_size,
        max_files,
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_default_config_creation() {
        let config = LoggerConfig::default();
        assert!(config.console.enabled);
        assert!(config.console.colored);
        assert!(!config.file.enabled);
        assert_eq!(config.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_both_outputs_disabled_fails() {
        let mut config = LoggerConfig::default();
        config.console.enabled = false;
        config.file.enabled = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_level_fails() {
        let config = LoggerConfig {
            level: "verbose".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(format!("{:#}", err).contains("verbose"));
    }

    #[test]
    fn test_file_limits_are_checked_only_when_enabled() {
        let mut file = FileConfig {
            max_size: 0,
            max_files: 0,
            ..Default::default()
        };
        assert!(file.validate().is_ok());

        file.enabled = true;
        assert!(file.validate().is_err());

        file.max_size = 4096;
        assert!(file.validate().is_err());

        file.max_files = 2;
        assert!(file.validate().is_ok());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::default(), LogFormat::Full);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}

#[cfg(test)]
mod writer_tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn test_writer_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("logs").join("app.log");

        let writer = RotatingFileWriter::new(&file_config(path.clone(), 1024, 2)).unwrap();
        let mut guard = writer.make_writer();
        guard.write_all(b"hello\n").unwrap();
        drop(guard);

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
        assert!(!writer.is_in_fallback_mode());
    }

    #[test]
    fn test_writer_rotates_when_size_is_exceeded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let writer = RotatingFileWriter::new(&file_config(path.clone(), 1024, 2)).unwrap();

        let line = vec![b'a'; 600];
        for _ in 0..3 {
            let mut guard = writer.make_writer();
            guard.write_all(&line).unwrap();
        }

        assert!(backup_path(&path, 1).exists());
        assert!(backup_path(&path, 2).exists());
        assert!(!backup_path(&path, 3).exists());
        assert_eq!(fs::metadata(&path).unwrap().len(), 600);
    }

    #[test]
    fn test_writer_keeps_at_most_max_files_backups() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let writer = RotatingFileWriter::new(&file_config(path.clone(), 1024, 1)).unwrap();

        for marker in [b'a', b'b', b'c'] {
            let mut guard = writer.make_writer();
            guard.write_all(&vec![marker; 1000]).unwrap();
        }

        assert!(!backup_path(&path, 2).exists());
        let backup = fs::read(backup_path(&path, 1)).unwrap();
        assert!(backup.iter().all(|b| *b == b'b'));
        let current = fs::read(&path).unwrap();
        assert!(current.iter().all(|b| *b == b'c'));
    }

    #[test]
    fn test_writer_truncates_when_not_appending() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "stale\n").unwrap();

        let mut config = file_config(path.clone(), 1024, 2);
        config.append = false;
        let writer = RotatingFileWriter::new(&config).unwrap();
        let mut guard = writer.make_writer();
        guard.write_all(b"fresh\n").unwrap();
        drop(guard);

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_backup_path_appends_index() {
        let path = PathBuf::from("logs/app.log");
        assert_eq!(backup_path(&path, 3), PathBuf::from("logs/app.log.3"));
    }
}

#[cfg(test)]
mod dynamic_level_tests {
    use crate::logger::LogLevelHandle;
    use proptest::prelude::*;
    use std::sync::Arc;
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, reload};

    /// Runs `f` with a handle whose subscriber is active for the current thread.
    fn with_test_handle<F, R>(initial_level: &str, f: F) -> R
    where
        F: FnOnce(&LogLevelHandle) -> R,
    {
        let filter = EnvFilter::try_new(initial_level).unwrap_or_else(|_| EnvFilter::new("info"));
        let (filter_layer, reload_handle) = reload::Layer::new(filter);

        let subscriber = tracing_subscriber::registry()
            .with(filter_layer)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink));

        let handle = LogLevelHandle {
            inner: Arc::new(reload_handle),
        };

        tracing::subscriber::with_default(subscriber, || f(&handle))
    }

    #[test]
    fn test_set_level_accepts_directives() {
        with_test_handle("info", |handle| {
            handle.set_level("warn,gathering_rs=debug").unwrap();
            let current = handle.current_level().unwrap();
            assert!(current.contains("gathering_rs=debug"));
        });
    }

    proptest! {
        #[test]
        fn prop_last_level_set_wins(
            level_indices in prop::collection::vec(0usize..5usize, 1..5)
        ) {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];

            with_test_handle("info", |handle| {
                for &idx in &level_indices {
                    prop_assert!(handle.set_level(valid_levels[idx]).is_ok());
                }

                let last = valid_levels[*level_indices.last().unwrap()];
                let current = handle.current_level().unwrap_or_default();
                prop_assert!(current.to_lowercase().contains(last));
                Ok(())
            })?;
        }
    }
}
