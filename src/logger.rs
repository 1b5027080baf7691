use anyhow::{Context, Result};
use chrono::Utc;
use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::constants::{APP_DIR_NAME, LOG_BUFFER_CAPACITY, LOG_FILE_NAME};

type FileWriter = Arc<Mutex<File>>;

/// Shared logger that can be used across the application
///
/// Keeps the most recent lines in memory for a debug view and, when
/// enabled, appends every line to a log file. Lines reach the file as they
/// are logged; nothing is held back until exit. Installing it with
/// [`Logger::from_config`] routes the `log` macros through it.
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<VecDeque<String>>>,
    file_writer: Option<FileWriter>,
    enabled: bool,
}

impl Logger {
    /// In-memory only logger
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(VecDeque::with_capacity(LOG_BUFFER_CAPACITY))),
            file_writer: None,
            enabled: false,
        }
    }

    /// Logger that also appends to `path`
    pub fn with_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {}", path.as_ref().display()))?;

        Ok(Self {
            file_writer: Some(Arc::new(Mutex::new(file))),
            enabled: true,
            ..Self::new()
        })
    }

    /// Build a logger from the `logging.enabled` setting and install it as
    /// the `log` backend.
    pub fn from_config(enabled: bool) -> Result<Self> {
        let logger = if enabled {
            Self::with_file(Self::get_log_file_path()?)?
        } else {
            Self::new()
        };
        logger.install();
        Ok(logger)
    }

    /// Route `log` records through this logger. Only the first installed
    /// logger in a process takes effect.
    pub fn install(&self) {
        let sink = self.clone();
        let level = if self.enabled {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };

        let installed = fern::Dispatch::new()
            .format(|out, message, record| out.finish(format_args!("{} {}: {}", record.level(), record.target(), message)))
            .level(level)
            .chain(fern::Output::call(move |record: &log::Record| sink.log(record.args().to_string())))
            .apply();

        if installed.is_err() {
            self.log("Logger already installed, keeping the existing one".to_string());
        }
    }

    /// Add a log entry
    pub fn log(&self, message: String) {
        let timestamp = Utc::now().format("%H:%M:%S%.3f").to_string();
        let formatted_message = format!("[{}] {}", timestamp, message);

        if let Some(writer) = &self.file_writer {
            if let Err(e) = Self::write_line(writer, &formatted_message) {
                self.push(format!("[{}] Failed to write log file: {}", timestamp, e));
            }
        }

        self.push(formatted_message);
    }

    fn write_line(writer: &FileWriter, line: &str) -> io::Result<()> {
        let mut file = writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(file, "{}", line)?;
        file.flush()
    }

    fn push(&self, line: String) {
        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() == LOG_BUFFER_CAPACITY {
                logs.pop_front();
            }
            logs.push_back(line);
        }
    }

    /// Get all logs sorted by date (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    /// Force written lines to disk
    pub fn flush(&self) -> Result<()> {
        if let Some(writer) = &self.file_writer {
            let file = writer.lock().unwrap_or_else(PoisonError::into_inner);
            file.sync_data().context("Failed to sync log file")?;
        }
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn has_file_writer(&self) -> bool {
        self.file_writer.is_some()
    }

    /// Default log file location
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join(APP_DIR_NAME).join(LOG_FILE_NAME))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
