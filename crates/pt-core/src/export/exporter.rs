//! Exporter trait and manager

use crate::board::Board;
use crate::config::Config;
use crate::error::{PeerThreadError, Result};
use crate::thread::Forest;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Trait for board exporters
pub trait Exporter: Send + Sync {
    /// Export a board and its reply forest to string
    fn export(&self, board: &Board, forest: &Forest) -> Result<String>;

    /// Get the format name
    fn format_name(&self) -> &str;

    /// Get the file extension
    fn file_extension(&self) -> &str;
}

/// Manager for handling multiple export formats
pub struct ExportManager {
    exporters: HashMap<String, Box<dyn Exporter>>,
}

impl ExportManager {
    /// Create a new export manager with default exporters
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Create an export manager whose exporters follow the configured layout
    pub fn from_config(config: &Config) -> Self {
        let layout = config.thread.reply_layout();
        let export = &config.export;

        let mut manager = Self {
            exporters: HashMap::new(),
        };

        manager.register(Box::new(
            super::json::JsonExporter::pretty().with_stats(export.include_stats),
        ));
        manager.register(Box::new(
            super::json::JsonExporter::compact().with_stats(export.include_stats),
        ));
        manager.register(Box::new(
            super::markdown::MarkdownExporter::new()
                .with_layout(layout)
                .with_stats(export.include_stats)
                .with_date_format(&export.date_format),
        ));
        manager.register(Box::new(
            super::text::TextExporter::new()
                .with_layout(layout)
                .with_stats(export.include_stats)
                .with_date_format(&export.date_format),
        ));

        manager
    }

    /// Register a new exporter, replacing any with the same format name
    pub fn register(&mut self, exporter: Box<dyn Exporter>) {
        self.exporters
            .insert(exporter.format_name().to_string(), exporter);
    }

    /// Export a board to the specified format
    pub fn export(&self, board: &Board, forest: &Forest, format: &str) -> Result<String> {
        self.lookup(format)?.export(board, forest)
    }

    /// Export a board to a file, returning the path written
    ///
    /// The format's extension is appended when `path` has none.
    pub fn export_to_file(
        &self,
        board: &Board,
        forest: &Forest,
        format: &str,
        path: &Path,
    ) -> Result<PathBuf> {
        let exporter = self.lookup(format)?;
        let content = exporter.export(board, forest)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let final_path = if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension(exporter.file_extension())
        };

        let temp_path = final_path.with_extension("tmp");
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.flush()?;
        }

        fs::rename(&temp_path, &final_path)?;
        Ok(final_path)
    }

    /// Get list of available format names
    pub fn available_formats(&self) -> Vec<String> {
        let mut formats: Vec<_> = self.exporters.keys().cloned().collect();
        formats.sort();
        formats
    }

    /// Check if a format is available
    pub fn has_format(&self, format: &str) -> bool {
        self.exporters.contains_key(format)
    }

    /// Get an exporter by format name
    pub fn get(&self, format: &str) -> Option<&dyn Exporter> {
        self.exporters.get(format).map(|e| e.as_ref())
    }

    fn lookup(&self, format: &str) -> Result<&dyn Exporter> {
        self.get(format).ok_or_else(|| {
            PeerThreadError::Validation(format!(
                "Unknown export format: {} (available: {})",
                format,
                self.available_formats().join(", ")
            ))
        })
    }
}

impl Default for ExportManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thread::ThreadBuilder;
    use crate::types::{BoardId, TargetKind};
    use tempfile::TempDir;

    fn create_test_board() -> Board {
        Board::new(BoardId::from_string("note-1").unwrap(), TargetKind::Note)
    }

    struct TestExporter;

    impl Exporter for TestExporter {
        fn export(&self, _board: &Board, _forest: &Forest) -> Result<String> {
            Ok("test export".to_string())
        }

        fn format_name(&self) -> &str {
            "test"
        }

        fn file_extension(&self) -> &str {
            "txt"
        }
    }

    #[test]
    fn test_export_manager_creation() {
        let manager = ExportManager::new();
        assert_eq!(
            manager.available_formats(),
            vec!["json", "json-compact", "markdown", "text"]
        );
    }

    #[test]
    fn test_register_exporter() {
        let mut manager = ExportManager::new();
        manager.register(Box::new(TestExporter));
        assert!(manager.has_format("test"));
        assert_eq!(manager.get("test").unwrap().file_extension(), "txt");
    }

    #[test]
    fn test_export_unknown_format() {
        let manager = ExportManager::new();
        let board = create_test_board();
        let forest = board.threads(&ThreadBuilder::default());

        let err = manager.export(&board, &forest, "pdf").unwrap_err();
        assert!(err.to_string().contains("Unknown export format: pdf"));
    }

    #[test]
    fn test_export_to_file_adds_extension() {
        let temp = TempDir::new().unwrap();
        let mut manager = ExportManager::new();
        manager.register(Box::new(TestExporter));
        let board = create_test_board();
        let forest = board.threads(&ThreadBuilder::default());

        let written = manager
            .export_to_file(&board, &forest, "test", &temp.path().join("out/report"))
            .unwrap();

        assert_eq!(written, temp.path().join("out/report.txt"));
        assert_eq!(fs::read_to_string(&written).unwrap(), "test export");
        assert!(!temp.path().join("out/report.tmp").exists());
    }
}
