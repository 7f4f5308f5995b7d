//! File system storage for review boards

use pt_core::board::{Board, BoardFile, BoardInfo, BoardMigrator, BoardStorage, CURRENT_SCHEMA_VERSION};
use pt_core::error::{PeerThreadError, Result};
use pt_core::types::BoardId;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File system based board storage
///
/// Each board lives in `<base>/boards/<id>.json`.
pub struct FileSystemStorage {
    /// Base directory
    base_dir: PathBuf,
    /// Boards subdirectory
    boards_dir: PathBuf,
}

impl FileSystemStorage {
    /// Create a new file system storage
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let boards_dir = base_dir.join("boards");

        let storage = Self {
            base_dir,
            boards_dir,
        };

        storage.ensure_dirs()?;
        Ok(storage)
    }

    /// Per-user data directory, falling back to `~/.peerthread`
    pub fn default_base_dir() -> PathBuf {
        directories::ProjectDirs::from("org", "peernotez", "peerthread")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".peerthread")
            })
    }

    fn ensure_dirs(&self) -> Result<()> {
        if !self.boards_dir.exists() {
            fs::create_dir_all(&self.boards_dir).map_err(|e| {
                PeerThreadError::Io(e).with_context(format!(
                    "Failed to create boards directory {}",
                    self.boards_dir.display()
                ))
            })?;
            debug!("Created boards directory: {:?}", self.boards_dir);
        }
        Ok(())
    }

    fn board_path(&self, id: &BoardId) -> PathBuf {
        self.boards_dir.join(format!("{}.json", id))
    }

    fn temp_path(&self, id: &BoardId) -> PathBuf {
        self.boards_dir.join(format!(".{}.json.tmp", id))
    }

    /// Write board atomically (write to temp, then rename)
    fn atomic_write(&self, board: &Board) -> Result<()> {
        let temp_path = self.temp_path(&board.id);
        let final_path = self.board_path(&board.id);

        let file = BoardFile::new(board.clone());

        let temp_file = fs::File::create(&temp_path).map_err(|e| {
            PeerThreadError::Io(e).with_context(format!(
                "Failed to create temp file {}",
                temp_path.display()
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        serde_json::to_writer_pretty(&mut writer, &file)?;
        writer.flush()?;
        drop(writer);

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            PeerThreadError::Io(e).with_context("Failed to rename temp file")
        })?;

        debug!("Saved board {} to {:?}", board.id, final_path);
        Ok(())
    }

    /// Read and parse a board file, migrating older schemas
    fn read_board(&self, path: &Path) -> Result<Board> {
        let file = fs::File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                let id = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("unknown");
                PeerThreadError::BoardNotFound(id.to_string())
            } else {
                PeerThreadError::Io(e)
            }
        })?;

        let board_file: BoardFile = serde_json::from_reader(BufReader::new(file))?;

        let migrated = if BoardMigrator::needs_migration(&board_file) {
            info!(
                "Migrating board from version {} to {}",
                board_file.schema_version, CURRENT_SCHEMA_VERSION
            );
            BoardMigrator::migrate(board_file)?
        } else {
            board_file
        };

        Ok(migrated.into_board())
    }

    /// Whether a directory entry should be considered a board file
    fn is_board_file(path: &Path) -> bool {
        let is_json = path.extension().map(|e| e == "json").unwrap_or(false);
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with('.'))
            .unwrap_or(true);
        is_json && !hidden
    }

    /// Get base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get boards directory
    pub fn boards_dir(&self) -> &Path {
        &self.boards_dir
    }
}

impl BoardStorage for FileSystemStorage {
    fn save(&self, board: &Board) -> Result<()> {
        self.atomic_write(board)
    }

    fn load(&self, id: &BoardId) -> Result<Board> {
        self.read_board(&self.board_path(id))
    }

    fn list(&self) -> Result<Vec<BoardInfo>> {
        let mut boards = Vec::new();

        let entries = fs::read_dir(&self.boards_dir).map_err(|e| {
            PeerThreadError::Io(e).with_context(format!(
                "Failed to read boards directory {}",
                self.boards_dir.display()
            ))
        })?;

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !Self::is_board_file(&path) {
                continue;
            }

            match self.read_board(&path) {
                Ok(board) => boards.push(board.info()),
                Err(e) => warn!("Skipping unreadable board file {:?}: {}", path, e),
            }
        }

        Ok(boards)
    }

    fn delete(&self, id: &BoardId) -> Result<()> {
        let path = self.board_path(id);

        if !path.exists() {
            return Err(PeerThreadError::BoardNotFound(id.to_string()));
        }

        fs::remove_file(&path)?;
        debug!("Deleted board {} from {:?}", id, path);
        Ok(())
    }

    fn exists(&self, id: &BoardId) -> bool {
        self.board_path(id).exists()
    }
}
