//! Board manager for CRUD and posting

use super::model::{Board, BoardInfo};
use super::persistence::BoardStorage;
use crate::config::{Config, ReviewConfig};
use crate::error::{PeerThreadError, Result};
use crate::review::{ReviewRecord, ReviewValidator};
use crate::thread::{Forest, ThreadBuilder, ThreadCache};
use crate::types::{BoardId, TargetKind};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Manager for board lifecycle
pub struct BoardManager {
    /// Storage backend
    storage: Arc<dyn BoardStorage>,
    /// Review checks applied before posting
    validator: ReviewValidator,
    /// Posting rules
    rules: ReviewConfig,
    /// Thread builder for reply forests
    builder: ThreadBuilder,
    /// Last built forest per board
    caches: Mutex<HashMap<BoardId, ThreadCache>>,
}

impl BoardManager {
    /// Create a new board manager with the given storage
    pub fn new(storage: impl BoardStorage + 'static) -> Self {
        Self::with_storage(Arc::new(storage))
    }

    /// Create a new board manager with shared storage
    pub fn with_storage(storage: Arc<dyn BoardStorage>) -> Self {
        Self {
            storage,
            validator: ReviewValidator::new(),
            rules: ReviewConfig::default(),
            builder: ThreadBuilder::default(),
            caches: Mutex::default(),
        }
    }

    /// Apply posting rules and thread ordering from configuration
    pub fn with_config(mut self, config: &Config) -> Self {
        self.validator = ReviewValidator::from_config(&config.review);
        self.rules = config.review.clone();
        self.builder = ThreadBuilder::from_config(&config.thread);
        self.caches = Mutex::default();
        self
    }

    /// Create a new, empty board
    pub fn create(&self, id: BoardId, target: TargetKind) -> Result<Board> {
        if self.storage.exists(&id) {
            return Err(PeerThreadError::Validation(format!(
                "Board with ID {} already exists",
                id
            )));
        }
        let board = Board::new(id, target);
        self.storage.save(&board)?;
        Ok(board)
    }

    /// Load a board by ID
    pub fn load(&self, id: &BoardId) -> Result<Board> {
        self.storage.load(id)
    }

    /// Load a board, or start a new one that is not saved yet
    pub fn load_or_new(&self, id: &BoardId, target: TargetKind) -> Result<Board> {
        if self.storage.exists(id) {
            self.storage.load(id)
        } else {
            debug!("Starting new board {}", id);
            Ok(Board::new(id.clone(), target))
        }
    }

    /// List all boards, most recently updated first
    pub fn list(&self) -> Result<Vec<BoardInfo>> {
        let mut boards = self.storage.list()?;
        boards.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(boards)
    }

    /// Delete a board
    pub fn delete(&self, id: &BoardId) -> Result<()> {
        self.storage.delete(id)?;
        self.lock_caches().remove(id);
        Ok(())
    }

    /// Check if a board exists
    pub fn exists(&self, id: &BoardId) -> bool {
        self.storage.exists(id)
    }

    /// Get board count
    pub fn count(&self) -> Result<usize> {
        Ok(self.storage.list()?.len())
    }

    /// Reply forest of a board
    ///
    /// The forest is rebuilt only when the board's reviews differ from the
    /// last call for the same board.
    pub fn threads(&self, board: &Board) -> Forest {
        let mut caches = self.lock_caches();
        caches
            .entry(board.id.clone())
            .or_insert_with(|| ThreadCache::new(self.builder))
            .get_or_build(board.reviews.all())
            .clone()
    }

    /// Post a top-level review to a stored board
    pub fn post_review(&self, id: &BoardId, review: ReviewRecord) -> Result<Board> {
        let mut board = self.load(id)?;
        self.post_review_to(&mut board, review)?;
        Ok(board)
    }

    /// Post a top-level review to `board` and persist it
    ///
    /// Nothing is written when the review is rejected, so a board from
    /// [`BoardManager::load_or_new`] only reaches storage with its first
    /// accepted review.
    pub fn post_review_to(&self, board: &mut Board, review: ReviewRecord) -> Result<()> {
        if review.is_reply() {
            return Err(PeerThreadError::Validation(
                "Use post_reply for records with a parent".to_string(),
            ));
        }

        board.post(review, &self.validator, &self.rules)?;
        self.storage.save(board)
    }

    /// Post a reply and return the board together with the updated forest
    ///
    /// The forest is extended incrementally rather than rebuilt.
    pub fn post_reply(&self, id: &BoardId, reply: ReviewRecord) -> Result<(Board, Forest)> {
        if !reply.is_reply() {
            return Err(PeerThreadError::Validation(
                "A reply needs a parent review".to_string(),
            ));
        }

        let mut board = self.load(id)?;
        let forest = self.threads(&board);
        board.post(reply.clone(), &self.validator, &self.rules)?;
        self.storage.save(&board)?;

        Ok((board, forest.insert_reply(reply)))
    }

    fn lock_caches(&self) -> MutexGuard<'_, HashMap<BoardId, ThreadCache>> {
        self.caches.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::persistence::memory::MemoryStorage;
    use crate::review::ReviewBuilder;
    use crate::types::{AuthorRef, ReviewId};

    fn create_manager() -> BoardManager {
        BoardManager::new(MemoryStorage::new())
    }

    fn board_id(key: &str) -> BoardId {
        BoardId::for_target(TargetKind::Note, key).unwrap()
    }

    fn top(id: &str, author: &str) -> ReviewRecord {
        ReviewBuilder::top_level("Clear and well organised")
            .id(ReviewId::from_string(id))
            .author(AuthorRef::new(author, author))
            .rating(4)
            .build()
            .unwrap()
    }

    fn reply(id: &str, parent: &str, author: &str) -> ReviewRecord {
        ReviewBuilder::reply_to(ReviewId::from_string(parent), "Agreed")
            .id(ReviewId::from_string(id))
            .author(AuthorRef::new(author, author))
            .build()
            .unwrap()
    }

    #[test]
    fn test_create_board() {
        let manager = create_manager();
        let board = manager.create(board_id("a1"), TargetKind::Note).unwrap();
        assert!(manager.exists(&board.id));

        // Duplicate ID should fail
        assert!(manager.create(board_id("a1"), TargetKind::Note).is_err());
    }

    #[test]
    fn test_new_board_saved_with_first_review() {
        let manager = create_manager();
        let id = board_id("a1");

        let mut board = manager.load_or_new(&id, TargetKind::Note).unwrap();
        assert!(!manager.exists(&id));

        manager.post_review_to(&mut board, top("r1", "u1")).unwrap();
        let loaded = manager.load_or_new(&id, TargetKind::Note).unwrap();
        assert_eq!(loaded.review_count(), 1);
    }

    #[test]
    fn test_rejected_first_review_leaves_no_board() {
        let manager = create_manager();
        let id = board_id("a1");

        let mut board = manager.load_or_new(&id, TargetKind::Note).unwrap();
        let bad = ReviewBuilder::top_level("Nice")
            .author(AuthorRef::new("u1", "A"))
            .rating(9)
            .build()
            .unwrap();
        assert!(manager.post_review_to(&mut board, bad).is_err());
        assert!(manager.post_review_to(&mut board, reply("r2", "r1", "u1")).is_err());

        assert!(!manager.exists(&id));
        assert_eq!(manager.count().unwrap(), 0);
    }

    #[test]
    fn test_threads_reuse_cached_forest() {
        let manager = create_manager();
        let id = board_id("a1");
        manager.create(id.clone(), TargetKind::Note).unwrap();
        manager.post_review(&id, top("r1", "u1")).unwrap();
        let rebuilds = |m: &BoardManager| m.lock_caches().get(&id).map(ThreadCache::rebuild_count);

        let board = manager.load(&id).unwrap();
        let first = manager.threads(&board);
        let second = manager.threads(&manager.load(&id).unwrap());
        assert_eq!(first, second);
        assert_eq!(rebuilds(&manager), Some(1));

        let (board, _) = manager.post_reply(&id, reply("r2", "r1", "u2")).unwrap();
        assert_eq!(manager.threads(&board).total_records(), 2);
        assert_eq!(rebuilds(&manager), Some(2));

        manager.delete(&id).unwrap();
        assert_eq!(rebuilds(&manager), None);
    }

    #[test]
    fn test_load_nonexistent() {
        let manager = create_manager();
        assert!(matches!(
            manager.load(&board_id("missing")),
            Err(PeerThreadError::BoardNotFound(_))
        ));
    }

    #[test]
    fn test_post_reply_returns_incremental_forest() {
        let manager = create_manager();
        let id = board_id("a1");
        manager.create(id.clone(), TargetKind::Note).unwrap();

        manager.post_review(&id, top("r1", "u1")).unwrap();
        manager.post_review(&id, top("r2", "u2")).unwrap();
        manager.post_reply(&id, reply("r3", "r1", "u2")).unwrap();
        let (board, forest) = manager.post_reply(&id, reply("r4", "r3", "u1")).unwrap();

        assert_eq!(forest, board.threads(&ThreadBuilder::default()));
        assert_eq!(forest.total_records(), 4);
        assert_eq!(
            forest.thread_of(&ReviewId::from_string("r4")).unwrap().id().as_str(),
            "r1"
        );
    }

    #[test]
    fn test_post_reply_requires_parent() {
        let manager = create_manager();
        let id = board_id("a1");
        manager.create(id.clone(), TargetKind::Note).unwrap();

        assert!(manager.post_reply(&id, top("r1", "u1")).is_err());
        assert!(matches!(
            manager.post_reply(&id, reply("r2", "ghost", "u1")),
            Err(PeerThreadError::ParentNotFound(_))
        ));
        assert!(manager.post_review(&id, reply("r3", "r1", "u1")).is_err());
        assert_eq!(manager.load(&id).unwrap().review_count(), 0);
    }

    #[test]
    fn test_with_config_applies_rules() {
        let mut config = Config::default();
        config.review.one_top_level_per_author = false;
        config.review.max_body_length = 10;
        let manager = BoardManager::new(MemoryStorage::new()).with_config(&config);
        let id = board_id("a1");
        manager.create(id.clone(), TargetKind::Note).unwrap();

        manager
            .post_review(
                &id,
                ReviewBuilder::top_level("short").author(AuthorRef::new("u1", "A")).build().unwrap(),
            )
            .unwrap();
        manager
            .post_review(
                &id,
                ReviewBuilder::top_level("again").author(AuthorRef::new("u1", "A")).build().unwrap(),
            )
            .unwrap();
        assert!(manager
            .post_review(
                &id,
                ReviewBuilder::top_level("far too long for ten").build().unwrap(),
            )
            .is_err());
        assert_eq!(manager.load(&id).unwrap().review_count(), 2);
    }

    #[test]
    fn test_list_and_delete() {
        let manager = create_manager();
        manager.create(board_id("a1"), TargetKind::Note).unwrap();
        manager.create(board_id("a2"), TargetKind::Note).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));
        manager.post_review(&board_id("a2"), top("r1", "u1")).unwrap();

        let list = manager.list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, board_id("a2"));
        assert_eq!(manager.count().unwrap(), 2);

        manager.delete(&board_id("a1")).unwrap();
        assert!(!manager.exists(&board_id("a1")));
        assert_eq!(manager.count().unwrap(), 1);
    }
}
