//! peerthread - threaded reviews for shared notes
//!
//! Stores flat review collections per note or blog post and renders them as
//! reply threads.
//!
//! ## Quick Start
//!
//! ```bash
//! peerthread init
//! peerthread post note-65a1 --author u1 --name Asha --rating 4 "Clear diagrams"
//! peerthread reply note-65a1 --parent <review-id> --author u2 "Agreed"
//! peerthread thread note-65a1 --layout flat
//! ```

mod commands;
mod render;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
