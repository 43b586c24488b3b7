//! Arcanum Content - RON content loader and built-in game data
//!
//! Content tables live in RON documents: actions, skills, spells, enemies,
//! dungeons, houses and housing items. [`Loader`] reads documents from disk
//! or strings, rejects duplicates, validates cross references, and yields
//! the [`Content`](arcanum_core::Content) bundle the engine consumes.
//! [`builtin`] returns the game data shipped with this crate.

mod error;
mod loader;

pub use error::{Error, Result};
pub use loader::Loader;

use arcanum_core::Content;

/// The content documents embedded in this crate
const BUILTIN_DOCS: &[&str] = &[
    include_str!("../content/skills.ron"),
    include_str!("../content/actions.ron"),
    include_str!("../content/spells.ron"),
    include_str!("../content/bestiary.ron"),
    include_str!("../content/housing.ron"),
];

/// Load the built-in game data
pub fn builtin() -> Result<Content> {
    let mut loader = Loader::new();
    for doc in BUILTIN_DOCS {
        loader.load_str(doc)?;
    }
    loader.finish()
}
