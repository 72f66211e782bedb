//! Repository layer for player profiles.
//!
//! Repositories own durability only: the cache, retry policy and fallbacks
//! live in [`crate::manager`].

mod error;
mod file;
mod memory;
mod record;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileProfileRepository;
pub use memory::InMemoryProfileRepository;
pub use record::{ProfileRecord, SkillRecord};
pub use traits::ProfileRepository;
