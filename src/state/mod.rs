// State management module.
// Owns the repository cache engine and the state it publishes.

pub mod repos;

pub use repos::{CacheOptions, RepoCache, RepoCacheHandle, RepoPhase, RepoState};
