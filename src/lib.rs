// folio: a terminal portfolio backed by a stale-while-revalidate repository cache.

pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod profile;
pub mod state;
pub mod ui;
