/// Typed client for the console backend: endpoints, wire types and errors
pub mod api;

/// CLI subcommands, one module per console screen
pub mod commands;

/// Flag, environment and config-file resolution
pub mod config;

/// Confirmed, validated mutations followed by a refresh
pub mod dispatch;

/// Loads backend collections into list state
pub mod fetcher;

/// Client-side form validation
pub mod forms;

/// Generic filtering, sorting and pagination of fetched collections
pub mod list;

/// Jobs, members, payments, prospects and dashboard counters
pub mod models;

/// Toast notifications
pub mod notify;

/// Table rendering of list views
pub mod present;

/// Per-screen filters and ordering
pub mod screens;

/// Signed-in member context
pub mod session;

pub mod stats;
