//! Adjacent Site - recent posts and theme preference for a static site
//!
//! This crate fetches a syndication feed through an ordered list of access
//! paths, renders the newest posts as cards (falling back to a hardcoded list
//! when the feed is unreachable), and persists a light/dark theme preference.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod parser;
pub mod post;
pub mod render;
pub mod text;
pub mod theme;
