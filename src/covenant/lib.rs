//! # Covenant Architecture
//!
//! Covenant fills agreement templates with field values and exports the result as
//! plain text, DOCX, or PDF. It is a library with a CLI client, not the other way
//! around: nothing from `api.rs` inward writes to a terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, sets up logging        │
//! │  - Loads and saves the session history file                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Supplies today's date, output dir, default formats       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - preview, generate (gating + export), history, config     │
//! │  - Returns `Result<CmdResult>`                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────┬──────────────────┬───────────────────────┐
//! │ store/           │ render.rs        │ export/               │
//! │ template lookup  │ safe renderer    │ txt / docx / pdf      │
//! └──────────────────┴──────────────────┴───────────────────────┘
//! ```
//!
//! ## Flow
//!
//! template name → [`store::TemplateStore::load`] (unknown names fall back to
//! `Service`) → [`render::render`] → required field check → [`export`] per format →
//! entry appended to the caller's [`model::History`].
//!
//! The same [`render::RenderedText`] feeds the preview and every export format.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`commands`]: logic for each operation
//! - [`store`]: template storage and history persistence
//! - [`render`]: placeholder substitution and whitespace normalization
//! - [`export`]: text, DOCX and PDF writers
//! - [`model`]: template ids, field maps, artifacts, history
//! - [`config`]: `.covenant/config.json`
//! - [`init`]: builds the API and loads history for a project directory
//! - [`error`]: error types
//! - `cli`: argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod init;
pub mod model;
pub mod render;
pub mod store;
