//! # Core Application Logic
//!
//! This module contains Chatbox's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐           ┌──────────────┐
//!            │    TUI     │           │  Inference   │
//!            │  Adapter   │           │  (resolver)  │
//!            │ (ratatui)  │           │              │
//!            └────────────┘           └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: `Message`, `Sender`, and the `Reply` handed back by the resolver
//! - [`conversation`]: the append-only message list
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: layered configuration (defaults → file → env → CLI)

pub mod action;
pub mod config;
pub mod conversation;
pub mod message;
pub mod state;
