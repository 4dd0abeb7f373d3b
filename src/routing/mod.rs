//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     HandlerSet (injected by the application)
//!     → routes.rs (bind slots to fixed paths, mount asset services)
//!     → Freeze as an immutable axum Router
//!
//! Per request (after admission):
//!     exact path match → handler slot
//!     /css/*, /web/images/* → prefix stripped, directory service
//!     anything else → not-found handler
//! ```

pub mod routes;

pub use routes::{
    forum_router, AuthHandlers, CommentHandlers, HandlerSet, ModerationHandlers, PageHandlers,
    PostHandlers,
};
