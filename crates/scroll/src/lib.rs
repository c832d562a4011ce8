//! `pf-scroll` -- Scroll runtime for the choreography engine.
//!
//! This crate provides:
//!
//! - **`ScrollRange`**: Maps a document scroll offset onto a progress value.
//! - **`ProgressSource`**: Push-based progress broadcaster with scoped `Subscription`s.
//! - **`ScrollChoreographer`**: Binds a `Timeline` to a source and a `RenderTarget`.
//! - **`SmoothScroll`**: Eased tween for programmatic scroll jumps.
//!
//! # Architecture
//!
//! ```text
//! scroll_y ──ScrollRange──▶ ProgressSource ──publish──▶ Subscription(s)
//!                                                        │
//!                                     ScrollChoreographer┘
//!                                     ├── evaluate(timeline, progress)
//!                                     └── RenderTarget::apply(&StyleMap)
//! ```

pub mod choreographer;
pub mod range;
pub mod smooth;
pub mod source;

// Re-export primary types at crate root for convenience.
pub use choreographer::{RenderTarget, ScrollChoreographer};
pub use range::{pointer_progress, ScrollRange};
pub use smooth::SmoothScroll;
pub use source::{ProgressSource, Subscription};
