//! `pf-contact` — Contact form submission handling.
//!
//! Parses a JSON submission `{name, email, message}`, forwards it to a
//! [`ContactSink`], and answers with the response the form expects:
//!
//! - `200 {"message":"Email sent successfully"}` on success
//! - `500 {"error":"Failed to send email"}` on any failure
//!
//! # Usage
//!
//! ```rust
//! use pf_contact::{handle_submission, LoggingSink};
//!
//! let body = r#"{"name":"Ada","email":"ada@example.com","message":"Hi"}"#;
//! let response = handle_submission(body, &mut LoggingSink);
//! assert_eq!(response.status, 200);
//! ```

pub mod error;
pub mod handler;
pub mod types;

// Re-export primary API at crate root
pub use error::{ContactError, ContactResult};
pub use handler::{handle_submission, ContactSink, LoggingSink};
pub use types::{ContactRequest, ContactResponse, ResponseBody};
