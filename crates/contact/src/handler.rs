//! Submission handling: parse, hand to a sink, answer the form.

use tracing::{error, info};

use crate::error::ContactResult;
use crate::types::{ContactRequest, ContactResponse};

/// Destination for accepted contact messages.
pub trait ContactSink {
    fn deliver(&mut self, request: &ContactRequest) -> ContactResult<()>;
}

/// Logs each submission and reports success. No message leaves the process.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingSink;

impl ContactSink for LoggingSink {
    fn deliver(&mut self, request: &ContactRequest) -> ContactResult<()> {
        info!(
            name = %request.name,
            email = %request.email,
            message = %request.message,
            "Contact form submission"
        );
        Ok(())
    }
}

/// Handle one raw submission body.
///
/// Any failure (malformed JSON, missing field, delivery error) is logged and
/// answered with the generic 500 response; the caller never sees the cause.
pub fn handle_submission(body: &str, sink: &mut impl ContactSink) -> ContactResponse {
    match submit(body, sink) {
        Ok(()) => ContactResponse::success(),
        Err(e) => {
            error!(error = %e, "Contact form error");
            ContactResponse::failure()
        }
    }
}

fn submit(body: &str, sink: &mut impl ContactSink) -> ContactResult<()> {
    let request = ContactRequest::from_json(body)?;
    sink.deliver(&request)
}
