//! Contact request and response types.

use serde::{Deserialize, Serialize};

use crate::error::{ContactError, ContactResult};

/// Message submitted from the contact form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Wire shape before required fields are checked.
#[derive(Deserialize)]
struct RawRequest {
    name: Option<String>,
    email: Option<String>,
    message: Option<String>,
}

impl ContactRequest {
    /// Parse a JSON body. Every field must be present and a string; empty
    /// strings are accepted.
    pub fn from_json(body: &str) -> ContactResult<Self> {
        let raw: RawRequest = serde_json::from_str(body)?;
        Ok(Self {
            name: raw.name.ok_or(ContactError::MissingField { field: "name" })?,
            email: raw.email.ok_or(ContactError::MissingField { field: "email" })?,
            message: raw
                .message
                .ok_or(ContactError::MissingField { field: "message" })?,
        })
    }
}

/// JSON body returned to the form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Success { message: String },
    Failure { error: String },
}

/// HTTP-style status plus body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ContactResponse {
    pub const SUCCESS_MESSAGE: &'static str = "Email sent successfully";
    pub const FAILURE_MESSAGE: &'static str = "Failed to send email";

    pub fn success() -> Self {
        Self {
            status: 200,
            body: ResponseBody::Success {
                message: Self::SUCCESS_MESSAGE.to_string(),
            },
        }
    }

    pub fn failure() -> Self {
        Self {
            status: 500,
            body: ResponseBody::Failure {
                error: Self::FAILURE_MESSAGE.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Serialized body, e.g. `{"message":"Email sent successfully"}`.
    pub fn body_json(&self) -> ContactResult<String> {
        Ok(serde_json::to_string(&self.body)?)
    }
}
