//! # Response Status
//!
//! The fixed set of constrained-protocol response codes an object operation can produce.
//! The discriminant is the CoAP code byte: three bits of class, five bits of detail.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Status {
    Created = 0x41,
    Deleted = 0x42,
    Changed = 0x44,
    Content = 0x45,
    NotFound = 0x84,
    MethodNotAllowed = 0x85,
    InternalServerError = 0xA0,
}

impl Status {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn class(self) -> u8 {
        self.code() >> 5
    }

    pub fn detail(self) -> u8 {
        self.code() & 0x1F
    }

    pub fn is_success(self) -> bool {
        self.class() == 2
    }

    fn reason(self) -> &'static str {
        match self {
            Status::Created => "Created",
            Status::Deleted => "Deleted",
            Status::Changed => "Changed",
            Status::Content => "Content",
            Status::NotFound => "Not Found",
            Status::MethodNotAllowed => "Method Not Allowed",
            Status::InternalServerError => "Internal Server Error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02} {}", self.class(), self.detail(), self.reason())
    }
}
