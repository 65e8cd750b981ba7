//! The request method.

use std::fmt;

/// The one method this layer answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GET,
}

impl Method {
    /// Match a method token exactly; `get` is not `GET`.
    pub fn from_token(token: &[u8]) -> Option<Self> {
        match token {
            b"GET" => Some(Method::GET),
            _ => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
