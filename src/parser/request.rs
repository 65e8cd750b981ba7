//! Request line tokenization and validation.

use log::debug;

use crate::parser::error::Error;
use crate::parser::method::Method;

/// Longest method token accepted before it is rejected outright.
const MAX_METHOD_LEN: usize = 99;

/// Longest path accepted by default: a 1024 byte buffer minus its terminator.
pub const DEFAULT_MAX_PATH_LEN: usize = 1023;

/// The validated first two tokens of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// The HTTP method.
    pub method: Method,
    /// The requested path, free of `..` and `//`.
    pub path: String,
}

impl RequestLine {
    /// The requested path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Byte classes treated as separators, matching C `isspace`.
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Whitespace-delimited tokens of a byte buffer.
///
/// Leading separators are skipped and line breaks are ordinary separators,
/// so tokens are found the way a `"%s %s"` scan would find them.
struct Tokens<'a> {
    rest: &'a [u8],
}

impl<'a> Tokens<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { rest: input }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let start = self.rest.iter().position(|&b| !is_space(b))?;
        let rest = &self.rest[start..];
        let end = rest.iter().position(|&b| is_space(b)).unwrap_or(rest.len());
        let (token, tail) = rest.split_at(end);
        self.rest = tail;
        Some(token)
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// A printable copy of at most `limit` bytes of `token`, for diagnostics.
fn excerpt(token: &[u8], limit: usize) -> String {
    String::from_utf8_lossy(&token[..token.len().min(limit)]).into_owned()
}

fn parse_method(token: &[u8]) -> Result<Method, Error> {
    Method::from_token(token)
        .ok_or_else(|| Error::UnsupportedMethod(excerpt(token, MAX_METHOD_LEN)))
}

fn validate_path(token: &[u8], max_path_len: usize) -> Result<&str, Error> {
    if token.is_empty() || contains(token, b"..") || contains(token, b"//") {
        return Err(Error::InvalidPath(excerpt(token, max_path_len)));
    }

    // Checked on the borrowed token so nothing oversized is ever copied out.
    if token.len() > max_path_len {
        return Err(Error::PathTooLong {
            len: token.len(),
            max: max_path_len,
        });
    }

    std::str::from_utf8(token).map_err(|_| Error::InvalidPath(excerpt(token, max_path_len)))
}

/// Parse the method and path out of the bytes read from a connection.
///
/// Only the first two whitespace-delimited tokens are examined; the protocol
/// version, headers and anything after them are ignored. Input is treated as
/// ending at the first NUL byte.
///
/// # Arguments
///
/// * `input` - The bytes received from the client
/// * `max_path_len` - The largest path, in bytes, the caller can hold
///
/// # Returns
///
/// The validated request line, or the first validation failure in the order
/// empty request, method, path.
pub fn parse_request(input: &[u8], max_path_len: usize) -> Result<RequestLine, Error> {
    let input = input.split(|&b| b == 0).next().unwrap_or_default();

    let mut tokens = Tokens::new(input);
    let method_token = tokens.next().ok_or(Error::EmptyRequest)?;
    let path_token = tokens.next().unwrap_or_default();

    debug!(
        "Request type: {method} path: {path}",
        method = excerpt(method_token, MAX_METHOD_LEN),
        path = excerpt(path_token, max_path_len)
    );

    let method = parse_method(method_token)?;
    let path = validate_path(path_token, max_path_len)?;

    Ok(RequestLine {
        method,
        path: path.to_owned(),
    })
}
