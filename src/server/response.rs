//! Response head serialization.

/// Protocol version written on every status line.
const HTTP_VERSION: &str = "HTTP/1.1";

/// Content type of error pages.
pub const ERROR_CONTENT_TYPE: &str = "text/html";

/// HTTP status codes with their standard reason phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok = 200,
    NotFound = 404,
}

impl StatusCode {
    /// Get the reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
        }
    }

    pub fn as_u16(&self) -> u16 {
        *self as u16
    }
}

/// Everything that precedes the body of a response.
///
/// Lines end in a bare `\n`, and the connection is always announced as
/// closing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: StatusCode,
    pub content_type: String,
    pub content_length: usize,
}

impl ResponseHead {
    /// The head of a `200 OK` response for `body`.
    ///
    /// Line breaks in `content_type` are dropped so the value stays on its
    /// header line.
    pub fn ok(content_type: &str, body: &[u8]) -> Self {
        Self {
            status: StatusCode::Ok,
            content_type: content_type.replace(['\r', '\n'], ""),
            content_length: body.len(),
        }
    }

    /// The head of a `404 Not Found` page carrying `message`.
    pub fn not_found(message: &str) -> Self {
        Self {
            status: StatusCode::NotFound,
            content_type: ERROR_CONTENT_TYPE.to_string(),
            content_length: message.len(),
        }
    }

    /// The head as the separate lines written to the wire. The last line
    /// carries the blank line that ends the head.
    pub fn lines(&self) -> [String; 4] {
        [
            format!(
                "{HTTP_VERSION} {code} {reason}\n",
                code = self.status.as_u16(),
                reason = self.status.reason_phrase()
            ),
            format!("Content-Type: {}\n", self.content_type),
            format!("Content-Length: {}\n", self.content_length),
            "Connection: Close\n\n".to_string(),
        ]
    }

    /// The complete response, head followed by `body`.
    pub fn to_bytes(&self, body: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(128 + body.len());
        for line in self.lines() {
            bytes.extend_from_slice(line.as_bytes());
        }
        bytes.extend_from_slice(body);
        bytes
    }
}
