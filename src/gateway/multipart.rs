//! Minimal `multipart/form-data` encoder for the predict upload.

use uuid::Uuid;

/// Builder for a multipart body with text fields and file parts.
pub(super) struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    pub(super) fn new() -> Self {
        Self::with_boundary(format!("modelboard-{}", Uuid::new_v4().simple()))
    }

    pub(super) fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    pub(super) fn text(mut self, name: &str, value: &str) -> Self {
        self.open_part();
        self.push_line(&format!(
            "Content-Disposition: form-data; name=\"{}\"",
            escape_quoted(name)
        ));
        self.push_line("");
        self.body.extend_from_slice(value.as_bytes());
        self.push_line("");
        self
    }

    pub(super) fn file(
        mut self,
        name: &str,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Self {
        self.open_part();
        self.push_line(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"",
            escape_quoted(name),
            escape_quoted(file_name)
        ));
        self.push_line(&format!("Content-Type: {content_type}"));
        self.push_line("");
        self.body.extend_from_slice(bytes);
        self.push_line("");
        self
    }

    /// Close the body and return `(content_type_header, body)`.
    pub(super) fn finish(mut self) -> (String, Vec<u8>) {
        let closing = format!("--{}--", self.boundary);
        self.push_line(&closing);
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body,
        )
    }

    fn open_part(&mut self) {
        let delimiter = format!("--{}", self.boundary);
        self.push_line(&delimiter);
    }

    fn push_line(&mut self, line: &str) {
        self.body.extend_from_slice(line.as_bytes());
        self.body.extend_from_slice(b"\r\n");
    }
}

// Same percent-escaping browsers apply to field and file names.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
