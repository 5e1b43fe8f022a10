//! Report form payload

use std::path::Path;

use reqwest::multipart::{Form, Part};
use thiserror::Error;

/// Form construction errors
#[derive(Debug, Error)]
pub enum FormError {
    #[error("invalid field '{0}': expected key=value")]
    InvalidField(String),
    #[error("empty field name in '{0}'")]
    EmptyName(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid mime type '{0}'")]
    Mime(String),
}

/// A single form value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    /// Plain text field
    Text(String),
    /// Binary blob, usually an attached file
    Blob {
        bytes: Vec<u8>,
        file_name: Option<String>,
        mime: Option<String>,
    },
}

/// Ordered multipart payload.
///
/// Field order is preserved and duplicate names are allowed. The submission
/// client never looks inside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportForm {
    fields: Vec<(String, FormValue)>,
}

impl ReportForm {
    /// Empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), FormValue::Text(value.into())));
        self
    }

    /// Append a binary field
    pub fn blob(
        mut self,
        name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
        file_name: Option<String>,
        mime: Option<String>,
    ) -> Self {
        self.fields.push((
            name.into(),
            FormValue::Blob {
                bytes: bytes.into(),
                file_name,
                mime,
            },
        ));
        self
    }

    /// Append a field parsed from `key=value`. Only the first `=` splits.
    pub fn push_pair(&mut self, pair: &str) -> Result<(), FormError> {
        let (name, value) = split_pair(pair)?;
        self.fields
            .push((name.to_string(), FormValue::Text(value.to_string())));
        Ok(())
    }

    /// Append a file field parsed from `key=path`, reading the file now
    pub fn push_file(&mut self, pair: &str) -> Result<(), FormError> {
        let (name, path) = split_pair(pair)?;
        let bytes = std::fs::read(path).map_err(|source| FormError::Io {
            path: path.to_string(),
            source,
        })?;
        let file_name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        let mime = file_name.as_deref().and_then(guess_mime).map(String::from);

        self.fields.push((
            name.to_string(),
            FormValue::Blob {
                bytes,
                file_name,
                mime,
            },
        ));
        Ok(())
    }

    /// Fields in insertion order
    pub fn fields(&self) -> &[(String, FormValue)] {
        &self.fields
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no fields were added
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert into a reqwest multipart body
    pub fn into_multipart(self) -> Result<Form, FormError> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = match value {
                FormValue::Text(text) => form.text(name, text),
                FormValue::Blob {
                    bytes,
                    file_name,
                    mime,
                } => {
                    let mut part = Part::bytes(bytes);
                    if let Some(file_name) = file_name {
                        part = part.file_name(file_name);
                    }
                    if let Some(mime) = mime {
                        part = part.mime_str(&mime).map_err(|_| FormError::Mime(mime))?;
                    }
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

fn split_pair(pair: &str) -> Result<(&str, &str), FormError> {
    let (name, value) = pair
        .split_once('=')
        .ok_or_else(|| FormError::InvalidField(pair.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(FormError::EmptyName(pair.to_string()));
    }
    Ok((name, value))
}

fn guess_mime(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" | "log" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        _ => return None,
    };
    Some(mime)
}
