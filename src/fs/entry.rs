//! Directory listing entries.

use serde::Deserialize;

use crate::error::{KastError, Result};

/// Raw wire shape of one listing row: `{ name, isDirectory, qrCode? }`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "isDirectory")]
    is_directory: bool,
    #[serde(default, rename = "qrCode")]
    qr_code: Option<String>,
}

/// A file or folder row returned by the listing endpoint.
///
/// The backend sends duck-typed objects; they are validated here, at the
/// fetch boundary, into a tagged variant instead of being trusted
/// downstream. `qr_code` carries the shareable-link QR image (URL or data
/// URI) for entries that expose one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File {
        name: String,
        qr_code: Option<String>,
    },
    Directory {
        name: String,
        qr_code: Option<String>,
    },
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::File { name, .. } | Entry::Directory { name, .. } => name,
        }
    }

    pub fn qr_code(&self) -> Option<&str> {
        match self {
            Entry::File { qr_code, .. } | Entry::Directory { qr_code, .. } => qr_code.as_deref(),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Entry::Directory { .. })
    }

    pub(crate) fn from_raw(raw: RawEntry) -> Result<Self> {
        let name = match raw.name {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(KastError::InvalidEntry(
                    "listing entry without a name".to_string(),
                ));
            }
        };
        Ok(if raw.is_directory {
            Entry::Directory {
                name,
                qr_code: raw.qr_code,
            }
        } else {
            Entry::File {
                name,
                qr_code: raw.qr_code,
            }
        })
    }
}

/// Validate a raw listing into entries, preserving backend order.
pub(crate) fn parse_listing(raw: Vec<RawEntry>) -> Result<Vec<Entry>> {
    raw.into_iter().map(Entry::from_raw).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawEntry {
        serde_json::from_str(json).expect("raw entry")
    }

    #[test]
    fn test_tagging_from_wire_shape() {
        let file = Entry::from_raw(raw(r#"{"name":"a.png","isDirectory":false}"#)).expect("file");
        assert_eq!(file.name(), "a.png");
        assert!(!file.is_directory());
        assert!(file.qr_code().is_none());

        let dir = Entry::from_raw(raw(r#"{"name":"Docs","isDirectory":true}"#)).expect("dir");
        assert!(dir.is_directory());
    }

    #[test]
    fn test_missing_is_directory_means_file() {
        let entry = Entry::from_raw(raw(r#"{"name":"notes.txt"}"#)).expect("entry");
        assert!(!entry.is_directory());
    }

    #[test]
    fn test_qr_code_passthrough() {
        let entry = Entry::from_raw(raw(
            r#"{"name":"a.png","isDirectory":false,"qrCode":"data:image/png;base64,AAAA"}"#,
        ))
        .expect("entry");
        assert_eq!(entry.qr_code(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_nameless_entry_rejected() {
        assert!(Entry::from_raw(raw(r#"{"isDirectory":true}"#)).is_err());
        assert!(Entry::from_raw(raw(r#"{"name":"","isDirectory":false}"#)).is_err());
    }

    #[test]
    fn test_listing_preserves_backend_order() {
        let listing = parse_listing(vec![
            raw(r#"{"name":"zebra.txt"}"#),
            raw(r#"{"name":"Apps","isDirectory":true}"#),
            raw(r#"{"name":"middle.txt"}"#),
        ])
        .expect("listing");
        let names: Vec<&str> = listing.iter().map(Entry::name).collect();
        assert_eq!(names, ["zebra.txt", "Apps", "middle.txt"]);
    }

    #[test]
    fn test_listing_rejected_on_invalid_row() {
        let result = parse_listing(vec![raw(r#"{"name":"ok.txt"}"#), raw(r#"{}"#)]);
        assert!(result.is_err());
    }
}
