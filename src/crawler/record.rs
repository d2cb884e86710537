//! Page records
//!
//! A [`PageRecord`] is created once per unique page content accepted during a
//! run and never changes afterwards.

use crate::crawler::parser::extract_links;
use reqwest::header::HeaderMap;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

/// Computes the content-addressed key of a page body
///
/// Hex-encoded SHA-256 of the body's UTF-8 bytes.
pub fn content_hash(body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.as_bytes());
    hex::encode(hasher.finalize())
}

/// A fetched page that has not been given an id yet
///
/// Hashing and link extraction happen here, so turning a draft into a
/// [`PageRecord`] only moves fields.
#[derive(Debug, Clone)]
pub struct PageDraft {
    hash: String,
    url: String,
    headers: HeaderMap,
    links: Vec<String>,
    content: String,
}

impl PageDraft {
    pub fn new(url: String, headers: HeaderMap, content: String) -> Self {
        Self {
            hash: content_hash(&content),
            links: extract_links(&content),
            url,
            headers,
            content,
        }
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn into_record(self, id: u64) -> PageRecord {
        PageRecord {
            id,
            hash: self.hash,
            url: self.url,
            headers: self.headers,
            links: self.links,
            content: self.content,
        }
    }
}

/// One fetched, deduplicated page
#[derive(Debug, Clone)]
pub struct PageRecord {
    id: u64,
    hash: String,
    url: String,
    headers: HeaderMap,
    links: Vec<String>,
    content: String,
}

impl PageRecord {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Content hash used as the dedup key
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// URL that was actually fetched (after redirect unwrapping)
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Case-insensitive header lookup
    ///
    /// Non-UTF-8 values are reported as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Anchor targets found in the body, in document order
    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Structured view for downstream consumers
    pub fn to_export(&self) -> PageExport<'_> {
        let mut headers: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in self.headers.iter() {
            let value = String::from_utf8_lossy(value.as_bytes());
            match headers.entry(name.as_str().to_string()) {
                Entry::Occupied(mut existing) => {
                    let joined = existing.get_mut();
                    joined.push_str(", ");
                    joined.push_str(&value);
                }
                Entry::Vacant(slot) => {
                    slot.insert(value.into_owned());
                }
            }
        }

        PageExport {
            id: self.id,
            hash: &self.hash,
            url: &self.url,
            headers,
            links: &self.links,
            content: &self.content,
        }
    }
}

impl fmt::Display for PageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PageRecord(ID:{},URL:{},HASH:{})", self.id, self.url, self.hash)
    }
}

/// Serializable representation of a [`PageRecord`]
///
/// Header names are lowercase; repeated headers are joined with `", "`.
#[derive(Debug, Serialize)]
pub struct PageExport<'a> {
    pub id: u64,
    pub hash: &'a str,
    pub url: &'a str,
    pub headers: BTreeMap<String, String>,
    pub links: &'a [String],
    pub content: &'a str,
}
