// ABOUTME: Document sharing for the quickslides engine
// ABOUTME: Compresses the document into a URL-safe token and decodes incoming tokens

use crate::errors::{Result, SlideError};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use log::{debug, info};
use std::io::{Read, Write};
use url::Url;

/// Query parameter carrying the token.
pub const SHARE_PARAM: &str = "doc";

/// Compress `document` into a URL-safe token.
pub fn encode(document: &str) -> Result<String> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(document.as_bytes())?;
    let compressed = encoder.finish()?;
    debug!(
        "Compressed {} bytes into {} bytes",
        document.len(),
        compressed.len()
    );
    Ok(URL_SAFE_NO_PAD.encode(compressed))
}

/// Largest document a token may expand to.
pub const MAX_DOCUMENT_BYTES: usize = 4 * 1024 * 1024;

/// Reverse of [`encode`].
pub fn decode(token: &str) -> Result<String> {
    let compressed = URL_SAFE_NO_PAD.decode(token.trim())?;
    let mut bytes = Vec::new();
    DeflateDecoder::new(compressed.as_slice())
        .take(MAX_DOCUMENT_BYTES as u64 + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| SlideError::ShareDecodeError(format!("corrupt token: {}", e)))?;
    if bytes.len() > MAX_DOCUMENT_BYTES {
        return Err(SlideError::ShareDecodeError(format!(
            "document exceeds {} bytes",
            MAX_DOCUMENT_BYTES
        )));
    }
    String::from_utf8(bytes)
        .map_err(|e| SlideError::ShareDecodeError(format!("token is not UTF-8 text: {}", e)))
}

/// `base` with the document attached as a query parameter.
pub fn share_url(base: &str, document: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    let token = encode(document)?;
    let others: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != SHARE_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &others {
            pairs.append_pair(k, v);
        }
        pairs.append_pair(SHARE_PARAM, &token);
    }
    Ok(url)
}

/// The token in a share URL, if it carries one.
pub fn token_from_url(url: &str) -> Result<Option<String>> {
    let url = Url::parse(url)?;
    Ok(url
        .query_pairs()
        .find(|(k, _)| k == SHARE_PARAM)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty()))
}

/// What to do with a token that arrived on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareDecision {
    /// The token holds the current document already.
    Unchanged,
    /// The token holds different content. The host asks the user before
    /// replacing the document with it.
    Replace(String),
}

pub fn incoming(current: &str, token: &str) -> Result<ShareDecision> {
    let decoded = decode(token)?;
    if decoded == current {
        debug!("Shared document matches the current one");
        Ok(ShareDecision::Unchanged)
    } else {
        info!("Shared document differs from the current one ({} bytes)", decoded.len());
        Ok(ShareDecision::Replace(decoded))
    }
}
