//! Image reference classification.
//!
//! A reference is classified by literal prefix test, never content
//! sniffing. Embedded references keep their payload as base64 — both
//! backends accept base64 directly, so nothing is decoded or re-encoded
//! here. A malformed embedded reference classifies as no-image rather than
//! failing the request: image absence degrades gracefully, it never aborts
//! scoring.

use tracing::warn;

const BASE64_MARKER: &str = ";base64,";

/// Classification of a raw image reference string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef<'a> {
    /// No usable image (empty, unrecognized, or malformed reference).
    None,
    /// A fetchable `http://` / `https://` URL.
    Remote(&'a str),
    /// Inline base64 payload with a declared media type.
    Embedded {
        media_type: &'a str,
        base64: &'a str,
    },
}

impl ImageRef<'_> {
    pub fn is_none(&self) -> bool {
        matches!(self, ImageRef::None)
    }
}

/// Inline image data in the form the backends consume it.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub media_type: String,
    /// Base64-encoded bytes.
    pub data: String,
}

/// Classify an image reference string.
pub fn classify(image_ref: &str) -> ImageRef<'_> {
    if has_prefix_ignore_case(image_ref, "data:") {
        match split_embedded(image_ref) {
            Some((media_type, base64)) => ImageRef::Embedded { media_type, base64 },
            None => {
                warn!("malformed embedded image reference, scoring without image");
                ImageRef::None
            }
        }
    } else if has_prefix_ignore_case(image_ref, "http://")
        || has_prefix_ignore_case(image_ref, "https://")
    {
        ImageRef::Remote(image_ref)
    } else {
        ImageRef::None
    }
}

/// Split `data:<mediaType>;base64,<payload>` once on the `;base64,` marker.
fn split_embedded(image_ref: &str) -> Option<(&str, &str)> {
    let rest = &image_ref["data:".len()..];
    // Byte positions survive the lowercasing, so the slices below index the
    // original string.
    let marker = rest.to_ascii_lowercase().find(BASE64_MARKER)?;
    let media_type = &rest[..marker];
    if media_type.is_empty() {
        return None;
    }
    Some((media_type, &rest[marker + BASE64_MARKER.len()..]))
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
