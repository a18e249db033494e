//! Content-type classification for fetched resources.
//!
//! A pure decision function: given the declared media type of a response, it
//! decides whether the resource is the one source format the pipeline
//! handles. Which rejections warn and which stay silent is deliberate
//! business logic — an HTML error page or an already-converted WebM means the
//! link is known-irrelevant, not broken.

use serde::{Deserialize, Serialize};

use crate::item::SOURCE_EXT;

/// Media types that are skipped without a warning.
///
/// Matched exactly, including parameters, against the raw header value.
const SILENT_SKIP_TYPES: [&str; 2] = ["text/html; charset=utf-8", "video/webm"];

/// Result of classifying a response's declared media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// The resource is in the accepted source format.
    Accepted {
        /// Subtype after the `video/` prefix.
        subtype: String,
    },
    /// The resource must be skipped.
    Rejected(RejectReason),
}

/// Why a resource was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The response carried no media-type header at all.
    NoContentType,
    /// A type on the known-irrelevant list (HTML error page, already-converted
    /// output). Skipped silently.
    KnownIrrelevant { content_type: String },
    /// Not in the `video` top-level category.
    NotVideo { content_type: String },
    /// A video, but not the accepted source container.
    WrongContainer { content_type: String },
}

impl RejectReason {
    /// The warning line for the run log, or `None` for silent skips.
    pub fn warning_line(&self, url: &str) -> Option<String> {
        match self {
            Self::NoContentType => Some(format!("Skipping {url} because it has no content type")),
            Self::KnownIrrelevant { .. } => None,
            Self::NotVideo { content_type } => {
                Some(format!("Skipping {url} because {content_type} it's not a video"))
            }
            Self::WrongContainer { content_type } => Some(format!(
                "Skipping {url} because {content_type} it's not a {SOURCE_EXT}"
            )),
        }
    }
}

/// Classify a declared media type.
///
/// The subtype comparison uses everything after the `video/` prefix, so a
/// parameterized header like `video/mp4; codecs=avc1` is rejected rather
/// than loosely accepted.
pub fn classify(content_type: Option<&str>) -> Classification {
    let Some(content_type) = content_type else {
        return Classification::Rejected(RejectReason::NoContentType);
    };

    if SILENT_SKIP_TYPES.contains(&content_type) {
        return Classification::Rejected(RejectReason::KnownIrrelevant {
            content_type: content_type.to_string(),
        });
    }

    let Some(subtype) = content_type.strip_prefix("video/") else {
        return Classification::Rejected(RejectReason::NotVideo {
            content_type: content_type.to_string(),
        });
    };

    if subtype != SOURCE_EXT {
        return Classification::Rejected(RejectReason::WrongContainer {
            content_type: content_type.to_string(),
        });
    }

    Classification::Accepted {
        subtype: subtype.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(content_type: Option<&str>) -> RejectReason {
        match classify(content_type) {
            Classification::Rejected(reason) => reason,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn missing_content_type_warns() {
        let reason = rejected(None);
        assert_eq!(reason, RejectReason::NoContentType);
        assert_eq!(
            reason.warning_line("https://example.com/a"),
            Some("Skipping https://example.com/a because it has no content type".to_string())
        );
    }

    #[test]
    fn html_error_page_skips_silently() {
        let reason = rejected(Some("text/html; charset=utf-8"));
        assert!(matches!(reason, RejectReason::KnownIrrelevant { .. }));
        assert_eq!(reason.warning_line("https://example.com/a"), None);
    }

    #[test]
    fn already_converted_webm_skips_silently() {
        let reason = rejected(Some("video/webm"));
        assert!(matches!(reason, RejectReason::KnownIrrelevant { .. }));
        assert_eq!(reason.warning_line("https://example.com/a"), None);
    }

    #[test]
    fn mp4_is_accepted() {
        assert_eq!(
            classify(Some("video/mp4")),
            Classification::Accepted {
                subtype: "mp4".to_string()
            }
        );
    }

    #[test]
    fn non_video_warns() {
        let reason = rejected(Some("audio/mpeg"));
        assert!(matches!(reason, RejectReason::NotVideo { .. }));
        assert_eq!(
            reason.warning_line("https://example.com/a"),
            Some("Skipping https://example.com/a because audio/mpeg it's not a video".to_string())
        );
    }

    #[test]
    fn wrong_video_container_warns() {
        let reason = rejected(Some("video/quicktime"));
        assert!(matches!(reason, RejectReason::WrongContainer { .. }));
        assert_eq!(
            reason.warning_line("https://example.com/a"),
            Some(
                "Skipping https://example.com/a because video/quicktime it's not a mp4".to_string()
            )
        );
    }

    #[test]
    fn parameterized_mp4_is_not_loosely_accepted() {
        let reason = rejected(Some("video/mp4; codecs=avc1"));
        assert!(matches!(reason, RejectReason::WrongContainer { .. }));
    }

    #[test]
    fn plain_html_without_charset_is_not_on_the_silent_list() {
        // The silent list is an exact string match; bare text/html falls
        // through to the not-a-video warning.
        let reason = rejected(Some("text/html"));
        assert!(matches!(reason, RejectReason::NotVideo { .. }));
    }
}
