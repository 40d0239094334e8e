use crate::client::transport::Interpretation;

/// Content types the dispatcher matches exactly.
pub mod content_type {
    pub const IMAGE_PNG: &str = "image/png";
    pub const AUDIO_OGG: &str = "audio/ogg";
    pub const SEARCH_RESULTS: &str = "application/vnd.zounds.searchresults+json";
    pub const ONSETS: &str = "application/vnd.zounds.onsets+json";

    /// Content types whose body is a `{results: [...]}` document fetched in
    /// a second round trip and browsed page by page.
    pub fn is_paginated(content_type: &str) -> bool {
        content_type == SEARCH_RESULTS || content_type == ONSETS
    }
}

/// A renderable resource announced by the interpreter.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentEnvelope {
    pub content_type: String,
    pub url: String,
}

impl ContentEnvelope {
    /// An interpretation carries an envelope only when both the resource
    /// URL and its content type are present.
    pub fn from_interpretation(interpretation: &Interpretation) -> Option<Self> {
        match (&interpretation.url, &interpretation.content_type) {
            (Some(url), Some(content_type)) => Some(Self {
                content_type: content_type.clone(),
                url: url.clone(),
            }),
            _ => None,
        }
    }
}

/// One line of the console transcript.
#[derive(Clone, Debug, PartialEq)]
pub enum TranscriptEntry {
    /// A command the user submitted, echoed back.
    Statement(String),
    /// The interpreter's textual result.
    Result(String),
    /// A failure message, shown verbatim.
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_requires_both_url_and_content_type() {
        let full = Interpretation {
            result: "ok".to_string(),
            url: Some("/a.png".to_string()),
            content_type: Some(content_type::IMAGE_PNG.to_string()),
        };
        assert_eq!(
            ContentEnvelope::from_interpretation(&full),
            Some(ContentEnvelope {
                content_type: content_type::IMAGE_PNG.to_string(),
                url: "/a.png".to_string(),
            })
        );

        let url_only = Interpretation {
            result: "ok".to_string(),
            url: Some("/a.png".to_string()),
            content_type: None,
        };
        assert_eq!(ContentEnvelope::from_interpretation(&url_only), None);

        let text_only = Interpretation::default();
        assert_eq!(ContentEnvelope::from_interpretation(&text_only), None);
    }

    #[test]
    fn paginated_content_types_match_exactly() {
        assert!(content_type::is_paginated(content_type::SEARCH_RESULTS));
        assert!(content_type::is_paginated(content_type::ONSETS));
        assert!(!content_type::is_paginated(content_type::IMAGE_PNG));
        assert!(!content_type::is_paginated(
            "application/vnd.zounds.searchresults+json; charset=utf-8"
        ));
    }
}
