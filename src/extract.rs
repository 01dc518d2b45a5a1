/*
 * The contents of this file are subject to the terms of the
 * Common Development and Distribution License, Version 1.0 only
 * (the "License").  You may not use this file except in compliance
 * with the License.
 *
 * See the file LICENSE in this distribution for details.
 * A copy of the CDDL is also available via the Internet at
 * http://www.opensource.org/licenses/cddl1.txt
 *
 * When distributing Covered Code, include this CDDL HEADER in each
 * file and include the contents of the LICENSE file from this
 * distribution.
 */

// embedl
// - extract.rs file -

use crate::config::MediaPattern;

use anyhow::{Context, Result};
use regex::Regex;
use scraper::{Html, Selector};

/// The compiled, ordered media URL patterns. Built once per run from the
/// configuration; the first pattern that matches the page body wins.
pub struct Extractor {
    patterns: Vec<(String, Regex)>,
}

impl Extractor {
    pub fn from_patterns(patterns: &[MediaPattern]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(patterns.len());
        for p in patterns {
            let re = Regex::new(&p.pattern)
                .with_context(|| format!("bad media pattern \"{}\"", p.name))?;
            compiled.push((p.name.clone(), re));
        }
        Ok(Extractor { patterns: compiled })
    }

    /// Search <body> for a direct media URL. Runs the regex patterns in
    /// their configured order first; if none of them bites, falls back
    /// to the <video>/<source> elements of the parsed document.
    pub fn extract(&self, body: &str) -> Option<String> {
        for (name, re) in &self.patterns {
            if let Some(captures) = re.captures(body) {
                let raw = captures
                    .name("URL")
                    .or_else(|| captures.get(1))
                    .map_or_else(|| captures.get(0).unwrap().as_str(), |m| m.as_str());
                tracing::debug!(pattern = %name, "media URL pattern matched");
                return Some(normalize_url(raw));
            }
        }

        self.extract_from_source_tags(body)
    }

    fn extract_from_source_tags(&self, body: &str) -> Option<String> {
        let html = Html::parse_document(body);
        let source_selector = Selector::parse("video source, video, source").unwrap();

        for elem in html.select(&source_selector) {
            if let Some(src) = elem.value().attr("src") {
                if src.starts_with("http") {
                    tracing::debug!("media URL taken from a source element");
                    return Some(src.to_string());
                }
            }
        }

        None
    }
}

/// Player configurations frequently live inside JSON strings, where
/// every slash arrives escaped. Undo that.
fn normalize_url(raw: &str) -> String {
    raw.replace("\\/", "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    fn extractor() -> Extractor {
        Extractor::from_patterns(&config::Config::default().patterns).unwrap()
    }

    #[test]
    fn file_assignment_is_found() {
        let body = r#"
            <script>
            jwplayer("vplayer").setup({
                file: "https://host/x.mp4",
                image: "https://host/x.jpg"
            });
            </script>
        "#;
        assert_eq!(
            extractor().extract(body).as_deref(),
            Some("https://host/x.mp4")
        );
    }

    #[test]
    fn json_style_file_key_is_found() {
        let body = r#"{"sources":[],"file":"https:\/\/edge3.host\/v\/stream.m3u8"}"#;
        assert_eq!(
            extractor().extract(body).as_deref(),
            Some("https://edge3.host/v/stream.m3u8")
        );
    }

    #[test]
    fn file_beats_the_generic_quoted_url() {
        let body = r#"
            <a href="https://host/unrelated.mp4">direct</a>
            <script>player.setup({ file: 'https://host/wanted.m3u8' });</script>
        "#;
        assert_eq!(
            extractor().extract(body).as_deref(),
            Some("https://host/wanted.m3u8")
        );
    }

    #[test]
    fn profile_keys_do_not_count_as_file() {
        let body = r#"
            <script>var settings = { profile: "compact" };</script>
            <p>"https://host/fallback.mp4"</p>
        "#;
        assert_eq!(
            extractor().extract(body).as_deref(),
            Some("https://host/fallback.mp4")
        );
    }

    #[test]
    fn quoted_media_url_keeps_its_query() {
        let body = r#"<script>load("https://cdn.host/v.mp4?token=abc123");</script>"#;
        assert_eq!(
            extractor().extract(body).as_deref(),
            Some("https://cdn.host/v.mp4?token=abc123")
        );
    }

    #[test]
    fn source_tag_is_the_last_resort() {
        // No extension on the URL, so none of the regex patterns bite
        // and only the DOM walk can find it.
        let body = r#"
            <html><body>
            <video width="640">
                <source src="https://host/stream/manifest" type="application/x-mpegURL">
            </video>
            </body></html>
        "#;
        assert_eq!(
            extractor().extract(body).as_deref(),
            Some("https://host/stream/manifest")
        );
    }

    #[test]
    fn no_match_is_none() {
        let body = "<html><body><h1>Just a moment...</h1></body></html>";
        assert_eq!(extractor().extract(body), None);
    }

    #[test]
    fn bad_pattern_is_rejected_at_construction() {
        let patterns = [MediaPattern {
            name: "broken".to_string(),
            pattern: "([unclosed".to_string(),
        }];
        assert!(Extractor::from_patterns(&patterns).is_err());
    }
}
