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
// - ident.rs file -

use crate::config::Config;
use crate::error::LocateError;

use url::Url;

/// What the input link turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identified {
    /// An opaque video identifier to plug into the player URL template.
    Id(String),
    /// The input already points straight at a media file.
    Media(String),
}

/// Pull a video identifier out of an arbitrary input link.
///
/// Checked in order:
///   1. a URL fragment longer than `fragment_min_len` characters,
///   2. a link that already ends in a known media extension (no page
///      fetch needed in that case),
///   3. the first path segment that is entirely alphanumeric and whose
///      length lies strictly inside the configured window.
///
/// The segment rule is lossy on purpose: an unrelated alphanumeric
/// segment of the right length will be picked up as well. There is no
/// better rule; the hosts embed the identifier wherever they like.
pub fn identify(input: &str, config: &Config) -> Result<Identified, LocateError> {
    let url =
        Url::parse(input).map_err(|_| LocateError::NoIdentifier(input.to_string()))?;

    if let Some(fragment) = url.fragment() {
        if fragment.len() > config.fragment_min_len {
            tracing::debug!(identifier = %fragment, "identifier taken from the URL fragment");
            return Ok(Identified::Id(fragment.to_string()));
        }
    }

    if has_media_extension(url.path(), &config.media_extensions) {
        tracing::debug!(url = %input, "input is already a media file");
        return Ok(Identified::Media(input.to_string()));
    }

    if let Some(segments) = url.path_segments() {
        for segment in segments {
            if segment.len() > config.segment_min_len
                && segment.len() < config.segment_max_len
                && segment.chars().all(|c| c.is_ascii_alphanumeric())
            {
                tracing::debug!(identifier = %segment, "identifier taken from a path segment");
                return Ok(Identified::Id(segment.to_string()));
            }
        }
    }

    Err(LocateError::NoIdentifier(input.to_string()))
}

/// true, if <path> ends in one of the known media extensions.
pub fn has_media_extension(path: &str, extensions: &[String]) -> bool {
    match path.rsplit_once('.') {
        Some((_, ext)) => extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> Config {
        Config::default()
    }

    #[test]
    fn fragment_wins_when_long_enough() {
        let got = identify("https://host.example/watch#abcdef12345", &cfg()).unwrap();
        assert_eq!(got, Identified::Id("abcdef12345".to_string()));
    }

    #[test]
    fn fragment_beats_path_segments() {
        let got =
            identify("https://host.example/segment99xyz/view#fragment123", &cfg()).unwrap();
        assert_eq!(got, Identified::Id("fragment123".to_string()));
    }

    #[test]
    fn short_fragment_is_skipped() {
        // Eight characters exactly is not "longer than 8".
        let got = identify("https://host.example/abcdef12345#eightchr", &cfg()).unwrap();
        assert_eq!(got, Identified::Id("abcdef12345".to_string()));
    }

    #[test]
    fn first_matching_path_segment_wins() {
        let got = identify(
            "https://host.example/tooShort/abcdefgh12345/zyxwvut9876543",
            &cfg(),
        )
        .unwrap();
        assert_eq!(got, Identified::Id("abcdefgh12345".to_string()));
    }

    #[test]
    fn segment_window_bounds_are_exclusive() {
        // 8 characters: too short.
        assert!(matches!(
            identify("https://host.example/a1b2c3d4", &cfg()),
            Err(LocateError::NoIdentifier(_))
        ));
        // 20 characters: too long.
        assert!(matches!(
            identify("https://host.example/a1b2c3d4e5f6g7h8i9j0", &cfg()),
            Err(LocateError::NoIdentifier(_))
        ));
        // 9 and 19 are inside the window.
        assert!(matches!(
            identify("https://host.example/a1b2c3d4e", &cfg()),
            Ok(Identified::Id(_))
        ));
        assert!(matches!(
            identify("https://host.example/a1b2c3d4e5f6g7h8i9j", &cfg()),
            Ok(Identified::Id(_))
        ));
    }

    #[test]
    fn non_alphanumeric_segments_are_skipped() {
        assert!(matches!(
            identify("https://host.example/abc-def-ghi", &cfg()),
            Err(LocateError::NoIdentifier(_))
        ));
    }

    #[test]
    fn direct_media_link_short_circuits() {
        let got = identify("https://cdn.example/clips/video123.mp4", &cfg()).unwrap();
        assert_eq!(
            got,
            Identified::Media("https://cdn.example/clips/video123.mp4".to_string())
        );
    }

    #[test]
    fn media_extension_beats_a_plausible_path_segment() {
        // The directory segment would qualify as an identifier, but the
        // link already points at a file we can fetch directly.
        let got = identify("https://cdn.example/abcdef123456/v.m3u8", &cfg()).unwrap();
        assert!(matches!(got, Identified::Media(_)));
    }

    #[test]
    fn query_strings_do_not_hide_the_extension() {
        let got =
            identify("https://cdn.example/clips/video123.mp4?token=zz", &cfg()).unwrap();
        assert!(matches!(got, Identified::Media(_)));
    }

    #[test]
    fn garbage_input_has_no_identifier() {
        assert!(matches!(
            identify("not a link at all", &cfg()),
            Err(LocateError::NoIdentifier(_))
        ));
        assert!(matches!(
            identify("https://host.example/", &cfg()),
            Err(LocateError::NoIdentifier(_))
        ));
    }
}
