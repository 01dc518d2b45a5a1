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
// - config.rs file -

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// One entry of the ordered media URL pattern list. The list lives in
/// the configuration, not in the code, so a host changing its player
/// markup only costs a config edit, not a rebuild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaPattern {
    /// Short name, shows up in the logs when the pattern matches.
    pub name: String,
    /// The regular expression. The media URL is taken from the `URL`
    /// named capture group, or from group 1 if there is none.
    pub pattern: String,
}

/// Which page fetcher backend to run. Exactly one is selected per
/// invocation; they all answer the same question ("what does the player
/// page look like?") with different levels of disguise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FetcherKind {
    /// Plain blocking HTTP with browser-like headers.
    #[default]
    Plain,
    /// A real browser behind a WebDriver endpoint.
    Webdriver,
    /// TLS-fingerprint impersonation of a desktop Chrome.
    Impersonated,
}

/// Everything tunable about a resolve-and-download run, passed into the
/// locator and the fetcher at construction time. No process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Origin of the player ("embed") pages.
    #[serde(default = "default_player_origin")]
    pub player_origin: String,
    /// Path prefix the video identifier is appended to.
    #[serde(default = "default_player_path")]
    pub player_path: String,
    /// The site we claim to be coming from. The player host checks the
    /// Referer header against it.
    #[serde(default = "default_referring_site")]
    pub referring_site: String,
    /// User-Agent for all requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// A URL fragment longer than this many characters is taken as the
    /// video identifier.
    #[serde(default = "default_fragment_min_len")]
    pub fragment_min_len: usize,
    /// Path segments are identifier candidates when their length is
    /// strictly between these two bounds and they are entirely
    /// alphanumeric. Both bounds are exclusive.
    #[serde(default = "default_segment_min_len")]
    pub segment_min_len: usize,
    #[serde(default = "default_segment_max_len")]
    pub segment_max_len: usize,
    /// Media larger than this cannot be delivered and is reported as a
    /// direct link instead.
    #[serde(default = "default_max_media_bytes")]
    pub max_media_bytes: u64,
    /// Time budget for any single network operation, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Page fetcher backend.
    #[serde(default)]
    pub fetcher: FetcherKind,
    /// WebDriver port for the webdriver backend. 0 = not configured.
    #[serde(default)]
    pub webdriver_port: u16,
    /// File extensions we recognize as "already a media file".
    #[serde(default = "default_media_extensions")]
    pub media_extensions: Vec<String>,
    /// Ordered media URL patterns, most specific first. First match wins.
    /// Kept at the end so the TOML form stays readable.
    #[serde(default = "default_patterns")]
    pub patterns: Vec<MediaPattern>,
}

fn default_player_origin() -> String {
    "https://streama2z.pro".to_string()
}

fn default_player_path() -> String {
    "/e/".to_string()
}

fn default_referring_site() -> String {
    "https://smartkhabrinews.com/".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

fn default_fragment_min_len() -> usize {
    8
}

fn default_segment_min_len() -> usize {
    8
}

fn default_segment_max_len() -> usize {
    20
}

fn default_media_extensions() -> Vec<String> {
    ["mp4", "m3u8", "webm", "mkv", "mov"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_patterns() -> Vec<MediaPattern> {
    vec![
        // A `file:` assignment in the player setup block. Matches both
        // the plain JS form (file: "...") and the JSON form ("file":"...").
        MediaPattern {
            name: "player-file".to_string(),
            pattern: r#""?\bfile\b"?\s*:\s*["'](?P<URL>[^"']+)["']"#.to_string(),
        },
        // `source:` / `src:` assignments, as some player builds use those.
        MediaPattern {
            name: "player-source".to_string(),
            pattern: r#""?\b(?:source|src)\b"?\s*:\s*["'](?P<URL>https?:[^"']+)["']"#.to_string(),
        },
        // Last resort: any quoted URL that ends in a media extension.
        MediaPattern {
            name: "quoted-media-url".to_string(),
            pattern: r#"["'](?P<URL>https?://[^"']+?\.(?:mp4|m3u8|webm|mkv|mov)(?:\?[^"']*)?)["']"#
                .to_string(),
        },
    ]
}

fn default_max_media_bytes() -> u64 {
    // Chat transports top out below 50 MB for bot uploads.
    49 * 1024 * 1024
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            player_origin: default_player_origin(),
            player_path: default_player_path(),
            referring_site: default_referring_site(),
            user_agent: default_user_agent(),
            fragment_min_len: default_fragment_min_len(),
            segment_min_len: default_segment_min_len(),
            segment_max_len: default_segment_max_len(),
            max_media_bytes: default_max_media_bytes(),
            timeout_secs: default_timeout_secs(),
            fetcher: FetcherKind::default(),
            webdriver_port: 0,
            media_extensions: default_media_extensions(),
            patterns: default_patterns(),
        }
    }
}

impl Config {
    /// The canonical player page URL for a video identifier.
    pub fn player_url(&self, id: &str) -> String {
        format!("{}{}{}", self.player_origin, self.player_path, id)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load configuration from a TOML file, or fall back to the built-in
    /// defaults when no file is given. Missing fields take their
    /// defaults, so a partial file works.
    pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
        match path {
            None => Ok(Config::default()),
            Some(p) => {
                let data = fs::read_to_string(p)?;
                let cfg: Config = toml::from_str(&data)?;
                tracing::info!("loaded configuration from {}", p.display());
                Ok(cfg)
            }
        }
    }
}
