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
// - locator.rs file -

use crate::config::Config;
use crate::error::LocateError;
use crate::extract::Extractor;
use crate::fetchers::{PageFetcher, PageRequest};
use crate::ident::{self, Identified};

use anyhow::Result;

/// The outcome of one successful locate: a playable direct media URL
/// plus the header set required to fetch it. Lives for one request,
/// then gets thrown away.
#[derive(Debug, Clone)]
pub struct LocateResult {
    /// The extracted identifier, when the input went through the player
    /// page. Absent for links that already were media files.
    pub content_id: Option<String>,
    pub media_url: String,
    /// Must accompany `media_url`: the player page URL that revealed it.
    /// The media host checks this Referer and rejects anything else.
    pub referer_for_media: String,
    /// The Referer we sent to the player page itself.
    pub referer_for_page: String,
}

/// Turns an arbitrary input link into a `LocateResult`, in one pass,
/// with no state kept between calls. Feeding it the same input against
/// an unchanged remote page yields the same media URL - unless the host
/// mints single-use tokens, which is the host's nondeterminism, not ours.
pub struct Locator {
    config: Config,
    extractor: Extractor,
    fetcher: Box<dyn PageFetcher>,
}

impl Locator {
    pub fn new(config: Config, fetcher: Box<dyn PageFetcher>) -> Result<Self> {
        let extractor = Extractor::from_patterns(&config.patterns)?;
        Ok(Locator {
            config,
            extractor,
            fetcher,
        })
    }

    pub fn fetcher_name(&self) -> String {
        self.fetcher.display_name()
    }

    /// The single-pass pipeline: identifier, player page, media URL.
    /// Every failure is terminal; nothing here retries.
    pub fn locate(&self, input: &str) -> Result<LocateResult, LocateError> {
        let identified = ident::identify(input, &self.config)?;

        let id = match identified {
            Identified::Media(url) => {
                // Nothing to resolve. The media host still wants a
                // Referer; sending the file's own URL works there.
                return Ok(LocateResult {
                    content_id: None,
                    media_url: url.clone(),
                    referer_for_media: url,
                    referer_for_page: self.config.referring_site.clone(),
                });
            }
            Identified::Id(id) => id,
        };

        let player_url = self.config.player_url(&id);
        tracing::info!(id = %id, player = %player_url, backend = %self.fetcher.display_name(), "resolving");

        let body = self.fetcher.fetch_page(&PageRequest {
            url: &player_url,
            user_agent: &self.config.user_agent,
            referer: &self.config.referring_site,
            timeout: self.config.timeout(),
            webdriver_port: self.config.webdriver_port,
        })?;

        let media_url = self
            .extractor
            .extract(&body)
            .ok_or(LocateError::MediaUrlNotFound)?;

        tracing::info!(media = %media_url, "media URL located");

        Ok(LocateResult {
            content_id: Some(id),
            media_url,
            referer_for_media: player_url,
            referer_for_page: self.config.referring_site.clone(),
        })
    }
}
