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
// - plain HTTP fetcher -

use crate::agent::{AgentBase, EmbedlAgent};
use crate::error::LocateError;
use crate::fetchers::{PageFetcher, PageRequest};

use url::Url;

/// The cheapest disguise: a normal blocking request that merely claims
/// to be a desktop browser coming from the referring site.
pub struct PlainHttpFetcher;

impl PageFetcher for PlainHttpFetcher {
    fn fetch_page(&self, request: &PageRequest) -> Result<String, LocateError> {
        let url_p = Url::parse(request.url)
            .map_err(|e| LocateError::Transport(e.to_string()))?;
        let agent = EmbedlAgent::init(&url_p, request.timeout);

        let response = agent
            .get(request.url)
            .set("User-Agent", request.user_agent)
            .set("Referer", request.referer)
            .set("Origin", request.referer)
            .call()
            .map_err(LocateError::from_page_error)?;

        tracing::debug!(status = response.status(), url = %request.url, "player page fetched");

        response
            .into_string()
            .map_err(|e| LocateError::Transport(e.to_string()))
    }

    fn display_name(&self) -> String {
        "plain HTTP".to_string()
    }
}
