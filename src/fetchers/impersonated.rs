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
// - impersonated HTTP fetcher -

use crate::error::LocateError;
use crate::fetchers::{PageFetcher, PageRequest};

use rquest_util::{Emulation, EmulationOS, EmulationOption};
use tokio::runtime;

/// Speaks TLS and HTTP/2 the way a desktop Chrome does, for hosts that
/// fingerprint the handshake instead of (or on top of) the headers.
pub struct ImpersonatedFetcher;

impl PageFetcher for ImpersonatedFetcher {
    fn fetch_page(&self, request: &PageRequest) -> Result<String, LocateError> {
        let local_url = request.url.to_owned();
        let user_agent = request.user_agent.to_owned();
        let referer = request.referer.to_owned();
        let budget = request.timeout;

        let rt = runtime::Builder::new_current_thread()
            .enable_time()
            .enable_io()
            .build()
            .map_err(|e| LocateError::Transport(e.to_string()))?;

        rt.block_on(async move {
            let emulation = EmulationOption::builder()
                .emulation(Emulation::Chrome136)
                .emulation_os(EmulationOS::Windows)
                .build();

            let client = rquest::Client::builder()
                .emulation(emulation)
                .timeout(budget)
                .build()
                .map_err(|e| LocateError::Transport(e.to_string()))?;

            let response = client
                .get(&local_url)
                .header("User-Agent", &user_agent)
                .header("Referer", &referer)
                .header("Origin", &referer)
                .send()
                .await
                .map_err(|e| LocateError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(LocateError::PageBlocked(status.as_u16()));
            }

            tracing::debug!(status = status.as_u16(), url = %local_url, "player page fetched");

            response
                .text()
                .await
                .map_err(|e| LocateError::Transport(e.to_string()))
        })
    }

    fn display_name(&self) -> String {
        "impersonated HTTP".to_string()
    }
}
