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
// - WebDriver fetcher -

use crate::error::LocateError;
use crate::fetchers::{PageFetcher, PageRequest};

use fantoccini::ClientBuilder;
use serde_json::json;
use tokio::runtime;

/// Drives a real browser through a WebDriver endpoint and hands back
/// whatever the rendered page looks like. The whole browser round trip
/// is a one-shot on its own runtime, bounded by the request's time
/// budget, so a hanging page render cannot stall the caller.
pub struct WebDriverFetcher;

impl PageFetcher for WebDriverFetcher {
    fn fetch_page(&self, request: &PageRequest) -> Result<String, LocateError> {
        let local_url = request.url.to_owned();
        let user_agent = request.user_agent.to_owned();
        let webdriver_url = format!("http://localhost:{}", request.webdriver_port);
        let budget = request.timeout;

        let rt = runtime::Builder::new_current_thread()
            .enable_time()
            .enable_io()
            .build()
            .map_err(|e| LocateError::Transport(e.to_string()))?;

        rt.block_on(async move {
            let round_trip = async {
                // The browser carries its own TLS fingerprint; we only
                // pin the user agent so the page sees the same browser
                // string as the other backends.
                let mut caps = serde_json::map::Map::new();
                caps.insert(
                    "goog:chromeOptions".to_string(),
                    json!({ "args": [format!("--user-agent={}", user_agent)] }),
                );

                let c = ClientBuilder::native()
                    .capabilities(caps)
                    .connect(&webdriver_url)
                    .await
                    .map_err(|e| LocateError::Transport(e.to_string()))?;

                c.goto(&local_url)
                    .await
                    .map_err(|e| LocateError::Transport(e.to_string()))?;
                let body = c
                    .source()
                    .await
                    .map_err(|e| LocateError::Transport(e.to_string()))?;
                let _ = c.close_window().await;

                tracing::debug!(bytes = body.len(), "rendered page source captured");
                Ok(body)
            };

            match tokio::time::timeout(budget, round_trip).await {
                Ok(result) => result,
                Err(_) => Err(LocateError::Transport(
                    "the web driver did not answer within the time budget".to_string(),
                )),
            }
        })
    }

    fn display_name(&self) -> String {
        "WebDriver browser".to_string()
    }

    fn web_driver_required(&self) -> bool {
        true
    }
}
