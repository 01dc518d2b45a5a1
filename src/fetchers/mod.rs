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
// - fetchers module -

use crate::config::FetcherKind;
use crate::error::LocateError;

use std::time::Duration;

mod impersonated;
mod plain;
mod webdriver;

pub use impersonated::ImpersonatedFetcher;
pub use plain::PlainHttpFetcher;
pub use webdriver::WebDriverFetcher;

/// Everything a backend needs to know to fetch one player page.
pub struct PageRequest<'a> {
    pub url: &'a str,
    pub user_agent: &'a str,
    /// Sent as both Referer and Origin; the player host checks the former.
    pub referer: &'a str,
    pub timeout: Duration,
    /// Only meaningful for the webdriver backend.
    pub webdriver_port: u16,
}

// Define the public interface for page fetchers:
pub trait PageFetcher {
    // returns the raw body of the player page.
    fn fetch_page(&self, request: &PageRequest) -> Result<String, LocateError>;

    // returns the name of the backend (e.g. "plain HTTP").
    fn display_name(&self) -> String;

    // true, if this backend needs a web driver.
    fn web_driver_required(&self) -> bool {
        false
    }
}

/// Backend selection happens once, from the configuration. There is no
/// registry: the variants are known and closed.
pub fn make_fetcher(kind: FetcherKind) -> Box<dyn PageFetcher> {
    match kind {
        FetcherKind::Plain => Box::new(PlainHttpFetcher),
        FetcherKind::Webdriver => Box::new(WebDriverFetcher),
        FetcherKind::Impersonated => Box::new(ImpersonatedFetcher),
    }
}
