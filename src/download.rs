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
// - download.rs file -

use crate::agent::{AgentBase, EmbedlAgent};
use crate::config::Config;
use crate::error::LocateError;
use crate::locator::LocateResult;

use indicatif::{ProgressBar, ProgressStyle};
use std::{
    fs,
    io::{self, copy, Read},
    path::Path,
};
use url::Url;

struct DownloadProgress<'a, R> {
    inner: R,
    progress_bar: &'a ProgressBar,
}

impl<R: Read> Read for DownloadProgress<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf).map(|n| {
            self.progress_bar.inc(n as u64);
            n
        })
    }
}

/// true, if a file of <announced> more bytes on top of <already> stays
/// inside the delivery cap.
fn fits_the_cap(already: u64, announced: u64, cap: u64) -> bool {
    already.saturating_add(announced) <= cap
}

/// Fetch the located media into <filename>, streaming, never holding
/// the body in memory. Media over the cap is refused before (or, for
/// servers that lie about Content-Length, during) the transfer, so the
/// caller can hand out the direct link instead. An existing partial
/// file is continued via a Range request.
pub fn download(
    result: &LocateResult,
    filename: &str,
    config: &Config,
) -> Result<u64, LocateError> {
    let url = Url::parse(&result.media_url)
        .map_err(|e| LocateError::Transport(e.to_string()))?;
    let agent = EmbedlAgent::init(&url, config.timeout());

    let file = Path::new(filename);
    let already = if file.exists() { file.metadata()?.len() } else { 0 };

    let mut request = agent
        .get(url.as_str())
        .set("User-Agent", &config.user_agent)
        .set("Referer", &result.referer_for_media);

    if already > 0 {
        // Continue the file:
        request = request.set("Range", &format!("bytes={}-", already));
    }

    let resp = request.call().map_err(LocateError::from_media_error)?;

    // Find the media size:
    let announced = resp
        .header("Content-Length")
        .unwrap_or("0")
        .parse::<u64>()
        .unwrap_or(0);

    if !fits_the_cap(already, announced, config.max_media_bytes) {
        return Err(LocateError::MediaTooLarge {
            url: result.media_url.clone(),
            size: already + announced,
        });
    }

    tracing::debug!(bytes = announced, resumed_at = already, "downloading media");

    // Display a progress bar:
    let pb = ProgressBar::new(already + announced);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.green/blue}] {percent}%",
        )
        .unwrap()
        .progress_chars("#>-"),
    );
    pb.inc(already);

    // Never read past the cap, even when the announced size was wrong.
    let budget = config.max_media_bytes - already;
    let mut source = DownloadProgress {
        progress_bar: &pb,
        inner: resp.into_reader().take(budget + 1),
    };

    let mut dest = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)?;

    let copied = copy(&mut source, &mut dest)?;

    pb.finish_and_clear();

    if copied > budget {
        // The stream outgrew the cap mid-transfer. The partial file is
        // useless to us; the user gets the direct link instead.
        drop(dest);
        let _ = fs::remove_file(file);
        return Err(LocateError::MediaTooLarge {
            url: result.media_url.clone(),
            size: already + copied,
        });
    }

    Ok(already + copied)
}
