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
// - error.rs file -

use thiserror::Error;

/// Every way a single resolve-and-download attempt can end short of
/// success. All of these are terminal: the defenses on the other side
/// are presumed to be deliberately blocking, so a retry would only look
/// like abuse. The message text is what the user gets to see.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("no video identifier found in \"{0}\"")]
    NoIdentifier(String),

    #[error("the player page refused us (HTTP {0})")]
    PageBlocked(u16),

    #[error("no media URL found in the player page")]
    MediaUrlNotFound,

    #[error("the media server refused us (HTTP {0})")]
    MediaBlocked(u16),

    #[error("the media file is too large ({size} bytes): {url}")]
    MediaTooLarge { url: String, size: u64 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl LocateError {
    /// Classify a ureq error from the player page fetch:
    /// non-2xx becomes PageBlocked, everything else is transport.
    pub fn from_page_error(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => LocateError::PageBlocked(code),
            ureq::Error::Transport(t) => LocateError::Transport(t.to_string()),
        }
    }

    /// Same classification for the media fetch itself.
    pub fn from_media_error(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => LocateError::MediaBlocked(code),
            ureq::Error::Transport(t) => LocateError::Transport(t.to_string()),
        }
    }
}
