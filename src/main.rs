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
// - main.rs file -

use anyhow::Result;
use clap::Parser;
use regex::Regex;
use std::{env, path::PathBuf, str::FromStr};
use tracing_subscriber::EnvFilter;

mod agent;
mod config;
mod download;
mod error;
mod extract;
mod fetchers;
mod ident;
mod locator;

use config::{Config, FetcherKind};
use error::LocateError;
use locator::Locator;

#[derive(Parser)]
#[clap(version, about = "Resolves referer-gated video embeds and downloads them", long_about = None)]
struct Args {
    #[clap(long, short = 'v', help = "Talks more while the link is processed")]
    verbose: bool,

    #[clap(long = "output", short = 'o', help = "Sets the output file name")]
    outputfile: Option<String>,

    #[clap(
        long = "link-only",
        short = 'l',
        help = "Prints the direct media URL instead of downloading it"
    )]
    linkonly: bool,

    #[clap(long, value_enum, help = "Overrides the page fetcher backend")]
    fetcher: Option<FetcherKind>,

    #[clap(long, help = "The port of your web driver (required for --fetcher webdriver)")]
    webdriver: Option<u16>,

    #[clap(long = "max-size", help = "Overrides the media size cap, in bytes")]
    maxsize: Option<u64>,

    #[clap(long, help = "Reads settings and extraction patterns from a TOML file")]
    config: Option<PathBuf>,

    #[clap(help = "Sets the input link to use", index = 1)]
    url: String,
}

fn main() -> Result<()> {
    // Argument parsing:
    let args = Args::parse();

    // Diagnostics go to stderr via RUST_LOG; the user-facing chatter
    // below stays on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let mut config = Config::load_or_default(args.config.as_deref())?;

    if let Some(fetcher) = args.fetcher {
        config.fetcher = fetcher;
    }
    if let Some(maxsize) = args.maxsize {
        config.max_media_bytes = maxsize;
    }

    // The WebDriver port could be an argument from the command line
    // or, to make life easier, from the environment variables
    // ("EMBEDL_WEBDRIVER_PORT") if not specified there.
    if let Some(port) = args.webdriver {
        config.webdriver_port = port;
    } else if let Ok(port_env) = env::var("EMBEDL_WEBDRIVER_PORT") {
        config.webdriver_port = u16::from_str(&port_env).unwrap_or(config.webdriver_port);
    }

    // Find the link inside whatever the user pasted:
    let input = match scan_for_url(&args.url) {
        Some(url) => url,
        None => {
            println!("embedl could not find an http(s) link in the input. Exiting.");
            return Ok(());
        }
    };

    let fetcher = fetchers::make_fetcher(config.fetcher);
    if fetcher.web_driver_required() && config.webdriver_port == 0 {
        println!("The {} backend requires a web driver installed and running. Please tell embedl which port to use (embedl --webdriver <PORT>) and try again.", fetcher.display_name());
        return Ok(());
    }

    let locator = Locator::new(config.clone(), fetcher)?;
    println!("Fetching via {}.", locator.fetcher_name());

    let result = match locator.locate(&input) {
        Ok(result) => result,
        Err(e) => {
            // Terminal by design. Whatever blocked us would block a
            // retry as well, so report it and stop.
            println!("{}", e);
            return Ok(());
        }
    };

    if args.verbose {
        println!("Direct media URL: {}", result.media_url);
        println!("Referer to send: {}", result.referer_for_media);
        println!("Player page referer was: {}", result.referer_for_page);
    }

    if args.linkonly {
        println!("{}", result.media_url);
        println!("(send \"Referer: {}\" when fetching it)", result.referer_for_media);
        return Ok(());
    }

    let targetfile = match args.outputfile {
        Some(name) => name,
        None => target_filename(&result),
    };

    if args.verbose {
        println!("Starting the download.");
    }

    match download::download(&result, &targetfile, &config) {
        Ok(_) => println!("\"{}\" successfully downloaded.", &targetfile),
        Err(LocateError::MediaTooLarge { url, size }) => {
            println!("The media file is too large to deliver ({} bytes).", size);
            println!("Direct link: {}", url);
            println!("(send \"Referer: {}\" when fetching it)", result.referer_for_media);
        }
        Err(e) => println!("{}", e),
    }

    Ok(())
}

// Extract the first http(s) link from a pasted message.
fn scan_for_url(text: &str) -> Option<String> {
    let re = Regex::new(r"https?://[a-zA-Z0-9\.\-_/\?=&%#]+").unwrap();
    re.find(text).map(|m| m.as_str().to_string())
}

// Derive an output file name from the media URL, with the usual
// filesystem-hostile characters stripped.
fn target_filename(result: &locator::LocateResult) -> String {
    let from_url = result
        .media_url
        .split('?')
        .next()
        .and_then(|path| path.rsplit('/').next())
        .filter(|name| !name.is_empty());

    let name = match from_url {
        Some(name) => name.to_string(),
        None => match &result.content_id {
            Some(id) => format!("{}.mp4", id),
            None => "video.mp4".to_string(),
        },
    };

    name.trim().replace(
        &['|', '\'', '\"', ':', '\'', '\\', '/', '?', '*'][..],
        r#""#,
    )
}
