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
// - agent.rs file -

use std::time::Duration;
use ureq::Agent;
use url::Url;

pub trait AgentBase {
    fn init(url: &Url, timeout: Duration) -> Agent;
}

pub struct EmbedlAgent;
impl AgentBase for EmbedlAgent {
    // Default HTTP agent for embedl. Sets a proxy or not, and puts the
    // whole-request time budget on every call it makes.
    fn init(url: &Url, timeout: Duration) -> Agent {
        let mut builder = ureq::AgentBuilder::new().timeout(timeout);

        if let Some(env_proxy) = env_proxy::for_url(url).host_port() {
            // Use a proxy:
            let proxy = ureq::Proxy::new(format!("{}:{}", env_proxy.0, env_proxy.1));
            builder = builder.proxy(proxy.unwrap());
        }

        builder.build()
    }
}
