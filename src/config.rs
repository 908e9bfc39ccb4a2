// ABOUTME: Environment-driven server configuration
// ABOUTME: Reads the HTTP bind address and port the way the rest of the stack reads env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGPT

//! Server configuration from environment variables
//!
//! Configuration is environment-only; there is no config file. LLM
//! settings live with the provider (see [`crate::llm::OpenAiProvider`]):
//! `OPENAI_API_KEY`, `FITGPT_LLM_MODEL`, `FITGPT_LLM_BASE_URL`,
//! `FITGPT_LLM_TIMEOUT_SECS`.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default HTTP port, matching the original backend
const DEFAULT_PORT: u16 = 5000;

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: IpAddr,
    /// Listen port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Read server configuration from the environment
    ///
    /// `FITGPT_HTTP_PORT` wins over `PORT`; both default to 5000.
    /// Unparseable values fall back to the default rather than aborting.
    #[must_use]
    pub fn from_env() -> Self {
        let port = env::var("FITGPT_HTTP_PORT")
            .or_else(|_| env::var("PORT"))
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let host = env::var("FITGPT_HTTP_HOST")
            .ok()
            .and_then(|v| v.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        Self { host, port }
    }

    /// Socket address to bind
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port_matches_original_backend() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.socket_addr().port(), 5000);
    }
}
