//! Name resolution for blocklist entries.
//!
//! An entry that parses as a dotted quad passes through unchanged; anything
//! else is treated as a domain name and forward-resolved to the full set of
//! its IPv4 addresses. Resolution failures are per-entry and recoverable —
//! the builder counts them as skipped and carries on.
//!
//! The system resolver wraps the blocking OS lookup in a worker thread with a
//! timeout so a dead upstream resolver cannot hang the whole run.

use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use thiserror::Error;

use crate::codec;

/// Default resolution timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Per-entry resolution failure. Never fatal to the run.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("could not resolve '{0}': {1}")]
    Lookup(String, std::io::Error),

    #[error("resolution of '{0}' timed out after {1:?}")]
    Timeout(String, Duration),

    #[error("'{0}' resolved to no usable addresses")]
    NoAddresses(String),
}

/// Forward name resolution, injectable so tests never touch the network.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve a host name to all of its IPv4 addresses.
    async fn lookup(&self, host: &str) -> Result<Vec<Ipv4Addr>, ResolveError>;
}

/// Resolver backed by the operating system's lookup facility.
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

#[async_trait]
impl Resolver for SystemResolver {
    async fn lookup(&self, host: &str) -> Result<Vec<Ipv4Addr>, ResolveError> {
        let name = host.to_string();
        let lookup = tokio::task::spawn_blocking(move || dns_lookup::lookup_host(&name));

        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(Ok(addrs))) => Ok(addrs
                .into_iter()
                .filter_map(|addr| match addr {
                    IpAddr::V4(v4) => Some(v4),
                    IpAddr::V6(_) => None,
                })
                .collect()),
            Ok(Ok(Err(e))) => Err(ResolveError::Lookup(host.to_string(), e)),
            Ok(Err(e)) => Err(ResolveError::Lookup(
                host.to_string(),
                std::io::Error::other(e),
            )),
            Err(_) => Err(ResolveError::Timeout(host.to_string(), self.timeout)),
        }
    }
}

/// Expand one surviving entry into its (address, label) pairs.
///
/// Literal addresses yield exactly one pair labelled with the original text.
/// Domains yield one pair per resolved address, labelled
/// `"<domain> (<address>)"`. Zero-valued addresses are never emitted; a
/// domain whose usable address set comes back empty is a
/// [`ResolveError::NoAddresses`].
pub async fn expand(
    resolver: &dyn Resolver,
    entry: &str,
) -> Result<Vec<(u32, String)>, ResolveError> {
    if let Some(addr) = codec::text_to_addr(entry) {
        if addr != 0 {
            return Ok(vec![(addr, entry.to_string())]);
        }
        // 0.0.0.0 cannot be a blockable address; fall through to resolution,
        // which will fail it like any other unresolvable name.
    }

    let addrs = resolver.lookup(entry).await?;
    let pairs: Vec<(u32, String)> = addrs
        .into_iter()
        .map(u32::from)
        .filter(|&addr| addr != 0)
        .map(|addr| (addr, format!("{} ({})", entry, codec::addr_to_text(addr))))
        .collect();

    if pairs.is_empty() {
        return Err(ResolveError::NoAddresses(entry.to_string()));
    }
    Ok(pairs)
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;

    /// Table-driven resolver for tests: answers from a fixed map, fails
    /// everything else with a lookup error.
    pub struct StaticResolver {
        answers: HashMap<String, Vec<Ipv4Addr>>,
    }

    impl StaticResolver {
        pub fn new() -> Self {
            Self {
                answers: HashMap::new(),
            }
        }

        pub fn with(mut self, host: &str, addrs: &[&str]) -> Self {
            self.answers.insert(
                host.to_string(),
                addrs.iter().map(|a| a.parse().unwrap()).collect(),
            );
            self
        }
    }

    #[async_trait]
    impl Resolver for StaticResolver {
        async fn lookup(&self, host: &str) -> Result<Vec<Ipv4Addr>, ResolveError> {
            match self.answers.get(host) {
                Some(addrs) => Ok(addrs.clone()),
                None => Err(ResolveError::Lookup(
                    host.to_string(),
                    std::io::Error::new(std::io::ErrorKind::NotFound, "name does not exist"),
                )),
            }
        }
    }
}
