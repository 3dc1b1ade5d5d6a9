//! Compilation pipeline: parse -> filter -> resolve -> aggregate.
//!
//! Entries are processed strictly in file order and resolved one at a time.
//! Whitelist filtering happens before resolution, so excluded entries cost no
//! lookup and never reach either output array.

use tracing::{debug, info, warn};

use crate::resolver::{self, Resolver};
use crate::rules;
use crate::whitelist::Whitelist;

/// One row of the emitted address array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress {
    /// Canonical 32-bit address value; never zero.
    pub addr: u32,
    /// Human-readable provenance: the original literal, or
    /// `"<domain> (<address>)"` for resolved entries.
    pub label: String,
}

/// Aggregate outcome of a compilation run.
///
/// Accounting invariant: `skipped + whitelisted` plus the number of entries
/// that produced at least one address pair equals the number of surviving
/// (non-comment, non-blank) input lines.
#[derive(Debug, Default)]
pub struct CompileResult {
    /// Address pairs in file order, resolver order within one entry.
    pub addresses: Vec<ResolvedAddress>,
    /// Domain names that yielded addresses, once per input occurrence.
    /// Input-file duplicates are kept as written; only whitelisting removes
    /// entries.
    pub domains: Vec<String>,
    /// Surviving entries that produced zero address pairs.
    pub skipped: usize,
    /// Entries excluded by the whitelist before resolution.
    pub whitelisted: usize,
}

impl CompileResult {
    /// Total address pairs emitted. A domain resolving to three addresses
    /// contributes three.
    pub fn resolved(&self) -> usize {
        self.addresses.len()
    }
}

/// Run the full pipeline over rule file contents.
pub async fn build(
    rule_contents: &str,
    whitelist: &Whitelist,
    resolver: &dyn Resolver,
) -> CompileResult {
    let mut result = CompileResult::default();

    for entry in rules::entries(rule_contents) {
        if whitelist.is_excluded(entry) {
            debug!("Skipping whitelisted entry: {}", entry);
            result.whitelisted += 1;
            continue;
        }

        let is_literal = crate::codec::text_to_addr(entry).is_some_and(|addr| addr != 0);

        match resolver::expand(resolver, entry).await {
            Ok(pairs) => {
                if !is_literal {
                    result.domains.push(entry.to_string());
                }
                result
                    .addresses
                    .extend(pairs.into_iter().map(|(addr, label)| ResolvedAddress {
                        addr,
                        label,
                    }));
            }
            Err(e) => {
                warn!("{}", e);
                result.skipped += 1;
            }
        }
    }

    info!(
        "Resolved {} addresses, skipped {} entries, whitelisted {} entries",
        result.resolved(),
        result.skipped,
        result.whitelisted
    );
    result
}
