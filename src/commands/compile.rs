//! Compile command implementation.

use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::builder;
use crate::emitter;
use crate::error::FatalError;
use crate::resolver::SystemResolver;
use crate::utils::format_count;
use crate::whitelist::Whitelist;

/// Run the compile command: rule file in, source/header artifact out.
///
/// Per-entry resolution failures only affect the counts; the artifact is
/// emitted (possibly with zero-length arrays) on every non-fatal run.
pub async fn run(
    input: &Path,
    output: &Path,
    whitelist_path: Option<&Path>,
    timeout_secs: u64,
) -> Result<()> {
    let rule_contents = std::fs::read_to_string(input)
        .map_err(|e| FatalError::Input(input.to_path_buf(), e))?;

    let whitelist = Whitelist::load(whitelist_path)?;
    if !whitelist.is_empty() {
        info!("Loaded {} whitelist patterns", whitelist.len());
    }

    info!("Processing domains and IPs from {}...", input.display());
    let resolver = SystemResolver::new(Duration::from_secs(timeout_secs));
    let result = builder::build(&rule_contents, &whitelist, &resolver).await;

    emitter::emit(&result, output)?;

    println!(
        "[OK] {} generated: {} addresses resolved, {} skipped, {} whitelisted, {} domains",
        output.display(),
        format_count(result.resolved()),
        result.skipped,
        result.whitelisted,
        format_count(result.domains.len())
    );

    Ok(())
}
