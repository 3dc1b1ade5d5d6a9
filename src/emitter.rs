//! Artifact emission.
//!
//! Serializes a [`CompileResult`] into the source/header pair consumed by the
//! packet-filter engine's native build. The data file defines the address
//! array (host byte order; the engine converts to network order at load time)
//! and the domain-name array; the header declares both `extern` and defines
//! the size constants the native build compiles against. The declared counts
//! must equal the emitted element counts exactly.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use crate::builder::CompileResult;
use crate::error::FatalError;

/// Write the data file at `output` and the header next to it with its
/// extension replaced by `h`. Creates the parent directory if absent.
pub fn emit(result: &CompileResult, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| FatalError::Output(parent.to_path_buf(), e))?;
        }
    }

    let header_path = output.with_extension("h");

    std::fs::write(output, render_data(result))
        .with_context(|| format!("Failed to write data file {}", output.display()))?;
    std::fs::write(&header_path, render_header(result))
        .with_context(|| format!("Failed to write header file {}", header_path.display()))?;

    info!(
        "Generated {} with {} addresses and {} domains",
        output.display(),
        result.resolved(),
        result.domains.len()
    );
    Ok(())
}

fn render_data(result: &CompileResult) -> String {
    let mut out = String::new();
    out.push_str("#include <linux/types.h>\n\n");
    out.push_str("// Pre-resolved IP addresses (host byte order)\n");
    out.push_str("__u32 blacklisted_ips[] = {\n");
    for entry in &result.addresses {
        let _ = writeln!(out, "    {},  // {}", entry.addr, entry.label);
    }
    out.push_str("};\n\n");
    out.push_str("// Domain names for dynamic resolution\n");
    out.push_str("const char* blacklisted_domains[] = {\n");
    for domain in &result.domains {
        let _ = writeln!(out, "    \"{}\",", domain);
    }
    out.push_str("};\n");
    out
}

fn render_header(result: &CompileResult) -> String {
    let mut out = String::new();
    out.push_str("#ifndef IP_BLACKLIST_H\n");
    out.push_str("#define IP_BLACKLIST_H\n\n");
    out.push_str("#include <linux/types.h>\n\n");
    out.push_str("// Pre-resolved IP addresses (host byte order)\n");
    out.push_str("extern __u32 blacklisted_ips[];\n\n");
    out.push_str("// Number of IP addresses in the blacklist\n");
    let _ = writeln!(out, "#define BLACKLIST_SIZE {}\n", result.resolved());
    out.push_str("// Domain names for dynamic resolution\n");
    out.push_str("extern const char* blacklisted_domains[];\n");
    let _ = writeln!(out, "#define DOMAIN_LIST_SIZE {}\n", result.domains.len());
    out.push_str("#endif // IP_BLACKLIST_H\n");
    out
}
