//! Dotted-quad address codec.
//!
//! The whole toolchain agrees on a single binary representation for an IPv4
//! address: the 32-bit unsigned value obtained by packing the four octets and
//! reading them as a big-endian integer. The generated artifact stores these
//! values in host byte order; the packet-filter engine performs the
//! network-order conversion when it loads them. Centralizing the conversion
//! here keeps that contract in one place.

use std::net::Ipv4Addr;

/// Parse a dotted-quad textual address into its canonical 32-bit value.
///
/// Returns `None` for anything that is not a well-formed dotted quad; callers
/// treat such text as a candidate domain name, not as an error.
pub fn text_to_addr(text: &str) -> Option<u32> {
    text.parse::<Ipv4Addr>().ok().map(u32::from)
}

/// Render a canonical 32-bit address value back to dotted-quad text.
pub fn addr_to_text(addr: u32) -> String {
    Ipv4Addr::from(addr).to_string()
}
