//! DHCP lease table parsing
//!
//! The lease file holds one lease per line with five space-separated fields:
//! ```text
//! 1700000000 00:11:22:33:44:55 192.168.1.100 laptop 01:00:11:22:33:44:55
//! ```
//! expiry, MAC address, IP address, hostname and client id.

use crate::error::{Error, Result};
use status_fs::NormalizedPath;
use status_model::DhcpLease;

/// Number of positional fields in a lease line.
const LEASE_FIELDS: usize = 5;

/// Parse one lease line.
///
/// Runs of spaces separate fields. Lines with fewer than five fields yield
/// `None`; fields beyond the fifth are ignored.
///
/// # Example
/// ```
/// use status_core::collect::leases::parse_lease_line;
///
/// let lease = parse_lease_line("1700000000 aa:bb:cc:dd:ee:ff 10.0.0.2 laptop 01:aa").unwrap();
/// assert_eq!(lease.ip.as_deref(), Some("10.0.0.2"));
/// assert!(parse_lease_line("1700000000 aa:bb:cc:dd:ee:ff").is_none());
/// ```
pub fn parse_lease_line(line: &str) -> Option<DhcpLease> {
    let mut fields = line.split(' ').filter(|f| !f.is_empty());
    let expiry = fields.next()?;
    let mac = fields.next()?;
    let ip = fields.next()?;
    let hostname = fields.next()?;
    let id = fields.next()?;
    Some(DhcpLease::new(expiry, mac, ip, hostname, id))
}

/// Parse lease file content, skipping malformed lines with a warning.
///
/// Records keep file order.
pub fn parse_leases(text: &str) -> Vec<DhcpLease> {
    let mut leases = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_lease_line(line) {
            Some(lease) => leases.push(lease),
            None => tracing::warn!(
                line = index + 1,
                expected_fields = LEASE_FIELDS,
                "Skipping malformed lease line"
            ),
        }
    }
    leases
}

/// Read and parse the lease file at `path`.
///
/// An absent file is [`Error::LeaseFileNotFound`]; a file without any lease
/// lines is [`Error::LeaseFileEmpty`].
pub fn read_lease_file(path: &NormalizedPath) -> Result<Vec<DhcpLease>> {
    let text = status_fs::io::read_text_if_exists(path)?.ok_or_else(|| Error::LeaseFileNotFound {
        path: path.to_string(),
    })?;

    if text.lines().all(|line| line.trim().is_empty()) {
        return Err(Error::LeaseFileEmpty {
            path: path.to_string(),
        });
    }

    let leases = parse_leases(&text);
    tracing::debug!(path = %path, count = leases.len(), "Read DHCP leases");
    Ok(leases)
}
