use std::net::{IpAddr, ToSocketAddrs};

use super::{Handle, Resolved, Slot, Value};
use crate::error::ValueError;

// Well-known TCP services accepted in place of a numeric port.
const SERVICES: &[(&str, u16)] = &[
    ("ftp", 21),
    ("ssh", 22),
    ("telnet", 23),
    ("smtp", 25),
    ("domain", 53),
    ("http", 80),
    ("pop3", 110),
    ("imap", 143),
    ("ldap", 389),
    ("https", 443),
    ("submission", 587),
    ("imaps", 993),
    ("pop3s", 995),
    ("postgresql", 5432),
];

/// Check that `addr` is a usable `host:port` TCP address.
///
/// The host may be empty (all interfaces), an IP literal (IPv6 in
/// brackets), or a name the system resolver knows. The port may be numeric,
/// empty, or a well-known service name.
pub fn validate_tcp_address(addr: &str) -> Result<(), ValueError> {
    if addr.is_empty() {
        return Err(ValueError::Empty);
    }
    let invalid = |reason: String| ValueError::Address {
        raw: addr.to_string(),
        reason,
    };

    let (host, port) = split_host_port(addr).map_err(|reason| invalid(reason.to_string()))?;
    let port = lookup_port(port).map_err(invalid)?;

    if host.is_empty() || host.parse::<IpAddr>().is_ok() {
        return Ok(());
    }

    let mut addrs = (host, port)
        .to_socket_addrs()
        .map_err(|e| invalid(format!("lookup {host}: {e}")))?;
    match addrs.next() {
        Some(_) => Ok(()),
        None => Err(invalid(format!("no addresses for {host}"))),
    }
}

fn split_host_port(addr: &str) -> Result<(&str, &str), &'static str> {
    if let Some(bracketed) = addr.strip_prefix('[') {
        let (host, rest) = bracketed
            .split_once(']')
            .ok_or("missing ']' in address")?;
        let port = rest.strip_prefix(':').ok_or("missing port in address")?;
        return Ok((host, port));
    }

    let (host, port) = addr.rsplit_once(':').ok_or("missing port in address")?;
    if host.contains(':') {
        return Err("too many colons in address");
    }
    if host.contains(['[', ']']) || port.contains(['[', ']']) {
        return Err("unexpected bracket in address");
    }
    Ok((host, port))
}

fn lookup_port(port: &str) -> Result<u16, String> {
    if port.is_empty() {
        return Ok(0);
    }
    if port.bytes().all(|b| b.is_ascii_digit()) {
        return port.parse().map_err(|_| format!("invalid port {port:?}"));
    }
    SERVICES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(port))
        .map(|(_, number)| *number)
        .ok_or_else(|| format!("unknown port {port:?}"))
}

/// A `host:port` string, validated on every set and once more after each
/// resolution pass so an unusable default is reported too.
pub struct TcpAddrValue {
    slot: Slot<String>,
}

impl TcpAddrValue {
    pub fn new(default: impl Into<String>) -> (Self, Handle<String>) {
        let handle: Handle<String> = Handle::new(default.into());
        (Self { slot: handle.slot() }, handle)
    }
}

impl Value for TcpAddrValue {
    fn set(&self, raw: &str) -> Result<(), ValueError> {
        validate_tcp_address(raw)?;
        self.slot.store(raw.to_string());
        Ok(())
    }

    fn get(&self) -> Option<Resolved> {
        self.slot.map(|v| Resolved::String(v.clone()))
    }

    fn validate(&self) -> Result<(), ValueError> {
        match self.slot.map(|addr| validate_tcp_address(addr)) {
            Some(result) => result,
            None => Ok(()),
        }
    }

    fn is_empty(&self) -> bool {
        self.slot.map(String::is_empty).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_literal_and_wildcard_hosts() {
        for addr in [":4000", "127.0.0.1:8080", "0.0.0.0:0", "[::1]:443", "[::]:80", ":http", "[fe80::1]:ssh"] {
            assert_eq!(validate_tcp_address(addr), Ok(()), "{addr}");
        }
    }

    #[test]
    fn resolves_localhost() {
        assert_eq!(validate_tcp_address("localhost:8080"), Ok(()));
        assert_eq!(validate_tcp_address("localhost:"), Ok(()));
    }

    #[test]
    fn empty_is_its_own_error() {
        assert_eq!(validate_tcp_address(""), Err(ValueError::Empty));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for addr in ["not-an-addr", "127.0.0.1", "::1:80", "[::1]80", "[::1", ":99999", ":nosuchservice", "a]:80"] {
            assert!(
                matches!(validate_tcp_address(addr), Err(ValueError::Address { .. })),
                "{addr}"
            );
        }
    }

    #[test]
    fn adapter_validates_on_set_and_after_pass() {
        let (value, handle) = TcpAddrValue::new(":8000");
        assert_eq!(value.validate(), Ok(()));

        assert!(value.set("not-an-addr").is_err());
        assert_eq!(handle.get(), ":8000");

        value.set(":4000").unwrap();
        assert_eq!(value.get(), Some(Resolved::String(":4000".into())));

        let (empty, _handle) = TcpAddrValue::new("");
        assert_eq!(empty.validate(), Err(ValueError::Empty));
    }
}
