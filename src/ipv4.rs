//! IPv4 dotted-quad recognizer.
//!
//! The grammar engine delimits a host range first and only then asks this
//! module whether the range spells an IPv4 address. Rejection is not an
//! error: a host that is not a dotted quad is a registered name.

use core::net::Ipv4Addr;

/// Recognizes an exact `dec-octet "." dec-octet "." dec-octet "." dec-octet`.
///
/// Octets are strict per RFC 3986: 1-3 digits, value at most 255 and no
/// leading zero unless the octet is exactly `0`. Anything else, including
/// trailing bytes, yields `None`.
pub(crate) fn parse(bytes: &[u8]) -> Option<Ipv4Addr> {
    let mut octets = [0; 4];
    let mut rest = bytes;
    for (i, octet) in octets.iter_mut().enumerate() {
        if i > 0 {
            rest = rest.strip_prefix(b".")?;
        }
        (*octet, rest) = read_octet(rest)?;
    }
    rest.is_empty().then(|| octets.into())
}

fn read_octet(bytes: &[u8]) -> Option<(u8, &[u8])> {
    let first = digit(*bytes.first()?)?;
    if first == 0 {
        // "0" is the only octet that may start with a zero.
        return Some((0, &bytes[1..]));
    }

    let mut value = u32::from(first);
    let mut i = 1;
    while i < 3 {
        match bytes.get(i).copied().and_then(digit) {
            Some(x) => value = value * 10 + u32::from(x),
            None => break,
        }
        i += 1;
    }
    u8::try_from(value).ok().map(|value| (value, &bytes[i..]))
}

fn digit(x: u8) -> Option<u8> {
    x.is_ascii_digit().then(|| x - b'0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_quads() {
        assert_eq!(parse(b"0.0.0.0"), Some(Ipv4Addr::new(0, 0, 0, 0)));
        assert_eq!(parse(b"192.0.2.16"), Some(Ipv4Addr::new(192, 0, 2, 16)));
        assert_eq!(parse(b"255.255.255.255"), Some(Ipv4Addr::BROADCAST));
    }

    #[test]
    fn not_quads() {
        assert_eq!(parse(b""), None);
        assert_eq!(parse(b"1.2.3"), None);
        assert_eq!(parse(b"1.2.3.4.5"), None);
        assert_eq!(parse(b"256.0.0.1"), None);
        assert_eq!(parse(b"1.2.3.4a"), None);
        assert_eq!(parse(b"127.1"), None);
        // Leading zeros make a registered name, not an address.
        assert_eq!(parse(b"127.0.0.001"), None);
        assert_eq!(parse(b"127.00.00.1"), None);
    }
}
