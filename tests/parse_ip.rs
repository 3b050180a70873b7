use core::net::Ipv6Addr;
use uri_span::{component::Host, Uri};

fn v6(s: &str) -> Ipv6Addr {
    let input = format!("//[{s}]");
    let u = Uri::parse(&input[..]).unwrap();
    match u.authority().unwrap().host_parsed() {
        Host::Ipv6(addr) => addr,
        host => panic!("{s} parsed as {host:?}"),
    }
}

fn v6_err_index(s: &str) -> usize {
    let input = format!("//[{s}]");
    // Subtract the "//[" prefix so indexes refer to the literal itself.
    Uri::parse(&input[..]).unwrap_err().index() - 3
}

#[test]
fn parse_v6() {
    assert_eq!(v6("::"), Ipv6Addr::UNSPECIFIED);
    assert_eq!(v6("::1"), Ipv6Addr::LOCALHOST);
    assert_eq!(v6("1::"), Ipv6Addr::new(1, 0, 0, 0, 0, 0, 0, 0));
    assert_eq!(
        v6("1:2:3:4:5:6:7:8"),
        Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 8)
    );
    assert_eq!(
        v6("2001:db8::8:800:200c:417a"),
        Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0x8, 0x800, 0x200c, 0x417a)
    );
    assert_eq!(
        v6("A:B:C:D:E:F:1:2"),
        Ipv6Addr::new(0xa, 0xb, 0xc, 0xd, 0xe, 0xf, 1, 2)
    );
    assert_eq!(v6("fe80::1"), Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1));
    assert_eq!(v6("1:2::7:8"), Ipv6Addr::new(1, 2, 0, 0, 0, 0, 7, 8));
    assert_eq!(v6("::8:7:6:5:4:3:2"), Ipv6Addr::new(0, 8, 7, 6, 5, 4, 3, 2));

    // A "::" eliding zero groups is tolerated on either side.
    assert_eq!(
        v6("1:2:3:4:5:6:7::"),
        Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 0)
    );
    assert_eq!(
        v6("::1:2:3:4:5:6:7:8"),
        Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 8)
    );
}

#[test]
fn parse_v6_embedded_v4() {
    let addr = v6("::ffff:192.0.2.1");
    let octets = addr.octets();
    assert_eq!(&octets[..10], &[0; 10]);
    assert_eq!(&octets[10..12], &[0xff, 0xff]);
    assert_eq!(&octets[12..], &[192, 0, 2, 1]);

    assert_eq!(
        v6("1:2:3:4:5:6:77.77.88.88").octets(),
        [0, 1, 0, 2, 0, 3, 0, 4, 0, 5, 0, 6, 77, 77, 88, 88]
    );
    assert_eq!(
        v6("::255.255.255.255").octets(),
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 255, 255, 255, 255]
    );
    assert_eq!(
        v6("1::8:192.0.2.1").octets(),
        [0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 8, 192, 0, 2, 1]
    );
}

#[test]
fn parse_v6_errors() {
    // A ninth group is reported at its first digit.
    assert_eq!(v6_err_index("1:2:3:4:5:6:7:8:9"), 16);
    // A second "::" is reported at its first colon.
    assert_eq!(v6_err_index("1::2::3"), 4);
    assert_eq!(v6_err_index("::2::3"), 3);
    // Triple colons are reported at the third.
    assert_eq!(v6_err_index(":::"), 2);
    assert_eq!(v6_err_index("1:::2"), 3);
    // A lone leading colon.
    assert_eq!(v6_err_index(":1"), 0);
    // A lone trailing colon, reported at the closing bracket.
    assert_eq!(v6_err_index("1:2:3:4:5:6:7:"), 14);
    // Too short, reported at the closing bracket.
    assert_eq!(v6_err_index("1:2"), 3);
    // Empty brackets.
    assert_eq!(v6_err_index(""), 0);
    // A fifth digit in a group.
    assert_eq!(v6_err_index("12345::"), 4);
    // A bare IPv4 address is not an IP literal.
    assert_eq!(v6_err_index("1.2.3.4"), 1);

    // Embedded IPv4 errors sit on the offending digit: the leading
    // zero, or the earliest digit that makes the octet overflow.
    assert_eq!(v6_err_index("::01.2.3.4"), 2);
    assert_eq!(v6_err_index("::1.2.3.300"), 8);
    assert_eq!(v6_err_index("::256.1.1.1"), 4);
    assert_eq!(v6_err_index("::1.2.3.266"), 9);
    // A fourth digit in a dotted octet sits on the digit itself,
    // whether the octet opens or closes the address.
    assert_eq!(v6_err_index("::1234.5.6.7"), 5);
    assert_eq!(v6_err_index("::1.2.3.1234"), 11);
    // Too few dotted octets, reported at the closing bracket.
    assert_eq!(v6_err_index("::ffff:1.2.3"), 12);
    // Hex digits cannot open a dotted octet.
    assert_eq!(v6_err_index("::ff.1.2.3"), 4);
    // Stray bytes inside the literal.
    assert_eq!(v6_err_index("::%31"), 2);
    assert_eq!(v6_err_index("1:2:g::"), 4);
}

#[test]
fn parse_ipv_future() {
    let u = Uri::parse("//[v7.addr]:80/").unwrap();
    let a = u.authority().unwrap();
    assert_eq!(a.host(), "[v7.addr]");
    assert_eq!(a.host_parsed(), Host::IpvFuture("v7.addr"));
    assert_eq!(a.port(), Some("80"));

    let u = Uri::parse("//[VF.~:!]").unwrap();
    assert_eq!(u.authority().unwrap().host_parsed(), Host::IpvFuture("VF.~:!"));

    // Missing version digits, dot, and address part in turn.
    assert_eq!(Uri::parse("//[v]").unwrap_err().index(), 4);
    assert_eq!(Uri::parse("//[v7]").unwrap_err().index(), 5);
    assert_eq!(Uri::parse("//[v7.]").unwrap_err().index(), 6);
}
