use uri_span::encoding::decode_in_place;

#[test]
fn decode_basic() {
    let mut buf = *b"a%20b";
    let len = decode_in_place(&mut buf);
    assert_eq!(len, 3);
    assert_eq!(&buf[..len], b"a b");

    let mut buf = *b"hello";
    let len = decode_in_place(&mut buf);
    assert_eq!(&buf[..len], b"hello");

    let mut buf: [u8; 0] = [];
    assert_eq!(decode_in_place(&mut buf), 0);
}

#[test]
fn decode_case_and_multibyte() {
    let mut buf = *b"%7e%7E";
    let len = decode_in_place(&mut buf);
    assert_eq!(&buf[..len], b"~~");

    let mut buf = *b"%E6%B5%8B%E8%AF%95";
    let len = decode_in_place(&mut buf);
    assert_eq!(&buf[..len], "测试".as_bytes());
}

#[test]
fn decode_malformed_passthrough() {
    // A '%' not followed by two hex digits stays a literal byte.
    let mut buf = *b"%2";
    let len = decode_in_place(&mut buf);
    assert_eq!(&buf[..len], b"%2");

    let mut buf = *b"100%";
    let len = decode_in_place(&mut buf);
    assert_eq!(&buf[..len], b"100%");

    let mut buf = *b"%zz%41";
    let len = decode_in_place(&mut buf);
    assert_eq!(&buf[..len], b"%zzA");

    let mut buf = *b"%%34%32";
    let len = decode_in_place(&mut buf);
    assert_eq!(&buf[..len], b"%42");
}

#[test]
fn decode_parsed_component() {
    let uri = uri_span::Uri::parse("http://example.com/a%20b?x=%E6%B5%8B").unwrap();

    let mut seg = uri.path_segments().last().unwrap().as_bytes().to_vec();
    let len = decode_in_place(&mut seg);
    assert_eq!(&seg[..len], b"a b");

    let mut query = uri.query().unwrap().as_bytes().to_vec();
    let len = decode_in_place(&mut query);
    assert_eq!(&query[..len], "x=测".as_bytes());
}
