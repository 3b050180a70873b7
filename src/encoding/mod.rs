//! Utilities for percent-encoded octets.
//!
//! The parser only *validates* `%HH` triplets; it never decodes them.
//! Decoding is a separate, explicit operation performed after a successful
//! parse, on a buffer the caller owns.

pub mod table;

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xff; 256];
    let shift = (hi as u8) * 4;

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

static OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
pub(crate) static OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

/// Decodes a percent-encoded octet.
fn decode_octet(mut hi: u8, mut lo: u8) -> Option<u8> {
    hi = OCTET_TABLE_HI[hi as usize];
    lo = OCTET_TABLE_LO[lo as usize];
    if hi & 0x0f == 0 && lo & 0xf0 == 0 {
        Some(hi | lo)
    } else {
        None
    }
}

/// Decodes percent-encoded octets in place and returns the decoded length.
///
/// The buffer is scanned once, left to right, with the write position
/// trailing the read position so the decoded bytes compact in place.
/// Each well-formed `%HH` triplet is replaced by the single byte it
/// encodes; every other byte passes through unchanged. A `%` that is not
/// followed by two hexadecimal digits is treated as a literal byte —
/// the parser guarantees this never happens for buffers it accepted,
/// so the lenience only matters for arbitrary caller input.
///
/// The bytes at `buf[len..]` are left unspecified, where `len` is the
/// returned length.
///
/// # Examples
///
/// ```
/// use uri_span::encoding::decode_in_place;
///
/// let mut buf = *b"a%20b";
/// let len = decode_in_place(&mut buf);
/// assert_eq!(len, 3);
/// assert_eq!(&buf[..len], b"a b");
/// ```
pub fn decode_in_place(buf: &mut [u8]) -> usize {
    let mut read = 0;
    let mut write = 0;
    while read < buf.len() {
        let x = buf[read];
        if x == b'%' && read + 2 < buf.len() {
            if let Some(octet) = decode_octet(buf[read + 1], buf[read + 2]) {
                buf[write] = octet;
                read += 3;
                write += 1;
                continue;
            }
        }
        buf[write] = x;
        read += 1;
        write += 1;
    }
    write
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octets() {
        assert_eq!(decode_octet(b'2', b'0'), Some(b' '));
        assert_eq!(decode_octet(b'f', b'F'), Some(0xff));
        assert_eq!(decode_octet(b'2', b'x'), None);
        assert_eq!(decode_octet(b'%', b'0'), None);
    }

    #[test]
    fn dec_in_place() {
        let mut buf = *b"%E6%B5%8B%E8%AF%95";
        let len = decode_in_place(&mut buf);
        assert_eq!(&buf[..len], "测试".as_bytes());

        // Malformed sequences pass through untouched.
        let mut buf = *b"100%zz%1";
        let len = decode_in_place(&mut buf);
        assert_eq!(&buf[..len], b"100%zz%1");
    }
}
