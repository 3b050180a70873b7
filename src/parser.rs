use crate::{
    encoding::{table::*, OCTET_TABLE_LO},
    internal::{AuthMeta, HostMeta, Meta},
    ipv4,
};
use core::{
    num::NonZeroUsize,
    ops::{Deref, DerefMut},
};

type Result<T> = core::result::Result<T, crate::error::ParseError>;

/// Returns immediately with an error at the given index.
macro_rules! err {
    ($index:expr) => {
        return Err(crate::error::ParseError {
            index: $index,
            input: (),
        })
    };
}

pub(crate) fn parse(bytes: &[u8]) -> Result<Meta> {
    let mut parser = Parser {
        reader: Reader::new(bytes),
        out: Meta::default(),
    };
    parser.parse_from_scheme()?;
    Ok(parser.out)
}

/// URI-reference parser.
///
/// # Invariants
///
/// `pos <= len` and `pos` is non-decreasing.
///
/// # Preconditions and guarantees
///
/// Before parsing, ensure that `pos == 0` and `out` is default initialized.
///
/// Start and finish parsing by calling `parse_from_scheme`.
/// The following are guaranteed when parsing succeeds:
///
/// - All output indexes are within bounds and correctly ordered.
/// - All components defined by output indexes are validated.
struct Parser<'a> {
    reader: Reader<'a>,
    out: Meta,
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Deref for Parser<'a> {
    type Target = Reader<'a>;

    fn deref(&self) -> &Self::Target {
        &self.reader
    }
}

impl<'a> DerefMut for Parser<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.reader
    }
}

enum PathKind {
    General,
    AbEmpty,
    ContinuedNoScheme,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn has_remaining(&self) -> bool {
        self.pos < self.len()
    }

    fn peek(&self, i: usize) -> Option<u8> {
        self.bytes.get(self.pos + i).copied()
    }

    // Any call to this method must keep the invariants.
    fn skip(&mut self, n: usize) {
        // INVARIANT: `pos` is non-decreasing.
        self.pos += n;
        debug_assert!(self.pos <= self.len());
    }

    // Returns `true` iff any byte is read.
    fn read(&mut self, table: &Table) -> Result<bool> {
        let start = self.pos;
        self._read(table, |_, _| {})?;
        Ok(self.pos > start)
    }

    fn _read(&mut self, table: &Table, mut f: impl FnMut(usize, u8)) -> Result<()> {
        let mut i = self.pos;
        let allows_pct_encoded = table.allows_pct_encoded();

        while i < self.len() {
            let x = self.bytes[i];
            if allows_pct_encoded && x == b'%' {
                // The error points at the first missing or bad hex digit.
                match self.bytes.get(i + 1) {
                    Some(&hi) if HEXDIG.allows(hi) => {}
                    _ => err!(i + 1),
                }
                match self.bytes.get(i + 2) {
                    Some(&lo) if HEXDIG.allows(lo) => {}
                    _ => err!(i + 2),
                }
                i += 3;
            } else {
                if !table.allows(x) {
                    break;
                }
                f(i, x);
                i += 1;
            }
        }

        // INVARIANT: `i` is non-decreasing.
        self.pos = i;
        Ok(())
    }

    fn read_str(&mut self, s: &str) -> bool {
        if self.bytes[self.pos..].starts_with(s.as_bytes()) {
            // INVARIANT: The remaining bytes start with `s` so it's fine to skip `s.len()`.
            self.skip(s.len());
            true
        } else {
            false
        }
    }

    fn read_port(&mut self) -> Result<()> {
        if self.read_str(":") {
            self.read(DIGIT)?;
        }
        Ok(())
    }

    fn read_ip_literal(&mut self) -> Result<Option<HostMeta>> {
        if !self.read_str("[") {
            return Ok(None);
        }

        let meta = if let Some(b'v' | b'V') = self.peek(0) {
            self.read_ipv_future()?;
            HostMeta::IpvFuture
        } else {
            HostMeta::Ipv6(self.read_v6()?.into())
        };

        if !self.read_str("]") {
            err!(self.pos);
        }
        Ok(Some(meta))
    }

    fn read_ipv_future(&mut self) -> Result<()> {
        // INVARIANT: Skipping "v" or "V" is fine.
        self.skip(1);
        if !self.read(HEXDIG)? {
            err!(self.pos);
        }
        if !self.read_str(".") {
            err!(self.pos);
        }
        if !self.read(IPV_FUTURE)? {
            err!(self.pos);
        }
        Ok(())
    }

    /// Reads an IPv6 address, stopping before the closing bracket.
    ///
    /// Groups read after a "::" land in a side buffer, because how far
    /// right they sit is unknown until the address ends. The buffer is
    /// copied into place once the total group count is known.
    fn read_v6(&mut self) -> Result<[u8; 16]> {
        let mut addr = [0; 16];
        let mut tail = [0; 16];
        let mut tail_len = 0;
        let mut quads = 0;
        let mut zipper = false;
        let mut has_v4 = false;

        if self.peek(0) == Some(b':') {
            // A leading colon must open a "::".
            if self.peek(1) != Some(b':') {
                err!(self.pos);
            }
            // INVARIANT: Skipping "::" is fine.
            self.skip(2);
            zipper = true;
            if self.peek(0) == Some(b']') {
                return Ok(addr);
            }
        }

        loop {
            if self.peek(0) == Some(b':') {
                // Three consecutive colons.
                err!(self.pos);
            }

            let quad_start = self.pos;
            let mut digits = [0; 4];
            let mut len = 0;
            let mut letters = false;
            let mut value: u16 = 0;

            while let Some(x) = self.peek(0) {
                let v = OCTET_TABLE_LO[x as usize];
                if v >= 16 {
                    break;
                }
                if len == 4 {
                    err!(self.pos);
                }
                digits[len] = v;
                letters |= v > 9;
                value = (value << 4) | u16::from(v);
                len += 1;
                // INVARIANT: Skipping a hexadecimal digit is fine.
                self.skip(1);
            }

            match self.peek(0) {
                Some(b'.') => {
                    if len == 4 {
                        // A fourth digit in a dotted octet, reported at the digit.
                        err!(quad_start + 3);
                    }
                    if letters || len == 0 || quads > 6 || (!zipper && quads != 6) {
                        err!(self.pos);
                    }
                    let octets = self.read_v4_in_v6(digits, len, quad_start)?;
                    addr[12..].copy_from_slice(&octets);
                    quads += 2;
                    has_v4 = true;
                    break;
                }
                Some(x @ (b':' | b']')) => {
                    if len == 0 {
                        // Trailing colon or empty brackets.
                        err!(self.pos);
                    }
                    if quads == 8 {
                        // A ninth group, reported at its first digit.
                        err!(quad_start);
                    }
                    let [hi, lo] = value.to_be_bytes();
                    if zipper {
                        tail[tail_len] = hi;
                        tail[tail_len + 1] = lo;
                        tail_len += 2;
                    } else {
                        addr[quads * 2] = hi;
                        addr[quads * 2 + 1] = lo;
                    }
                    quads += 1;

                    if x == b']' {
                        break;
                    }
                    // INVARIANT: Skipping ":" is fine.
                    self.skip(1);
                    if self.peek(0) == Some(b':') {
                        if zipper {
                            // A second "::", reported at its first colon.
                            err!(self.pos - 1);
                        }
                        zipper = true;
                        // INVARIANT: Skipping ":" is fine.
                        self.skip(1);
                        if self.peek(0) == Some(b']') {
                            break;
                        }
                    }
                }
                _ => err!(self.pos),
            }
        }

        if !zipper && quads != 8 {
            err!(self.pos);
        }
        let end = if has_v4 { 12 } else { 16 };
        addr[end - tail_len..end].copy_from_slice(&tail[..tail_len]);
        Ok(addr)
    }

    /// Reads the dotted-quad tail of an IPv6 address, the first octet's
    /// digits already scanned, stopping before the closing bracket.
    fn read_v4_in_v6(&mut self, digits: [u8; 4], len: usize, start: usize) -> Result<[u8; 4]> {
        let mut octets = [0; 4];
        octets[0] = validate_octet(digits, len, start)?;
        let mut done = 1;

        loop {
            match self.peek(0) {
                Some(b'.') if done < 4 => {
                    // INVARIANT: Skipping "." is fine.
                    self.skip(1);
                    let start = self.pos;
                    let mut digits = [0; 4];
                    let mut len = 0;
                    while let Some(x) = self.peek(0) {
                        if !x.is_ascii_digit() {
                            break;
                        }
                        if len == 3 {
                            // A fourth digit, reported at the digit.
                            err!(self.pos);
                        }
                        digits[len] = x - b'0';
                        len += 1;
                        // INVARIANT: Skipping a digit is fine.
                        self.skip(1);
                    }
                    if len == 0 {
                        err!(self.pos);
                    }
                    octets[done] = validate_octet(digits, len, start)?;
                    done += 1;
                }
                Some(b']') if done == 4 => return Ok(octets),
                _ => err!(self.pos),
            }
        }
    }
}

/// Checks one decimal octet of an embedded IPv4 address.
///
/// Out-of-range values are reported at the earliest digit that settles
/// the matter: the first digit if it exceeds 2, the second if it
/// exceeds 5, the third otherwise. Leading zeros are reported at the
/// zero itself.
fn validate_octet(digits: [u8; 4], len: usize, start: usize) -> Result<u8> {
    if len > 1 && digits[0] == 0 {
        err!(start);
    }
    let mut value = 0u32;
    for &d in &digits[..len] {
        value = value * 10 + u32::from(d);
    }
    if value > 255 {
        if digits[0] > 2 {
            err!(start);
        } else if digits[1] > 5 {
            err!(start + 1);
        } else {
            err!(start + 2);
        }
    }
    Ok(value as u8)
}

impl<'a> Parser<'a> {
    fn read_v4_or_reg_name(&mut self) -> Result<HostMeta> {
        let start = self.pos;
        self.read(REG_NAME)?;
        Ok(match ipv4::parse(&self.bytes[start..self.pos]) {
            Some(addr) => HostMeta::Ipv4(addr),
            None => HostMeta::RegName,
        })
    }

    fn read_host(&mut self) -> Result<HostMeta> {
        match self.read_ip_literal()? {
            Some(host) => Ok(host),
            None => self.read_v4_or_reg_name(),
        }
    }

    fn parse_from_scheme(&mut self) -> Result<()> {
        self.read(SCHEME)?;

        if self.peek(0) == Some(b':') {
            // Scheme starts with a letter.
            if self.pos > 0 && self.bytes[0].is_ascii_alphabetic() {
                self.out.scheme_end = NonZeroUsize::new(self.pos);
            } else {
                err!(0);
            }

            // INVARIANT: Skipping ":" is fine.
            self.skip(1);
            return if self.read_str("//") {
                self.parse_from_authority()
            } else {
                self.parse_from_path(PathKind::General)
            };
        } else if self.pos == 0 {
            // Nothing read.
            if self.read_str("//") {
                return self.parse_from_authority();
            }
        }
        // Scheme chars are valid in a segment.
        self.parse_from_path(PathKind::ContinuedNoScheme)
    }

    fn parse_from_authority(&mut self) -> Result<()> {
        let auth_start = self.pos;

        // The first colon splits host from port unless userinfo turns up.
        let mut colon_i = None;
        self._read(USERINFO, |i, x| {
            if x == b':' && colon_i.is_none() {
                colon_i = Some(i);
            }
        })?;

        let host;
        if self.peek(0) == Some(b'@') {
            // Userinfo present.
            // INVARIANT: Skipping "@" is fine.
            self.skip(1);

            let host_start = self.pos;
            let meta = self.read_host()?;
            host = (host_start, self.pos, meta);

            self.read_port()?;
        } else if self.pos == auth_start {
            // Nothing read. We're now at the start of an IP literal or the path.
            if let Some(meta) = self.read_ip_literal()? {
                host = (auth_start, self.pos, meta);
                self.read_port()?;
            } else {
                // Empty authority.
                host = (self.pos, self.pos, HostMeta::RegName);
            }
        } else {
            // The whole authority read. Everything after the first colon
            // must be a port.
            let host_end = match colon_i {
                Some(i) => {
                    for j in i + 1..self.pos {
                        if !self.bytes[j].is_ascii_digit() {
                            err!(j);
                        }
                    }
                    i
                }
                None => self.pos,
            };

            let meta = match ipv4::parse(&self.bytes[auth_start..host_end]) {
                Some(addr) => HostMeta::Ipv4(addr),
                None => HostMeta::RegName,
            };
            host = (auth_start, host_end, meta);
        }

        self.out.auth_meta = Some(AuthMeta {
            start: auth_start,
            host_bounds: (host.0, host.1),
            host_meta: host.2,
        });
        self.parse_from_path(PathKind::AbEmpty)
    }

    fn read_slash_segments(&mut self) -> Result<()> {
        while self.peek(0) == Some(b'/') {
            // INVARIANT: Skipping "/" is fine.
            self.skip(1);
            let start = self.pos;
            self.read(PCHAR)?;
            self.out.path_segments.push((start, self.pos));
        }
        Ok(())
    }

    fn parse_from_path(&mut self, kind: PathKind) -> Result<()> {
        let start = match kind {
            PathKind::General => {
                let start = self.pos;
                if self.peek(0) != Some(b'/') {
                    let seg = self.pos;
                    if self.read(PCHAR)? {
                        self.out.path_segments.push((seg, self.pos));
                    }
                }
                self.read_slash_segments()?;
                start
            }
            PathKind::AbEmpty => {
                // Either empty or beginning with '/'.
                let start = self.pos;
                self.read_slash_segments()?;
                start
            }
            PathKind::ContinuedNoScheme => {
                self.read(SEGMENT_NZ_NC)?;

                if self.peek(0) == Some(b':') {
                    // In a relative reference, the first path
                    // segment cannot contain a colon character.
                    err!(self.pos);
                }

                if self.pos != 0 {
                    self.out.path_segments.push((0, self.pos));
                }
                self.read_slash_segments()?;
                0
            }
        };
        self.out.path_bounds = (start, self.pos);
        self.out.path_absolute = self.pos > start && self.bytes[start] == b'/';

        if self.read_str("?") {
            self.read(QUERY)?;
            self.out.query_end = NonZeroUsize::new(self.pos);
        }

        if self.read_str("#") {
            self.read(FRAGMENT)?;
        }

        if self.has_remaining() {
            err!(self.pos);
        }
        Ok(())
    }
}
