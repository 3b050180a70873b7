#![allow(missing_debug_implementations)]

use crate::{error::ParseError, parser};
use alloc::{string::String, vec::Vec};
use core::{
    net::{Ipv4Addr, Ipv6Addr},
    num::NonZeroUsize,
};

/// Metadata of a parsed URI reference.
///
/// All indexes are byte positions into the original input, within bounds
/// and in nondecreasing order. The parser populates a default-initialized
/// `Meta` incrementally; a failed parse drops it, so nothing partially
/// built ever reaches the caller.
#[derive(Clone, Default)]
pub struct Meta {
    /// The index of the trailing colon.
    pub scheme_end: Option<NonZeroUsize>,
    pub auth_meta: Option<AuthMeta>,
    pub path_bounds: (usize, usize),
    /// Whether the path begins with a slash.
    pub path_absolute: bool,
    /// Bounds of each path segment, in input order, delimiters excluded.
    pub path_segments: Vec<(usize, usize)>,
    /// One byte past the last byte of query.
    pub query_end: Option<NonZeroUsize>,
}

impl Meta {
    #[inline]
    pub fn query_or_path_end(&self) -> usize {
        self.query_end.map_or(self.path_bounds.1, |i| i.get())
    }
}

#[derive(Clone, Copy)]
pub struct AuthMeta {
    /// The index right after the "//" prefix.
    pub start: usize,
    pub host_bounds: (usize, usize),
    pub host_meta: HostMeta,
}

#[derive(Clone, Copy)]
pub enum HostMeta {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    IpvFuture,
    RegName,
}

pub trait Parse {
    type Val;
    type Err;

    fn parse(self) -> Result<(Self::Val, Meta), Self::Err>;
}

impl<'a> Parse for &'a str {
    type Val = &'a str;
    type Err = ParseError;

    fn parse(self) -> Result<(Self::Val, Meta), Self::Err> {
        parser::parse(self.as_bytes()).map(|meta| (self, meta))
    }
}

impl Parse for String {
    type Val = String;
    type Err = ParseError<String>;

    fn parse(self) -> Result<(Self::Val, Meta), Self::Err> {
        match parser::parse(self.as_bytes()) {
            Ok(meta) => Ok((self, meta)),
            Err(e) => Err(e.with_input(self)),
        }
    }
}
