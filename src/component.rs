//! URI components.

use crate::{
    encoding::table,
    internal::{AuthMeta, HostMeta},
};
use core::{
    net::{Ipv4Addr, Ipv6Addr},
    num::ParseIntError,
    slice,
};
use ref_cast::{ref_cast_custom, RefCastCustom};

/// A [scheme] component.
///
/// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
///
/// # Comparison
///
/// `Scheme`s are compared case-insensitively. You should do a case-insensitive
/// comparison if the scheme specification allows both letter cases in the scheme name.
///
/// # Examples
///
/// ```
/// use uri_span::{component::Scheme, Uri};
///
/// const SCHEME_HTTP: &Scheme = Scheme::new_or_panic("http");
///
/// let scheme = Uri::parse("HTTP://EXAMPLE.COM/")?.scheme().unwrap();
///
/// // Case-insensitive comparison.
/// assert_eq!(scheme, SCHEME_HTTP);
/// // Case-sensitive comparison.
/// assert_eq!(scheme.as_str(), "HTTP");
/// # Ok::<_, uri_span::ParseError>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct Scheme {
    inner: str,
}

impl Scheme {
    #[ref_cast_custom]
    #[inline]
    pub(crate) const fn new_validated(scheme: &str) -> &Scheme;

    /// Converts a string slice to `&Scheme`.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid scheme name according to
    /// [Section 3.1 of RFC 3986][scheme]. For a non-panicking variant,
    /// use [`new`](Self::new).
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    #[inline]
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Scheme {
        match Self::new(s) {
            Some(scheme) => scheme,
            None => panic!("invalid scheme"),
        }
    }

    /// Converts a string slice to `&Scheme`, returning `None` if the conversion fails.
    #[inline]
    #[must_use]
    pub const fn new(s: &str) -> Option<&Scheme> {
        if matches!(s.as_bytes(), [first, rem @ ..]
        if first.is_ascii_alphabetic() && table::SCHEME.validate(rem))
        {
            Some(Scheme::new_validated(s))
        } else {
            None
        }
    }

    /// Returns the scheme component as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl PartialEq for Scheme {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_ignore_ascii_case(&other.inner)
    }
}

impl Eq for Scheme {}

/// An [authority] component.
///
/// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
#[derive(Clone, Copy)]
pub struct Authority<'a> {
    /// The entire original string, sliced with the absolute indexes in `meta`.
    val: &'a str,
    meta: AuthMeta,
    /// The index one past the end of the authority.
    end: usize,
}

impl<'a> Authority<'a> {
    pub(crate) fn new(val: &'a str, meta: AuthMeta, end: usize) -> Self {
        Authority { val, meta, end }
    }

    /// Returns the authority as a string slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_span::Uri;
    ///
    /// let uri = Uri::parse("http://user@example.com:8080/")?;
    /// let authority = uri.authority().unwrap();
    /// assert_eq!(authority.as_str(), "user@example.com:8080");
    /// # Ok::<_, uri_span::ParseError>(())
    /// ```
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        &self.val[self.meta.start..self.end]
    }

    /// Returns the optional [userinfo] subcomponent.
    ///
    /// [userinfo]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.1
    #[must_use]
    pub fn userinfo(&self) -> Option<&'a str> {
        let host_start = self.meta.host_bounds.0;
        (host_start != self.meta.start).then(|| &self.val[self.meta.start..host_start - 1])
    }

    /// Returns `true` if a userinfo subcomponent is present, even empty.
    #[inline]
    #[must_use]
    pub fn has_userinfo(&self) -> bool {
        self.meta.host_bounds.0 != self.meta.start
    }

    /// Returns the [host] subcomponent as a string slice.
    ///
    /// The host subcomponent is always present, although it may be empty.
    ///
    /// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
    #[must_use]
    pub fn host(&self) -> &'a str {
        let (start, end) = self.meta.host_bounds;
        &self.val[start..end]
    }

    /// Returns the parsed [host] subcomponent.
    ///
    /// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
    ///
    /// # Examples
    ///
    /// ```
    /// use core::net::{Ipv4Addr, Ipv6Addr};
    /// use uri_span::{component::Host, Uri};
    ///
    /// let uri = Uri::parse("ftp://127.0.0.1/")?;
    /// assert_eq!(uri.authority().unwrap().host_parsed(), Host::Ipv4(Ipv4Addr::LOCALHOST));
    ///
    /// let uri = Uri::parse("ftp://[::1]/")?;
    /// assert_eq!(uri.authority().unwrap().host_parsed(), Host::Ipv6(Ipv6Addr::LOCALHOST));
    ///
    /// let uri = Uri::parse("ftp://127.0.0.001/")?;
    /// // The host is not an IPv4 address in strict dotted-decimal form.
    /// assert_eq!(uri.authority().unwrap().host_parsed(), Host::RegName("127.0.0.001"));
    /// # Ok::<_, uri_span::ParseError>(())
    /// ```
    #[must_use]
    pub fn host_parsed(&self) -> Host<'a> {
        match self.meta.host_meta {
            HostMeta::Ipv4(addr) => Host::Ipv4(addr),
            HostMeta::Ipv6(addr) => Host::Ipv6(addr),
            HostMeta::IpvFuture => {
                let host = self.host();
                // The brackets are part of the host range.
                Host::IpvFuture(&host[1..host.len() - 1])
            }
            HostMeta::RegName => Host::RegName(self.host()),
        }
    }

    /// Returns the optional [port] subcomponent.
    ///
    /// A scheme may define a default port to use when the port is
    /// not present or is empty.
    ///
    /// [port]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.3
    #[must_use]
    pub fn port(&self) -> Option<&'a str> {
        let host_end = self.meta.host_bounds.1;
        (host_end != self.end).then(|| &self.val[host_end + 1..self.end])
    }

    /// Returns `true` if a port subcomponent is present, even empty.
    #[inline]
    #[must_use]
    pub fn has_port(&self) -> bool {
        self.meta.host_bounds.1 != self.end
    }

    /// Converts the [port] subcomponent to `u16`, if present and nonempty.
    ///
    /// Returns `Ok(None)` if the port is not present or is empty,
    /// `Err` if the port cannot be parsed into `u16`.
    ///
    /// [port]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.3
    pub fn port_to_u16(&self) -> Result<Option<u16>, ParseIntError> {
        self.port()
            .filter(|port| !port.is_empty())
            .map(str::parse)
            .transpose()
    }
}

/// A parsed [host] subcomponent.
///
/// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Host<'a> {
    /// An IPv4 address.
    Ipv4(Ipv4Addr),
    /// An IPv6 address.
    Ipv6(Ipv6Addr),
    /// An IP address of future version, the text between the brackets
    /// with the version prefix kept.
    IpvFuture(&'a str),
    /// A registered name.
    RegName(&'a str),
}

/// An iterator over the [segments] of a path.
///
/// [segments]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    val: &'a str,
    bounds: slice::Iter<'a, (usize, usize)>,
}

impl<'a> Segments<'a> {
    pub(crate) fn new(val: &'a str, bounds: &'a [(usize, usize)]) -> Self {
        Segments {
            val,
            bounds: bounds.iter(),
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.bounds.next().map(|&(start, end)| &self.val[start..end])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.bounds.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Segments<'a> {
    fn next_back(&mut self) -> Option<&'a str> {
        self.bounds
            .next_back()
            .map(|&(start, end)| &self.val[start..end])
    }
}

impl ExactSizeIterator for Segments<'_> {}

impl core::iter::FusedIterator for Segments<'_> {}
