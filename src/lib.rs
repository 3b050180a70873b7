#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![cfg_attr(not(feature = "std"), no_std)]

//! A zero-copy URI reference parser that strictly adheres to IETF [RFC 3986].
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//!
//! The parser walks the input once, records the byte ranges of the
//! components it finds, and never copies or decodes anything. See the
//! documentation of [`Uri`] for more details.
//!
//! # Feature flags
//!
//! All features except `std` are disabled by default.
//!
//! - `std`: Enables the [`Error`] implementation for [`ParseError`].
//! - `serde`: Enables `Serialize` and `Deserialize` implementations for
//!   [`Uri`]. A `Uri` serializes as its original text and deserializes
//!   by parsing.
//!
//! [`Error`]: std::error::Error

extern crate alloc;

pub mod component;
pub mod encoding;

mod error;
mod fmt;
mod internal;
mod ipv4;
mod parser;

pub use error::ParseError;

use crate::{
    component::{Authority, Scheme, Segments},
    internal::{Meta, Parse},
};
use alloc::string::String;
use borrow_or_share::{BorrowOrShare, Bos};
use core::{borrow::Borrow, cmp::Ordering, hash, str::FromStr};

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A [URI reference] defined in RFC 3986, parsed into component spans.
///
/// [URI reference]: https://datatracker.ietf.org/doc/html/rfc3986/#section-4.1
///
/// # Variants
///
/// Two variants of `Uri` are available: `Uri<&str>` (borrowed) and
/// `Uri<String>` (owned).
///
/// Lifetimes are handled in a way that the accessors on `Uri<&'a str>`
/// output references with lifetime `'a` where applicable. This allows
/// you to drop a temporary `Uri` while keeping the output references:
///
/// ```
/// use uri_span::Uri;
///
/// let path = Uri::parse("foo:bar")?.path();
/// assert_eq!(path, "bar");
/// # Ok::<_, uri_span::ParseError>(())
/// ```
///
/// # Examples
///
/// Parse into and access components of a `Uri`:
///
/// ```
/// use uri_span::Uri;
///
/// let uri = Uri::parse("http://user@example.com:80/a/b?q=1#frag")?;
///
/// assert_eq!(uri.scheme().unwrap().as_str(), "http");
///
/// let authority = uri.authority().unwrap();
/// assert_eq!(authority.userinfo(), Some("user"));
/// assert_eq!(authority.host(), "example.com");
/// assert_eq!(authority.port(), Some("80"));
///
/// assert_eq!(uri.path(), "/a/b");
/// assert_eq!(uri.query(), Some("q=1"));
/// assert_eq!(uri.fragment(), Some("frag"));
/// # Ok::<_, uri_span::ParseError>(())
/// ```
#[derive(Clone)]
pub struct Uri<T> {
    /// Value of the URI reference.
    val: T,
    /// Metadata of the URI reference.
    /// Should be identical to parser output with `val` as input.
    meta: Meta,
}

impl<T> Uri<T> {
    /// Parses a URI reference from a string into a `Uri`.
    ///
    /// The return type is
    ///
    /// - `Result<Uri<&str>, ParseError>` for `I = &str`;
    /// - `Result<Uri<String>, ParseError<String>>` for `I = String`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string does not match the
    /// [`URI-reference`][abnf] ABNF rule from RFC 3986. The error holds
    /// the index of the first offending byte.
    ///
    /// From a [`ParseError<String>`], you may recover or strip the input
    /// by calling [`into_input`] or [`strip_input`] on it.
    ///
    /// [abnf]: https://datatracker.ietf.org/doc/html/rfc3986/#section-4.1
    /// [`into_input`]: ParseError::into_input
    /// [`strip_input`]: ParseError::strip_input
    pub fn parse<I>(input: I) -> Result<Self, I::Err>
    where
        I: Parse<Val = T>,
    {
        input.parse().map(|(val, meta)| Uri { val, meta })
    }

    /// Returns `true` if the path begins with a slash.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_span::Uri;
    ///
    /// assert!(Uri::parse("http://example.com/a")?.path_is_absolute());
    /// assert!(!Uri::parse("mailto:user@example.com")?.path_is_absolute());
    /// # Ok::<_, uri_span::ParseError>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn path_is_absolute(&self) -> bool {
        self.meta.path_absolute
    }

    /// Returns `true` if the path is nonempty and does not begin with a slash.
    #[inline]
    #[must_use]
    pub fn path_is_rootless(&self) -> bool {
        !self.meta.path_absolute && self.meta.path_bounds.0 != self.meta.path_bounds.1
    }
}

impl Uri<String> {
    /// Borrows this `Uri<String>` as `Uri<&str>`.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn borrow(&self) -> Uri<&str> {
        Uri {
            val: &self.val,
            meta: self.meta.clone(),
        }
    }

    /// Consumes this `Uri<String>` and yields the underlying [`String`].
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.val
    }
}

impl Uri<&str> {
    /// Creates a new `Uri<String>` by cloning the contents of this `Uri<&str>`.
    #[must_use]
    pub fn to_owned(&self) -> Uri<String> {
        Uri {
            val: self.val.to_owned(),
            meta: self.meta.clone(),
        }
    }
}

impl<'i, 'o, T: BorrowOrShare<'i, 'o, str>> Uri<T> {
    /// Returns the URI reference as a string slice.
    #[must_use]
    pub fn as_str(&'i self) -> &'o str {
        self.val.borrow_or_share()
    }

    fn slice(&'i self, start: usize, end: usize) -> &'o str {
        &self.as_str()[start..end]
    }

    /// Returns the optional [scheme] component.
    ///
    /// Note that the scheme component is *case-insensitive*.
    /// See the documentation of [`Scheme`] for more details on comparison.
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_span::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/")?;
    /// assert_eq!(uri.scheme().unwrap().as_str(), "http");
    ///
    /// let uri = Uri::parse("/relative")?;
    /// assert!(uri.scheme().is_none());
    /// # Ok::<_, uri_span::ParseError>(())
    /// ```
    #[must_use]
    pub fn scheme(&'i self) -> Option<&'o Scheme> {
        self.meta
            .scheme_end
            .map(|i| Scheme::new_validated(self.slice(0, i.get())))
    }

    /// Returns the optional [authority] component.
    ///
    /// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_span::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/")?;
    /// assert!(uri.authority().is_some());
    ///
    /// let uri = Uri::parse("mailto:user@example.com")?;
    /// assert!(uri.authority().is_none());
    /// # Ok::<_, uri_span::ParseError>(())
    /// ```
    #[must_use]
    pub fn authority(&'i self) -> Option<Authority<'o>> {
        self.meta
            .auth_meta
            .map(|meta| Authority::new(self.as_str(), meta, self.meta.path_bounds.0))
    }

    /// Returns the [path] component.
    ///
    /// The path component is always present, although it may be empty.
    ///
    /// [path]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_span::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/")?;
    /// assert_eq!(uri.path(), "/");
    ///
    /// let uri = Uri::parse("mailto:user@example.com")?;
    /// assert_eq!(uri.path(), "user@example.com");
    ///
    /// let uri = Uri::parse("http://example.com")?;
    /// assert_eq!(uri.path(), "");
    /// # Ok::<_, uri_span::ParseError>(())
    /// ```
    #[must_use]
    pub fn path(&'i self) -> &'o str {
        self.slice(self.meta.path_bounds.0, self.meta.path_bounds.1)
    }

    /// Returns the optional [query] component.
    ///
    /// [query]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.4
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_span::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/?lang=en")?;
    /// assert_eq!(uri.query(), Some("lang=en"));
    ///
    /// let uri = Uri::parse("ftp://192.0.2.1/")?;
    /// assert_eq!(uri.query(), None);
    /// # Ok::<_, uri_span::ParseError>(())
    /// ```
    #[must_use]
    pub fn query(&'i self) -> Option<&'o str> {
        self.meta
            .query_end
            .map(|i| self.slice(self.meta.path_bounds.1 + 1, i.get()))
    }

    /// Returns the optional [fragment] component.
    ///
    /// [fragment]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.5
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_span::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/#usage")?;
    /// assert_eq!(uri.fragment(), Some("usage"));
    ///
    /// let uri = Uri::parse("ftp://192.0.2.1/")?;
    /// assert_eq!(uri.fragment(), None);
    /// # Ok::<_, uri_span::ParseError>(())
    /// ```
    #[must_use]
    pub fn fragment(&'i self) -> Option<&'o str> {
        let end = self.meta.query_or_path_end();
        let val = self.as_str();
        (end != val.len()).then(|| &val[end + 1..])
    }
}

impl<T: Bos<str>> Uri<T> {
    /// Returns an iterator over the path [segments], in order and undecoded.
    ///
    /// An empty path yields no segments; the path `/` yields one empty
    /// segment.
    ///
    /// [segments]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_span::Uri;
    ///
    /// let uri = Uri::parse("foo://example.com/a/b%2Fc")?;
    /// let mut segments = uri.path_segments();
    /// assert_eq!(segments.next(), Some("a"));
    /// assert_eq!(segments.next(), Some("b%2Fc"));
    /// assert_eq!(segments.next(), None);
    /// # Ok::<_, uri_span::ParseError>(())
    /// ```
    pub fn path_segments(&self) -> Segments<'_> {
        Segments::new(self.as_str(), &self.meta.path_segments)
    }
}

impl<T: Bos<str>, U: Bos<str>> PartialEq<Uri<U>> for Uri<T> {
    fn eq(&self, other: &Uri<U>) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<T: Bos<str>> PartialEq<str> for Uri<T> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<T: Bos<str>> PartialEq<Uri<T>> for str {
    fn eq(&self, other: &Uri<T>) -> bool {
        self == other.as_str()
    }
}

impl<T: Bos<str>> PartialEq<&str> for Uri<T> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<T: Bos<str>> PartialEq<Uri<T>> for &str {
    fn eq(&self, other: &Uri<T>) -> bool {
        *self == other.as_str()
    }
}

impl<T: Bos<str>> Eq for Uri<T> {}

impl<T: Bos<str>> hash::Hash for Uri<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl<T: Bos<str>> PartialOrd for Uri<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Bos<str>> Ord for Uri<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl<T: Bos<str>> AsRef<str> for Uri<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T: Bos<str>> Borrow<str> for Uri<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<'a> TryFrom<&'a str> for Uri<&'a str> {
    type Error = ParseError;

    /// Equivalent to [`parse`](Self::parse).
    #[inline]
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Uri::parse(value)
    }
}

impl TryFrom<String> for Uri<String> {
    type Error = ParseError<String>;

    /// Equivalent to [`parse`](Self::parse).
    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Uri::parse(value)
    }
}

impl<'a> From<Uri<&'a str>> for &'a str {
    /// Equivalent to [`as_str`](Uri::as_str).
    #[inline]
    fn from(value: Uri<&'a str>) -> &'a str {
        value.val
    }
}

impl From<Uri<String>> for String {
    /// Equivalent to [`into_string`](Uri::into_string).
    #[inline]
    fn from(value: Uri<String>) -> String {
        value.val
    }
}

impl From<Uri<&str>> for Uri<String> {
    /// Equivalent to [`to_owned`](Uri::to_owned).
    #[inline]
    fn from(value: Uri<&str>) -> Self {
        value.to_owned()
    }
}

impl FromStr for Uri<String> {
    type Err = ParseError;

    /// Equivalent to `Uri::parse(s).map(|r| r.to_owned())`.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s).map(|r| r.to_owned())
    }
}

#[cfg(feature = "serde")]
impl<T: Bos<str>> Serialize for Uri<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri<&'de str> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        Uri::parse(s).map_err(de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri<String> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uri::parse(s).map_err(de::Error::custom)
    }
}
