//! Error type for this crate.

/// An error occurred when parsing a URI reference.
///
/// There is a single error condition: the input violates the URI-reference
/// syntax at some byte, and [`index`] points at the first offending byte.
/// The error never describes more than one offense and the parser never
/// recovers past it.
///
/// [`index`]: Self::index
///
/// # Examples
///
/// ```
/// use uri_span::Uri;
///
/// // A relative reference must not contain a colon in its first segment.
/// let e = Uri::parse("exam=ple:foo").unwrap_err();
/// assert_eq!(e.index(), 8);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ParseError<I = ()> {
    pub(crate) index: usize,
    pub(crate) input: I,
}

impl ParseError {
    pub(crate) fn with_input<I>(self, input: I) -> ParseError<I> {
        ParseError {
            index: self.index,
            input,
        }
    }
}

impl<I> ParseError<I> {
    /// Returns the byte index at which the error occurred in the input.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Recovers the input that was attempted to parse into a [`Uri`].
    ///
    /// [`Uri`]: crate::Uri
    #[inline]
    pub fn into_input(self) -> I {
        self.input
    }

    /// Returns the error with the input stripped.
    #[inline]
    #[must_use]
    pub fn strip_input(&self) -> ParseError {
        ParseError {
            index: self.index,
            input: (),
        }
    }
}

#[cfg(feature = "std")]
impl<I> std::error::Error for ParseError<I> {}
