//! Low-level types related to [`RequestCookies`].
//!
//! [`RequestCookies`]: crate::RequestCookies
use crate::RequestCookies;
use std::collections::hash_map;

/// An iterator over the `(name, value)` pairs in a [`RequestCookies`] map.
///
/// This struct is created by the [`RequestCookies::iter()`] method.
pub struct Iter<'a> {
    pub(crate) inner: hash_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl std::iter::FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a RequestCookies {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
