//! Element-to-bytes conversion feeding the hash family.
//!
//! Serializers must be deterministic: the same element has to produce the
//! same bytes across calls and across process runs, otherwise hash values
//! are not reproducible and inserted elements can be reported missing.
use std::borrow::Cow;
use std::fmt::Display;
use std::marker::PhantomData;

use crate::errors::Result;

pub trait ElementSerializer<E: ?Sized>: Send + Sync {
    fn serialize<'a>(&self, element: &'a E) -> Result<Cow<'a, [u8]>>;
}

/// Default serializer: the UTF-8 bytes of the element's `Display` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplaySerializer;

impl<E: Display + ?Sized> ElementSerializer<E> for DisplaySerializer {
    fn serialize<'a>(&self, element: &'a E) -> Result<Cow<'a, [u8]>> {
        Ok(Cow::Owned(element.to_string().into_bytes()))
    }
}

/// Borrows the element's bytes as-is; no allocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesSerializer;

impl<E: AsRef<[u8]> + ?Sized> ElementSerializer<E> for BytesSerializer {
    fn serialize<'a>(&self, element: &'a E) -> Result<Cow<'a, [u8]>> {
        Ok(Cow::Borrowed(element.as_ref()))
    }
}

/// Adapts a closure. The closure may fail; its error reaches the caller
/// of `insert`/`contains` unchanged.
pub struct FnSerializer<E: ?Sized, F> {
    f: F,
    _element: PhantomData<fn(&E)>,
}

impl<E: ?Sized, F> FnSerializer<E, F>
where
    F: Fn(&E) -> Result<Vec<u8>> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f, _element: PhantomData }
    }
}

impl<E: ?Sized, F> ElementSerializer<E> for FnSerializer<E, F>
where
    F: Fn(&E) -> Result<Vec<u8>> + Send + Sync,
{
    fn serialize<'a>(&self, element: &'a E) -> Result<Cow<'a, [u8]>> {
        (self.f)(element).map(Cow::Owned)
    }
}
