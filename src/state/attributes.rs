use std::borrow::Cow;
use std::fmt::{self, Debug};
use std::slice::Iter;

/// A single `name="value"` pair of a start tag.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Attribute<'i> {
    name: Cow<'i, str>,
    value: Cow<'i, str>,
}

impl<'i> Attribute<'i> {
    #[inline]
    pub fn new(name: impl Into<Cow<'i, str>>, value: impl Into<Cow<'i, str>>) -> Self {
        Attribute {
            name: name.into(),
            value: value.into(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn into_owned(self) -> Attribute<'static> {
        Attribute {
            name: Cow::Owned(self.name.into_owned()),
            value: Cow::Owned(self.value.into_owned()),
        }
    }
}

impl Debug for Attribute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name())
            .field("value", &self.value())
            .finish()
    }
}

/// Attributes of a start tag in document order.
///
/// Duplicate names are kept as delivered by the tokenizer; [`Attributes::get`]
/// returns the first one.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Attributes<'i>(Vec<Attribute<'i>>);

impl<'i> Attributes<'i> {
    #[inline]
    pub fn new() -> Self {
        Attributes(Vec::new())
    }

    #[inline]
    pub fn push(&mut self, attribute: Attribute<'i>) {
        self.0.push(attribute);
    }

    /// Returns the value of the first attribute called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|attr| attr.name() == name)
            .map(Attribute::value)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, Attribute<'i>> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'i, N, V> FromIterator<(N, V)> for Attributes<'i>
where
    N: Into<Cow<'i, str>>,
    V: Into<Cow<'i, str>>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Attributes(
            iter.into_iter()
                .map(|(name, value)| Attribute::new(name, value))
                .collect(),
        )
    }
}

impl<'a, 'i> IntoIterator for &'a Attributes<'i> {
    type Item = &'a Attribute<'i>;
    type IntoIter = Iter<'a, Attribute<'i>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for Attributes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
