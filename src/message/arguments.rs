use std::{borrow::Cow, collections::BTreeMap};

use bendy::encoding::{SingleItemEncoder, ToBencode};

/// A single value inside a query's `a` or a response's `r` dictionary
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ArgValue<'a> {
    Int(i64),
    Bytes(Cow<'a, [u8]>),
}

impl<'a> ArgValue<'a> {
    pub fn bytes(bytes: &'a [u8]) -> Self {
        ArgValue::Bytes(Cow::Borrowed(bytes))
    }

    pub fn owned(bytes: Vec<u8>) -> Self {
        ArgValue::Bytes(Cow::Owned(bytes))
    }

    /// Flags only show up on the wire when they are set, and then as `i1e`
    pub fn flag(set: bool) -> Option<Self> {
        set.then_some(ArgValue::Int(1))
    }
}

impl ToBencode for ArgValue<'_> {
    const MAX_DEPTH: usize = 0 as usize;

    fn encode(&self, encoder: SingleItemEncoder) -> Result<(), bendy::encoding::Error> {
        match self {
            ArgValue::Int(i) => encoder.emit_int(*i),
            ArgValue::Bytes(bytes) => encoder.emit_bytes(bytes),
        }
    }
}

/// The body dictionary of a message.
///
/// Required fields go in first, then optional ones in the order they are listed. A key that is
/// already present is never overwritten, so whatever is listed earlier wins. Keys are held sorted
/// by their raw bytes, which is the order bencode wants them in.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Arguments<'a> {
    pairs: BTreeMap<&'static [u8], ArgValue<'a>>,
}

impl<'a> Arguments<'a> {
    pub fn new<I>(required: I) -> Self
    where
        I: IntoIterator<Item = (&'static [u8], ArgValue<'a>)>,
    {
        Self::default().merge_optional(required.into_iter().map(|(key, value)| (key, Some(value))))
    }

    pub fn merge_optional<I>(mut self, optional: I) -> Self
    where
        I: IntoIterator<Item = (&'static [u8], Option<ArgValue<'a>>)>,
    {
        let present = optional.into_iter().filter_map(|(key, value)| Some((key, value?)));
        for (key, value) in present {
            self.pairs.entry(key).or_insert(value);
        }
        self
    }

    pub(crate) fn get(&self, key: &[u8]) -> Option<&ArgValue<'a>> {
        self.pairs.get(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.pairs.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl ToBencode for Arguments<'_> {
    const MAX_DEPTH: usize = 1 as usize;

    fn encode(&self, encoder: SingleItemEncoder) -> Result<(), bendy::encoding::Error> {
        // emit_dict refuses out of order keys, the BTreeMap already has them sorted
        encoder.emit_dict(|mut e| {
            for (key, value) in &self.pairs {
                e.emit_pair(key, value)?;
            }
            Ok(())
        })
    }
}
