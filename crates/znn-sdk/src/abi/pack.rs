//! Head/tail argument-list layout

use std::collections::{BTreeMap, HashMap, HashSet};
use znn_primitives::U256;

use super::coder::Coder;
use super::error::AbiError;
use super::reader::Reader;
use super::token::Token;
use super::writer::Writer;

/// Encode `values` against `coders`.
///
/// `values` is either positional ([`Token::Tuple`] / [`Token::Array`]) or
/// keyed by field name ([`Token::Named`]).
pub fn pack(writer: &mut Writer, coders: &[Coder], values: &Token) -> Result<usize, AbiError> {
    let values: Vec<&Token> = match values {
        Token::Tuple(items) | Token::Array(items) => items.iter().collect(),
        Token::Named(map) => project_named(coders, map)?,
        _ => return Err(AbiError::invalid_value("tuple", "invalid tuple value")),
    };

    if coders.len() != values.len() {
        return Err(AbiError::LengthMismatch {
            expected: coders.len(),
            got: values.len(),
        });
    }

    pack_pairs(writer, coders.iter().zip(values))
}

/// Encode positional `values` against `coders`
pub fn pack_slice(
    writer: &mut Writer,
    coders: &[Coder],
    values: &[Token],
) -> Result<usize, AbiError> {
    if coders.len() != values.len() {
        return Err(AbiError::LengthMismatch {
            expected: coders.len(),
            got: values.len(),
        });
    }
    pack_pairs(writer, coders.iter().zip(values))
}

/// Encode every element of `values` with the same coder
pub(crate) fn pack_repeated(
    writer: &mut Writer,
    coder: &Coder,
    values: &[Token],
) -> Result<usize, AbiError> {
    pack_pairs(writer, std::iter::repeat(coder).zip(values))
}

fn project_named<'t>(
    coders: &[Coder],
    values: &'t BTreeMap<String, Token>,
) -> Result<Vec<&'t Token>, AbiError> {
    let mut seen = HashSet::new();
    coders
        .iter()
        .map(|coder| {
            let name = coder.name().ok_or(AbiError::MissingName)?;
            if !seen.insert(name) {
                return Err(AbiError::DuplicateName(name.to_string()));
            }
            values
                .get(name)
                .ok_or_else(|| AbiError::MissingField(name.to_string()))
        })
        .collect()
}

fn pack_pairs<'c, 't>(
    writer: &mut Writer,
    pairs: impl Iterator<Item = (&'c Coder, &'t Token)>,
) -> Result<usize, AbiError> {
    let mut head = Writer::new();
    let mut tail = Writer::new();
    let mut offsets = Vec::new();

    for (coder, value) in pairs {
        if coder.is_dynamic() {
            let tail_offset = tail.len();
            coder.encode(&mut tail, value)?;
            offsets.push((head.write_updatable_value(), tail_offset));
        } else {
            coder.encode(&mut head, value)?;
        }
    }

    // tail offsets are relative to the start of this list
    let head_len = head.len();
    for (slot, tail_offset) in offsets {
        head.update_value(slot, U256::from(head_len + tail_offset));
    }

    let mut length = writer.append_writer(&head);
    length += writer.append_writer(&tail);
    Ok(length)
}

/// Decode one value per coder from `reader`.
///
/// A buffer overrun aborts the whole decode. Any other failure is kept
/// in the returned list at the position of the field that caused it.
pub fn unpack<'c>(
    reader: &mut Reader<'_>,
    coders: impl IntoIterator<Item = &'c Coder>,
) -> Result<ArgumentList, AbiError> {
    let base = reader.sub_reader(0);
    let mut values = Vec::new();
    let mut names = Vec::new();

    for (index, coder) in coders.into_iter().enumerate() {
        names.push(coder.name());
        let decoded = if coder.is_dynamic() {
            let offset = reader.read_usize()?;
            let mut field_reader = base.sub_reader(offset);
            coder.decode(&mut field_reader)
        } else {
            coder.decode(reader)
        };

        match decoded {
            Ok(token) => values.push(Ok(token)),
            Err(e) if e.is_buffer_overrun() => return Err(e),
            Err(e) => values.push(Err(AbiError::Field {
                index,
                name: coder.name().map(str::to_string),
                type_name: coder.type_name(),
                source: Box::new(e),
            })),
        }
    }

    Ok(ArgumentList::new(values, names.into_iter()))
}

pub(crate) fn unpack_repeated(
    reader: &mut Reader<'_>,
    coder: &Coder,
    count: usize,
) -> Result<ArgumentList, AbiError> {
    unpack(reader, std::iter::repeat(coder).take(count))
}

/// Result of a decode: positional values, each either decoded or carrying
/// the error for that field, plus lookup by unique field name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgumentList {
    values: Vec<Result<Token, AbiError>>,
    names: BTreeMap<String, usize>,
}

impl ArgumentList {
    fn new<'n>(
        values: Vec<Result<Token, AbiError>>,
        names: impl Iterator<Item = Option<&'n str>>,
    ) -> Self {
        let names: Vec<Option<&str>> = names.collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for name in names.iter().flatten() {
            *counts.entry(*name).or_default() += 1;
        }

        let mut projection = BTreeMap::new();
        for (index, name) in names.iter().enumerate() {
            let Some(name) = name else { continue };
            if counts.get(name) != Some(&1) {
                continue;
            }
            let key = if *name == "length" { "_length" } else { *name };
            projection.entry(key.to_string()).or_insert(index);
        }

        Self {
            values,
            names: projection,
        }
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if there are no fields
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw field result at `index`
    pub fn field(&self, index: usize) -> Option<&Result<Token, AbiError>> {
        self.values.get(index)
    }

    /// Decoded value at `index`, or the error recorded for it
    pub fn get(&self, index: usize) -> Result<&Token, AbiError> {
        match self.values.get(index) {
            Some(Ok(token)) => Ok(token),
            Some(Err(e)) => Err(e.clone()),
            None => Err(AbiError::IndexOutOfRange(index)),
        }
    }

    /// Decoded value for a uniquely named field.
    ///
    /// A field called `length` is exposed as `_length`.
    pub fn get_named(&self, name: &str) -> Result<&Token, AbiError> {
        let index = self
            .names
            .get(name)
            .ok_or_else(|| AbiError::UnknownName(name.to_string()))?;
        self.get(*index)
    }

    /// Names with a projection, in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Iterate over field results in order
    pub fn iter(&self) -> impl Iterator<Item = &Result<Token, AbiError>> {
        self.values.iter()
    }

    /// True if any field failed to decode
    pub fn has_errors(&self) -> bool {
        self.values.iter().any(Result::is_err)
    }

    /// All values, or the first field error
    pub fn into_tokens(self) -> Result<Vec<Token>, AbiError> {
        self.values.into_iter().collect()
    }
}
