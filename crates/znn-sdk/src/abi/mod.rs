//! ABI encoding and decoding for embedded contract calls
//!
//! Values are laid out in 32-byte words: static values inline in the head,
//! dynamic values as an offset into the tail.
//!
//! # Example
//!
//! ```rust
//! use znn_sdk::abi::{decode, encode, Token};
//!
//! let data = encode(&["uint8[]"], &[Token::Array(vec![1i64.into(), 2i64.into()])]).unwrap();
//! assert_eq!(data.len(), 4 * 32);
//!
//! let values = decode(&["uint8[]"], &data).unwrap();
//! assert_eq!(values.get(0).unwrap().as_slice().map(|v| v.len()), Some(2));
//! ```

mod coder;
mod definition;
mod error;
mod pack;
mod parser;
mod reader;
mod token;
mod writer;

use std::collections::BTreeMap;

pub use coder::{Coder, ParamType, MAX_DEFAULT_LEN};
pub use definition::{Abi, AbiEntry, EntryKind, SELECTOR_LENGTH};
pub use error::AbiError;
pub use pack::{pack, pack_slice, unpack, ArgumentList};
pub use parser::{parse_type, parse_types};
pub use reader::Reader;
pub use token::{Token, I256};
pub use writer::{Slot, Writer, WORD_SIZE};

/// Encode positional values against a list of type strings
pub fn encode<S: AsRef<str>>(types: &[S], values: &[Token]) -> Result<Vec<u8>, AbiError> {
    if types.len() != values.len() {
        return Err(AbiError::LengthMismatch {
            expected: types.len(),
            got: values.len(),
        });
    }
    let coders = parse_types(types)?;
    let mut writer = Writer::new();
    pack_slice(&mut writer, &coders, values)?;
    Ok(writer.into_bytes().to_vec())
}

/// Encode values keyed by the parameter names in `types`
pub fn encode_named<S: AsRef<str>>(
    types: &[S],
    values: &BTreeMap<String, Token>,
) -> Result<Vec<u8>, AbiError> {
    let coders = parse_types(types)?;
    let mut writer = Writer::new();
    pack(&mut writer, &coders, &Token::Named(values.clone()))?;
    Ok(writer.into_bytes().to_vec())
}

/// Decode `data` against a list of type strings
pub fn decode<S: AsRef<str>>(types: &[S], data: &[u8]) -> Result<ArgumentList, AbiError> {
    let coders = parse_types(types)?;
    unpack(&mut Reader::new(data), &coders)
}

/// Decode tolerating a short final word for dynamic bytes
pub fn decode_loose<S: AsRef<str>>(types: &[S], data: &[u8]) -> Result<ArgumentList, AbiError> {
    let coders = parse_types(types)?;
    unpack(&mut Reader::new_loose(data), &coders)
}

/// Zero values for a list of type strings
pub fn default_value<S: AsRef<str>>(types: &[S]) -> Result<Vec<Token>, AbiError> {
    parse_types(types)?.iter().map(Coder::default_value).collect()
}
