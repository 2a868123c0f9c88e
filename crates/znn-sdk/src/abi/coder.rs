//! Coders: one variant per wire type

use znn_primitives::{Address, Hash, TokenStandard, U256};

use super::error::AbiError;
use super::pack::{pack, pack_repeated, unpack, unpack_repeated};
use super::reader::Reader;
use super::token::{Token, I256};
use super::writer::{Writer, WORD_SIZE};

/// Largest encoded head, in bytes, for which a default value is built
pub const MAX_DEFAULT_LEN: usize = 1 << 24;

/// Wire type of a coder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// Account address (20-byte core, right-aligned)
    Address,
    /// Token standard (10-byte core, right-aligned)
    TokenStandard,
    /// Ledger hash (full word)
    Hash,
    /// Boolean
    Bool,
    /// Unsigned integer with bit width
    Uint(usize),
    /// Signed integer with bit width
    Int(usize),
    /// Fixed-size bytes (1-32), left-aligned
    FixedBytes(usize),
    /// Length-prefixed bytes
    Bytes,
    /// Length-prefixed UTF-8 string
    String,
    /// Length-prefixed array
    Array(Box<Coder>),
    /// Fixed-length array
    FixedArray(Box<Coder>, usize),
    /// Tuple of named or anonymous members
    Tuple(Vec<Coder>),
}

impl ParamType {
    /// Check if this type is dynamic (variable length)
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(inner, _) => inner.is_dynamic(),
            ParamType::Tuple(members) => members.iter().any(Coder::is_dynamic),
            _ => false,
        }
    }

    /// Canonical type string, as used in signatures
    pub fn type_name(&self) -> String {
        match self {
            ParamType::Address => "address".to_string(),
            ParamType::TokenStandard => "tokenStandard".to_string(),
            ParamType::Hash => "hash".to_string(),
            ParamType::Bool => "bool".to_string(),
            ParamType::Uint(bits) => format!("uint{}", bits),
            ParamType::Int(bits) => format!("int{}", bits),
            ParamType::FixedBytes(size) => format!("bytes{}", size),
            ParamType::Bytes => "bytes".to_string(),
            ParamType::String => "string".to_string(),
            ParamType::Array(inner) => format!("{}[]", inner.type_name()),
            ParamType::FixedArray(inner, len) => format!("{}[{}]", inner.type_name(), len),
            ParamType::Tuple(members) => {
                let inner: Vec<String> = members.iter().map(Coder::type_name).collect();
                format!("({})", inner.join(","))
            }
        }
    }
}

/// A wire type with an optional field name.
///
/// `dynamic` is derived from the type when the coder is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coder {
    kind: ParamType,
    name: Option<String>,
    dynamic: bool,
}

impl Coder {
    /// Unnamed coder
    pub fn new(kind: ParamType) -> Self {
        let dynamic = kind.is_dynamic();
        Self {
            kind,
            name: None,
            dynamic,
        }
    }

    /// Named coder
    pub fn named(kind: ParamType, name: impl Into<String>) -> Self {
        Self::new(kind).with_name(Some(name.into()))
    }

    /// Replace the field name; empty names count as absent
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name.filter(|n| !n.is_empty());
        self
    }

    /// Wire type
    pub fn kind(&self) -> &ParamType {
        &self.kind
    }

    /// Field name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether the value lives in the tail section
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Canonical type string
    pub fn type_name(&self) -> String {
        self.kind.type_name()
    }

    /// Bytes this coder takes in the head of its enclosing list.
    ///
    /// Dynamic coders take one offset word. Saturates instead of overflowing.
    pub fn head_size(&self) -> usize {
        if self.dynamic {
            return WORD_SIZE;
        }
        match &self.kind {
            ParamType::FixedArray(inner, len) => len.saturating_mul(inner.head_size()),
            ParamType::Tuple(members) => members
                .iter()
                .fold(0usize, |total, member| total.saturating_add(member.head_size())),
            _ => WORD_SIZE,
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> AbiError {
        AbiError::invalid_value(self.type_name(), reason)
    }

    fn fixed_bytes_size(&self, size: usize) -> Result<usize, AbiError> {
        if (1..=WORD_SIZE).contains(&size) {
            Ok(size)
        } else {
            Err(AbiError::InvalidType(self.type_name()))
        }
    }

    /// Value used when a field is absent.
    ///
    /// Fails for malformed `bytesN` sizes and for fixed arrays whose encoded
    /// head exceeds [`MAX_DEFAULT_LEN`].
    pub fn default_value(&self) -> Result<Token, AbiError> {
        Ok(match &self.kind {
            ParamType::Address => Token::Address(Address::EMPTY),
            ParamType::TokenStandard => Token::TokenStandard(TokenStandard::EMPTY),
            ParamType::Hash => Token::Hash(Hash::EMPTY),
            ParamType::Bool => Token::Bool(false),
            ParamType::Uint(bits) | ParamType::Int(bits) => zero_for(*bits),
            ParamType::FixedBytes(size) => Token::Bytes(vec![0u8; self.fixed_bytes_size(*size)?]),
            ParamType::Bytes => Token::Bytes(Vec::new()),
            ParamType::String => Token::String(String::new()),
            ParamType::Array(_) => Token::Array(Vec::new()),
            ParamType::FixedArray(inner, len) => {
                if repeated_len(inner, *len) > MAX_DEFAULT_LEN {
                    return Err(AbiError::InvalidType(format!(
                        "{} is too large for a default value",
                        self.type_name()
                    )));
                }
                Token::Array(vec![inner.default_value()?; *len])
            }
            ParamType::Tuple(members) => Token::Tuple(
                members
                    .iter()
                    .map(Coder::default_value)
                    .collect::<Result<_, _>>()?,
            ),
        })
    }

    /// Encode `value` into `writer`, returning the number of bytes written
    pub fn encode(&self, writer: &mut Writer, value: &Token) -> Result<usize, AbiError> {
        match &self.kind {
            ParamType::Address => {
                let address = match value {
                    Token::Address(a) => *a,
                    Token::String(s) => Address::parse(s).map_err(|e| self.invalid(e.to_string()))?,
                    _ => return Err(self.invalid("expected address")),
                };
                Ok(writer.write_bytes(&right_aligned(address.as_bytes())))
            }
            ParamType::TokenStandard => {
                let zts = match value {
                    Token::TokenStandard(t) => *t,
                    Token::String(s) => {
                        TokenStandard::parse(s).map_err(|e| self.invalid(e.to_string()))?
                    }
                    _ => return Err(self.invalid("expected token standard")),
                };
                Ok(writer.write_bytes(&right_aligned(zts.as_bytes())))
            }
            ParamType::Hash => {
                let hash = match value {
                    Token::Hash(h) => *h,
                    Token::Bytes(b) => {
                        Hash::from_slice(b).map_err(|e| self.invalid(e.to_string()))?
                    }
                    Token::String(s) => {
                        let bare = s.strip_prefix("0x").unwrap_or(s);
                        Hash::parse(bare).map_err(|e| self.invalid(e.to_string()))?
                    }
                    _ => return Err(self.invalid("expected hash")),
                };
                Ok(writer.write_bytes(hash.as_bytes()))
            }
            ParamType::Bool => {
                let flag = value.as_bool().ok_or_else(|| self.invalid("expected bool"))?;
                Ok(writer.write_value(if flag { U256::one() } else { U256::zero() }))
            }
            ParamType::Uint(bits) | ParamType::Int(bits) => {
                let signed = matches!(self.kind, ParamType::Int(_));
                let number = value.as_int().ok_or_else(|| self.invalid("expected number"))?;
                if !number.fits(*bits, signed) {
                    return Err(AbiError::OutOfBounds(self.type_name()));
                }
                Ok(writer.write_value(number.to_twos_complement()))
            }
            ParamType::FixedBytes(size) => {
                let size = self.fixed_bytes_size(*size)?;
                let bytes = value.as_bytes().ok_or_else(|| self.invalid("expected bytes"))?;
                if bytes.len() != size {
                    return Err(self.invalid(format!(
                        "incorrect data length: expected {}, got {}",
                        size,
                        bytes.len()
                    )));
                }
                Ok(writer.write_bytes(bytes))
            }
            ParamType::Bytes => {
                let bytes = value.as_bytes().ok_or_else(|| self.invalid("expected bytes"))?;
                Ok(write_dynamic_bytes(writer, bytes))
            }
            ParamType::String => {
                let s = value.as_str().ok_or_else(|| self.invalid("expected string"))?;
                Ok(write_dynamic_bytes(writer, s.as_bytes()))
            }
            ParamType::Array(inner) => {
                let items = value.as_slice().ok_or_else(|| self.invalid("expected array value"))?;
                let mut length = writer.write_value(U256::from(items.len()));
                length += pack_repeated(writer, inner, items)?;
                Ok(length)
            }
            ParamType::FixedArray(inner, len) => {
                let items = value.as_slice().ok_or_else(|| self.invalid("expected array value"))?;
                if items.len() < *len {
                    return Err(self.invalid(format!(
                        "missing argument: expected {} elements, got {}",
                        len,
                        items.len()
                    )));
                }
                if items.len() > *len {
                    return Err(self.invalid(format!(
                        "too many arguments: expected {} elements, got {}",
                        len,
                        items.len()
                    )));
                }
                pack_repeated(writer, inner, items)
            }
            ParamType::Tuple(members) => pack(writer, members, value),
        }
    }

    /// Decode one value from `reader`
    pub fn decode(&self, reader: &mut Reader<'_>) -> Result<Token, AbiError> {
        match &self.kind {
            ParamType::Address => {
                let word = reader.read_bytes(WORD_SIZE, false)?;
                let address = Address::from_slice(&word[WORD_SIZE - Address::LEN..])
                    .map_err(|e| self.invalid(e.to_string()))?;
                Ok(Token::Address(address))
            }
            ParamType::TokenStandard => {
                let word = reader.read_bytes(WORD_SIZE, false)?;
                let zts = TokenStandard::from_slice(&word[WORD_SIZE - TokenStandard::LEN..])
                    .map_err(|e| self.invalid(e.to_string()))?;
                Ok(Token::TokenStandard(zts))
            }
            ParamType::Hash => {
                let word = reader.read_bytes(WORD_SIZE, false)?;
                let hash = Hash::from_slice(word).map_err(|e| self.invalid(e.to_string()))?;
                Ok(Token::Hash(hash))
            }
            ParamType::Bool => Ok(Token::Bool(!reader.read_value()?.is_zero())),
            ParamType::Uint(bits) | ParamType::Int(bits) => {
                let signed = matches!(self.kind, ParamType::Int(_));
                let number = I256::from_word(reader.read_value()?, *bits, signed);
                Ok(match number.to_i64() {
                    Some(n) if *bits < 64 => Token::Number(n),
                    _ => Token::BigInt(number),
                })
            }
            ParamType::FixedBytes(size) => {
                let size = self.fixed_bytes_size(*size)?;
                let word = reader.read_bytes(WORD_SIZE, false)?;
                Ok(Token::Bytes(word[..size].to_vec()))
            }
            ParamType::Bytes => Ok(Token::Bytes(read_dynamic_bytes(reader)?.to_vec())),
            ParamType::String => {
                let bytes = read_dynamic_bytes(reader)?;
                let s = std::str::from_utf8(bytes).map_err(|_| AbiError::InvalidUtf8)?;
                Ok(Token::String(s.to_string()))
            }
            ParamType::Array(inner) => {
                let count = reader.read_usize()?;
                check_repeated(reader, inner, count)?;
                let list = unpack_repeated(reader, inner, count)?;
                Ok(Token::Array(list.into_tokens()?))
            }
            ParamType::FixedArray(inner, len) => {
                check_repeated(reader, inner, *len)?;
                let list = unpack_repeated(reader, inner, *len)?;
                Ok(Token::Array(list.into_tokens()?))
            }
            ParamType::Tuple(members) => {
                let list = unpack(reader, members)?;
                Ok(Token::Tuple(list.into_tokens()?))
            }
        }
    }
}

/// Head bytes taken by `count` elements; zero-sized elements count one byte
fn repeated_len(inner: &Coder, count: usize) -> usize {
    count.saturating_mul(inner.head_size().max(1))
}

fn check_repeated(reader: &Reader<'_>, inner: &Coder, count: usize) -> Result<(), AbiError> {
    let needed = repeated_len(inner, count);
    if needed > reader.remaining() {
        return Err(AbiError::BufferOverrun {
            needed,
            available: reader.remaining(),
        });
    }
    Ok(())
}

fn zero_for(bits: usize) -> Token {
    if bits < 64 {
        Token::Number(0)
    } else {
        Token::BigInt(I256::default())
    }
}

fn right_aligned(core: &[u8]) -> [u8; WORD_SIZE] {
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - core.len()..].copy_from_slice(core);
    word
}

fn write_dynamic_bytes(writer: &mut Writer, bytes: &[u8]) -> usize {
    let length = writer.write_value(U256::from(bytes.len()));
    length + writer.write_bytes(bytes)
}

fn read_dynamic_bytes<'a>(reader: &mut Reader<'a>) -> Result<&'a [u8], AbiError> {
    let length = reader.read_usize()?;
    reader.read_bytes(length, true)
}
