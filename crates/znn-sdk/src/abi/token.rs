//! Values accepted by and produced from the codec

use std::collections::BTreeMap;
use std::fmt;
use znn_primitives::{Address, Hash, TokenStandard, U256};

/// A codec value.
///
/// Integers narrower than 64 bits decode to [`Token::Number`]; wider ones
/// decode to [`Token::BigInt`]. Either form is accepted when encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Integer that fits a machine word
    Number(i64),
    /// Arbitrary-width signed integer
    BigInt(I256),
    /// Boolean
    Bool(bool),
    /// Account address
    Address(Address),
    /// Token standard
    TokenStandard(TokenStandard),
    /// Ledger hash
    Hash(Hash),
    /// Dynamic or fixed-size bytes
    Bytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Array elements
    Array(Vec<Token>),
    /// Tuple members in declaration order
    Tuple(Vec<Token>),
    /// Tuple members keyed by field name (encode input only)
    Named(BTreeMap<String, Token>),
}

impl Token {
    /// Integer view of a numeric token
    pub fn as_int(&self) -> Option<I256> {
        match self {
            Token::Number(n) => Some(I256::from(*n)),
            Token::BigInt(i) => Some(*i),
            _ => None,
        }
    }

    /// Unsigned view of a non-negative numeric token
    pub fn as_u256(&self) -> Option<U256> {
        self.as_int().filter(|i| !i.is_negative()).map(|i| i.abs())
    }

    /// Boolean view
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Token::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Address view
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            Token::Address(a) => Some(a),
            _ => None,
        }
    }

    /// Byte view
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Token::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// String view
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Token::String(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of an array or tuple
    pub fn as_slice(&self) -> Option<&[Token]> {
        match self {
            Token::Array(items) | Token::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

impl From<i64> for Token {
    fn from(value: i64) -> Self {
        Token::Number(value)
    }
}

impl From<u64> for Token {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => Token::Number(n),
            Err(_) => Token::BigInt(I256::from(U256::from(value))),
        }
    }
}

impl From<U256> for Token {
    fn from(value: U256) -> Self {
        Token::BigInt(I256::from(value))
    }
}

impl From<I256> for Token {
    fn from(value: I256) -> Self {
        Token::BigInt(value)
    }
}

impl From<bool> for Token {
    fn from(value: bool) -> Self {
        Token::Bool(value)
    }
}

impl From<Address> for Token {
    fn from(value: Address) -> Self {
        Token::Address(value)
    }
}

impl From<TokenStandard> for Token {
    fn from(value: TokenStandard) -> Self {
        Token::TokenStandard(value)
    }
}

impl From<Hash> for Token {
    fn from(value: Hash) -> Self {
        Token::Hash(value)
    }
}

impl From<Vec<u8>> for Token {
    fn from(value: Vec<u8>) -> Self {
        Token::Bytes(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::String(value.to_string())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token::String(value)
    }
}

/// Signed 256-bit integer stored as sign and magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct I256 {
    abs: U256,
    negative: bool,
}

impl I256 {
    /// Create from magnitude and sign; zero is never negative
    pub fn new(abs: U256, negative: bool) -> Self {
        Self {
            abs,
            negative: negative && !abs.is_zero(),
        }
    }

    /// Create from i128
    pub fn from_i128(value: i128) -> Self {
        Self::new(U256::from(value.unsigned_abs()), value < 0)
    }

    /// Magnitude
    pub fn abs(&self) -> U256 {
        self.abs
    }

    /// Sign
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }

    /// Narrow to i64 when the value fits
    pub fn to_i64(&self) -> Option<i64> {
        if self.abs.bits() > 64 {
            return None;
        }
        let magnitude = self.abs.low_u64();
        if self.negative {
            if magnitude == 1u64 << 63 {
                Some(i64::MIN)
            } else {
                i64::try_from(magnitude).ok().map(|m| -m)
            }
        } else {
            i64::try_from(magnitude).ok()
        }
    }

    /// Canonical hex form, `0x..` or `-0x..`
    pub fn to_hex_string(&self) -> String {
        let sign = if self.negative { "-" } else { "" };
        format!("{}0x{:x}", sign, self.abs)
    }

    /// True when the value is representable in `bits` bits
    pub fn fits(&self, bits: usize, signed: bool) -> bool {
        if !signed {
            return !self.negative && self.abs.bits() <= bits;
        }
        if bits == 0 {
            return false;
        }
        let limit = U256::one() << (bits - 1);
        if self.negative {
            self.abs <= limit
        } else {
            self.abs < limit
        }
    }

    /// Two's complement over the full 256-bit word
    pub fn to_twos_complement(&self) -> U256 {
        if self.negative {
            (!self.abs).overflowing_add(U256::one()).0
        } else {
            self.abs
        }
    }

    /// Interpret the low `bits` of `word` as an integer
    pub fn from_word(word: U256, bits: usize, signed: bool) -> Self {
        let masked = if bits >= 256 {
            word
        } else {
            word & ((U256::one() << bits) - U256::one())
        };

        if !signed || bits == 0 || !masked.bit(bits - 1) {
            return Self::new(masked, false);
        }

        let abs = if bits >= 256 {
            (!masked).overflowing_add(U256::one()).0
        } else {
            (U256::one() << bits) - masked
        };
        Self::new(abs, true)
    }
}

impl From<i64> for I256 {
    fn from(value: i64) -> Self {
        Self::new(U256::from(value.unsigned_abs()), value < 0)
    }
}

impl From<U256> for I256 {
    fn from(value: U256) -> Self {
        Self::new(value, false)
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.abs)
    }
}
