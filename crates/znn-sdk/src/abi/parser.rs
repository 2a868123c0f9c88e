//! Type-string parser
//!
//! Grammar:
//!
//! ```text
//! param    := type [name]
//! type     := base ("[" digits? "]")*
//! base     := "(" params ")" | ident "(" params ")" | ident
//! params   := [param ("," param)*]
//! ```
//!
//! `ident "(" ... ")"` covers both `tuple(...)` and named signatures
//! such as `Fuse(address)`.

use super::coder::{Coder, ParamType};
use super::error::AbiError;

/// Parse a single type string such as `uint256`, `(address,bytes)[] items`
/// or `Deposit(uint256 amount)`
pub fn parse_type(input: &str) -> Result<Coder, AbiError> {
    let mut parser = Parser::new(input);
    let coder = parser.param()?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing characters"));
    }
    Ok(coder)
}

/// Parse a list of type strings
pub fn parse_types<S: AsRef<str>>(types: &[S]) -> Result<Vec<Coder>, AbiError> {
    types.iter().map(|t| parse_type(t.as_ref())).collect()
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn error(&self, reason: &str) -> AbiError {
        AbiError::InvalidType(format!("{} in {:?} at {}", reason, self.input, self.pos))
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> Result<(), AbiError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", c)))
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
            self.pos += c.len_utf8();
        }
    }

    fn ident(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_' || c == '$') {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    fn param(&mut self) -> Result<Coder, AbiError> {
        self.skip_whitespace();
        let kind = self.type_expr()?;
        self.skip_whitespace();
        let name = self.ident();
        let name = (!name.is_empty()).then(|| name.to_string());
        Ok(Coder::new(kind).with_name(name))
    }

    fn type_expr(&mut self) -> Result<ParamType, AbiError> {
        let mut kind = self.base()?;
        loop {
            self.skip_whitespace();
            if !self.eat('[') {
                break;
            }
            let digits = self.ident();
            let element = Box::new(Coder::new(kind));
            kind = if digits.is_empty() {
                ParamType::Array(element)
            } else {
                let len = digits
                    .parse::<usize>()
                    .map_err(|_| self.error("invalid array length"))?;
                ParamType::FixedArray(element, len)
            };
            self.expect(']')?;
        }
        Ok(kind)
    }

    fn base(&mut self) -> Result<ParamType, AbiError> {
        if self.peek() == Some('(') {
            return self.tuple();
        }
        let ident = self.ident();
        if ident.is_empty() {
            return Err(self.error("expected type"));
        }
        if self.peek() == Some('(') {
            // `tuple(...)` or a signature-style `Name(...)`
            return self.tuple();
        }
        elementary(ident).ok_or_else(|| AbiError::InvalidType(ident.to_string()))
    }

    fn tuple(&mut self) -> Result<ParamType, AbiError> {
        self.expect('(')?;
        let mut members = Vec::new();
        self.skip_whitespace();
        if !self.eat(')') {
            loop {
                members.push(self.param()?);
                self.skip_whitespace();
                if self.eat(')') {
                    break;
                }
                self.expect(',')?;
            }
        }
        Ok(ParamType::Tuple(members))
    }
}

fn elementary(ident: &str) -> Option<ParamType> {
    match ident {
        "address" => return Some(ParamType::Address),
        "tokenStandard" => return Some(ParamType::TokenStandard),
        "hash" => return Some(ParamType::Hash),
        "bool" => return Some(ParamType::Bool),
        "string" => return Some(ParamType::String),
        "bytes" => return Some(ParamType::Bytes),
        _ => {}
    }

    if let Some(bits) = ident.strip_prefix("uint") {
        return int_width(bits).map(ParamType::Uint);
    }
    if let Some(bits) = ident.strip_prefix("int") {
        return int_width(bits).map(ParamType::Int);
    }
    if let Some(size) = ident.strip_prefix("bytes") {
        let size: usize = size.parse().ok()?;
        return (1..=32).contains(&size).then_some(ParamType::FixedBytes(size));
    }
    None
}

fn int_width(digits: &str) -> Option<usize> {
    if digits.is_empty() {
        return Some(256);
    }
    let bits: usize = digits.parse().ok()?;
    (bits > 0 && bits <= 256 && bits % 8 == 0).then_some(bits)
}
