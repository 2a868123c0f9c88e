//! JSON ABI definitions for embedded contracts

use serde::Deserialize;
use znn_crypto::digest;

use super::coder::Coder;
use super::error::AbiError;
use super::pack::{pack_slice, unpack, ArgumentList};
use super::parser::parse_type;
use super::reader::Reader;
use super::token::Token;
use super::writer::Writer;

/// Length of a function selector in bytes
pub const SELECTOR_LENGTH: usize = 4;

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    #[serde(default)]
    inputs: Vec<RawParam>,
}

#[derive(Debug, Deserialize)]
struct RawParam {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    components: Vec<RawParam>,
}

impl RawParam {
    /// Rebuild a type string, expanding `tuple` from its components
    fn type_string(&self) -> String {
        let kind = match self.kind.strip_prefix("tuple") {
            Some(suffix) => {
                let members: Vec<String> =
                    self.components.iter().map(RawParam::type_string).collect();
                format!("({}){}", members.join(","), suffix)
            }
            None => self.kind.clone(),
        };
        if self.name.is_empty() {
            kind
        } else {
            format!("{} {}", kind, self.name)
        }
    }
}

/// Kind of ABI entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Callable method; encoded with a selector
    Function,
    /// Storage layout; encoded without a selector
    Variable,
}

/// A function or variable with its input coders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiEntry {
    kind: EntryKind,
    name: String,
    inputs: Vec<Coder>,
}

impl AbiEntry {
    /// Entry kind
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Entry name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Input coders
    pub fn inputs(&self) -> &[Coder] {
        &self.inputs
    }

    /// `Name(type1,type2,...)`
    pub fn signature(&self) -> String {
        let types: Vec<String> = self.inputs.iter().map(Coder::type_name).collect();
        format!("{}({})", self.name, types.join(","))
    }

    /// First four bytes of the digest of the signature
    pub fn selector(&self) -> [u8; SELECTOR_LENGTH] {
        let hash = digest(self.signature().as_bytes());
        let mut selector = [0u8; SELECTOR_LENGTH];
        selector.copy_from_slice(&hash.as_bytes()[..SELECTOR_LENGTH]);
        selector
    }

    /// Pack arguments without a selector
    pub fn encode_arguments(&self, values: &[Token]) -> Result<Vec<u8>, AbiError> {
        let mut writer = Writer::new();
        pack_slice(&mut writer, &self.inputs, values)?;
        Ok(writer.into_bytes().to_vec())
    }

    /// Unpack arguments without a selector
    pub fn decode_arguments(&self, data: &[u8]) -> Result<ArgumentList, AbiError> {
        unpack(&mut Reader::new(data), &self.inputs)
    }
}

/// Parsed ABI definition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Abi {
    entries: Vec<AbiEntry>,
}

impl Abi {
    /// Load from a JSON array of `{type, name, inputs}` entries
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        let raw: Vec<RawEntry> =
            serde_json::from_str(json).map_err(|e| AbiError::InvalidDefinition(e.to_string()))?;

        let entries = raw
            .into_iter()
            .map(|entry| {
                let kind = match entry.kind.as_str() {
                    "function" => EntryKind::Function,
                    "variable" => EntryKind::Variable,
                    other => {
                        return Err(AbiError::InvalidDefinition(format!(
                            "unsupported entry type: {}",
                            other
                        )))
                    }
                };
                let inputs = entry
                    .inputs
                    .iter()
                    .map(|p| parse_type(&p.type_string()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(AbiEntry {
                    kind,
                    name: entry.name,
                    inputs,
                })
            })
            .collect::<Result<Vec<_>, AbiError>>()?;

        Ok(Self { entries })
    }

    /// All entries in definition order
    pub fn entries(&self) -> &[AbiEntry] {
        &self.entries
    }

    /// Function entry by name
    pub fn function(&self, name: &str) -> Option<&AbiEntry> {
        self.find(EntryKind::Function, name)
    }

    /// Variable entry by name
    pub fn variable(&self, name: &str) -> Option<&AbiEntry> {
        self.find(EntryKind::Variable, name)
    }

    fn find(&self, kind: EntryKind, name: &str) -> Option<&AbiEntry> {
        self.entries.iter().find(|e| e.kind == kind && e.name == name)
    }

    fn require(&self, kind: EntryKind, name: &str) -> Result<&AbiEntry, AbiError> {
        self.find(kind, name)
            .ok_or_else(|| AbiError::UnknownEntry(name.to_string()))
    }

    /// `selector ‖ packed arguments`
    pub fn encode_function(&self, name: &str, values: &[Token]) -> Result<Vec<u8>, AbiError> {
        let entry = self.require(EntryKind::Function, name)?;
        let mut out = entry.selector().to_vec();
        out.extend(entry.encode_arguments(values)?);
        Ok(out)
    }

    /// Match the selector in `data` and decode the arguments that follow
    pub fn decode_function(&self, data: &[u8]) -> Result<(&AbiEntry, ArgumentList), AbiError> {
        if data.len() < SELECTOR_LENGTH {
            return Err(AbiError::BufferOverrun {
                needed: SELECTOR_LENGTH,
                available: data.len(),
            });
        }
        let (selector, arguments) = data.split_at(SELECTOR_LENGTH);
        let entry = self
            .entries
            .iter()
            .filter(|e| e.kind == EntryKind::Function)
            .find(|e| e.selector() == selector)
            .ok_or_else(|| AbiError::UnknownSelector(hex::encode(selector)))?;
        Ok((entry, entry.decode_arguments(arguments)?))
    }

    /// Pack a variable's values
    pub fn encode_variable(&self, name: &str, values: &[Token]) -> Result<Vec<u8>, AbiError> {
        self.require(EntryKind::Variable, name)?.encode_arguments(values)
    }

    /// Unpack a variable's values
    pub fn decode_variable(&self, name: &str, data: &[u8]) -> Result<ArgumentList, AbiError> {
        self.require(EntryKind::Variable, name)?.decode_arguments(data)
    }
}
