//! Core type definitions for Waypoint
//!
//! Move type tags, their canonical text rendering, and coin metadata. The
//! canonical full name (e.g. `0x1::aptos_coin::AptosCoin<..>`) is the
//! identity key for tokens throughout the workspace.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::TypeTagError;

/// A Move type tag as it appears in resource types and entry-function
/// type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(StructTag),
    /// `$tvN` placeholder for the N-th type parameter
    TypeParam(usize),
}

/// A qualified Move struct type: `address::module::Name<params...>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructTag {
    pub address: String,
    pub module: String,
    pub name: String,
    pub type_params: Vec<TypeTag>,
}

impl TypeTag {
    /// Parse a type tag from its canonical text form.
    pub fn parse(s: &str) -> Result<Self, TypeTagError> {
        s.parse()
    }

    /// The struct tag, if this is a struct type.
    pub fn struct_tag(&self) -> Option<&StructTag> {
        match self {
            TypeTag::Struct(tag) => Some(tag),
            _ => None,
        }
    }

    /// Canonical text rendering (same as `Display`).
    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl StructTag {
    /// Parse a struct tag, rejecting atomic/vector/type-param tags.
    pub fn parse(s: &str) -> Result<Self, TypeTagError> {
        s.parse()
    }

    /// Canonical text rendering (same as `Display`).
    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::U8 => write!(f, "u8"),
            TypeTag::U64 => write!(f, "u64"),
            TypeTag::U128 => write!(f, "u128"),
            TypeTag::Address => write!(f, "address"),
            TypeTag::Signer => write!(f, "signer"),
            TypeTag::Vector(element) => write!(f, "vector<{}>", element),
            TypeTag::Struct(tag) => write!(f, "{}", tag),
            TypeTag::TypeParam(idx) => write!(f, "$tv{}", idx),
        }
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)?;
        if !self.type_params.is_empty() {
            let params: Vec<String> = self.type_params.iter().map(|p| p.to_string()).collect();
            write!(f, "<{}>", params.join(", "))?;
        }
        Ok(())
    }
}

impl FromStr for TypeTag {
    type Err = TypeTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, rest) = parse_prefix(s)?;
        if !rest.is_empty() {
            return Err(TypeTagError::Invalid(s.to_string()));
        }
        Ok(tag)
    }
}

impl FromStr for StructTag {
    type Err = TypeTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match TypeTag::from_str(s)? {
            TypeTag::Struct(tag) => Ok(tag),
            _ => Err(TypeTagError::NotAStruct(s.to_string())),
        }
    }
}

const ATOMIC_TAGS: [(&str, TypeTag); 6] = [
    ("bool", TypeTag::Bool),
    ("u8", TypeTag::U8),
    ("u64", TypeTag::U64),
    ("u128", TypeTag::U128),
    ("address", TypeTag::Address),
    ("signer", TypeTag::Signer),
];

/// Parse one type tag off the front of `input`, returning the remainder.
fn parse_prefix(input: &str) -> Result<(TypeTag, &str), TypeTagError> {
    for (name, tag) in ATOMIC_TAGS {
        if let Some(rest) = input.strip_prefix(name) {
            // Atomic names must end at a separator, not mid-identifier
            if rest.is_empty() || rest.starts_with(',') || rest.starts_with('>') {
                return Ok((tag, rest));
            }
        }
    }

    if let Some(inner) = input.strip_prefix("vector<") {
        let (element, rest) = parse_prefix(inner)?;
        let rest = rest
            .strip_prefix('>')
            .ok_or_else(|| TypeTagError::Invalid(input.to_string()))?;
        return Ok((TypeTag::Vector(Box::new(element)), rest));
    }

    if input.contains("::") {
        let (tag, rest) = parse_struct_prefix(input)?;
        return Ok((TypeTag::Struct(tag), rest));
    }

    if let Some(digits) = input.strip_prefix("$tv") {
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        if end == 0 {
            return Err(TypeTagError::Invalid(input.to_string()));
        }
        let idx: usize = digits[..end]
            .parse()
            .map_err(|_| TypeTagError::Invalid(input.to_string()))?;
        return Ok((TypeTag::TypeParam(idx), &digits[end..]));
    }

    Err(TypeTagError::Invalid(input.to_string()))
}

fn parse_struct_prefix(input: &str) -> Result<(StructTag, &str), TypeTagError> {
    let invalid = || TypeTagError::Invalid(input.to_string());

    let (address, rest) = split_double_colon(input).ok_or_else(invalid)?;
    let (module, rest) = split_double_colon(rest).ok_or_else(invalid)?;
    if address.is_empty() || module.is_empty() {
        return Err(invalid());
    }

    // Generic struct: an identifier immediately followed by '<'
    if let Some(open) = generic_name_end(rest) {
        let name = &rest[..open];
        let mut remaining = &rest[open + 1..];
        let mut type_params = Vec::new();
        loop {
            let (param, after) = parse_prefix(remaining)?;
            type_params.push(param);
            if let Some(after) = after.strip_prefix('>') {
                return Ok((
                    StructTag {
                        address: address.to_string(),
                        module: module.to_string(),
                        name: name.to_string(),
                        type_params,
                    },
                    after,
                ));
            } else if let Some(after) = after.strip_prefix(", ") {
                remaining = after;
            } else if let Some(after) = after.strip_prefix(',') {
                remaining = after;
            } else {
                return Err(invalid());
            }
        }
    }

    let end = rest.find([',', '>']).unwrap_or(rest.len());
    let name = &rest[..end];
    if name.is_empty() {
        return Err(invalid());
    }
    Ok((
        StructTag {
            address: address.to_string(),
            module: module.to_string(),
            name: name.to_string(),
            type_params: Vec::new(),
        },
        &rest[end..],
    ))
}

fn split_double_colon(s: &str) -> Option<(&str, &str)> {
    let idx = s.find("::")?;
    Some((&s[..idx], &s[idx + 2..]))
}

/// If `s` starts with `identifier<`, return the byte index of the `<`.
fn generic_name_end(s: &str) -> Option<usize> {
    let mut chars = s.char_indices();
    let (_, first) = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    for (i, c) in chars {
        if c == '<' {
            return Some(i);
        }
        if !(c.is_ascii_alphanumeric() || c == '_') {
            return None;
        }
    }
    None
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TypeTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl Serialize for StructTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for StructTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Token metadata, keyed across the workspace by `full_name()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub token_type: TypeTag,
}

impl CoinInfo {
    /// Canonical identity key for this coin.
    pub fn full_name(&self) -> String {
        self.token_type.to_string()
    }
}

impl fmt::Display for CoinInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.symbol, self.token_type)
    }
}
