use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use thiserror::Error;

#[allow(clippy::expect_used)]
static ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+)\[(\d*)\]$").expect("valid array type regex"));
#[allow(clippy::expect_used)]
static INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(u?)int(\d+)$").expect("valid integer type regex"));
#[allow(clippy::expect_used)]
static BYTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^bytes(\d*)$").expect("valid bytes type regex"));
#[allow(clippy::expect_used)]
static STRUCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^struct ([\w.]+)$").expect("valid struct type regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeMappingError {
    #[error("Unknown type {0}")]
    Unknown(String),
}

/// The subset of Solidity types attestation structs may use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolidityType {
    /// `uintN`
    Uint(u16),
    /// `intN`
    Int(u16),
    Bool,
    /// `bytesN` or dynamic `bytes`
    Bytes(Option<u8>),
    Address,
    String,
    Byte,
    /// `T[N]` or `T[]`
    Array {
        element: Box<SolidityType>,
        len: Option<usize>,
    },
    /// `struct Ns.Name`, holding the qualified name
    Struct(String),
}

impl SolidityType {
    /// Parse a solc type string such as `uint256`, `bytes32[]` or `struct IPayment.Proof`.
    ///
    /// # Errors
    ///
    /// [`TypeMappingError::Unknown`] for anything outside the supported grammar.
    pub fn parse(type_string: &str) -> Result<Self, TypeMappingError> {
        let unknown = || TypeMappingError::Unknown(type_string.to_string());
        let ty = type_string.trim();

        if let Some(caps) = ARRAY.captures(ty) {
            let element = SolidityType::parse(&caps[1]).map_err(|_| unknown())?;
            let len = match &caps[2] {
                "" => None,
                digits => Some(digits.parse().map_err(|_| unknown())?),
            };
            return Ok(SolidityType::Array {
                element: Box::new(element),
                len,
            });
        }
        if let Some(caps) = INTEGER.captures(ty) {
            let bits = caps[2].parse().map_err(|_| unknown())?;
            return Ok(if caps[1].is_empty() {
                SolidityType::Int(bits)
            } else {
                SolidityType::Uint(bits)
            });
        }
        if let Some(caps) = BYTES.captures(ty) {
            let len = match &caps[1] {
                "" => None,
                digits => Some(digits.parse().map_err(|_| unknown())?),
            };
            return Ok(SolidityType::Bytes(len));
        }
        if let Some(caps) = STRUCT.captures(ty) {
            return Ok(SolidityType::Struct(caps[1].to_string()));
        }
        match ty {
            "bool" => Ok(SolidityType::Bool),
            "address" => Ok(SolidityType::Address),
            "string" => Ok(SolidityType::String),
            "byte" => Ok(SolidityType::Byte),
            _ => Err(unknown()),
        }
    }

    /// Struct name without its namespace: `IPayment.Proof` → `Proof`.
    pub fn struct_name(&self) -> Option<&str> {
        match self {
            SolidityType::Struct(path) => path.rsplit('.').next(),
            _ => None,
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, SolidityType::Struct(_))
    }

    /// TypeScript type of the plain type declarations.
    ///
    /// Structs refer to the interface of the same namespace by simple name.
    pub fn ts_type(&self) -> String {
        match self {
            SolidityType::Array { element, .. } => format!("({})[]", element.ts_type()),
            SolidityType::Uint(_)
            | SolidityType::Int(_)
            | SolidityType::Bytes(_)
            | SolidityType::Address
            | SolidityType::String
            | SolidityType::Byte => "string".to_string(),
            SolidityType::Bool => "boolean".to_string(),
            SolidityType::Struct(path) => path.rsplit('.').next().unwrap_or(path).to_string(),
        }
    }

    /// TypeScript type of a DTO field; structs map to `<attestation type>_<Name>` classes.
    pub fn dto_type(&self, attestation_type: &str) -> String {
        match self {
            SolidityType::Array { element, .. } => format!("{}[]", element.dto_type(attestation_type)),
            SolidityType::Bool => "boolean".to_string(),
            SolidityType::Struct(path) => {
                format!("{attestation_type}_{}", path.rsplit('.').next().unwrap_or(path))
            }
            _ => "string".to_string(),
        }
    }
}

impl fmt::Display for SolidityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolidityType::Uint(bits) => write!(f, "uint{bits}"),
            SolidityType::Int(bits) => write!(f, "int{bits}"),
            SolidityType::Bool => write!(f, "bool"),
            SolidityType::Bytes(Some(len)) => write!(f, "bytes{len}"),
            SolidityType::Bytes(None) => write!(f, "bytes"),
            SolidityType::Address => write!(f, "address"),
            SolidityType::String => write!(f, "string"),
            SolidityType::Byte => write!(f, "byte"),
            SolidityType::Array { element, len: Some(len) } => write!(f, "{element}[{len}]"),
            SolidityType::Array { element, len: None } => write!(f, "{element}[]"),
            SolidityType::Struct(path) => write!(f, "struct {path}"),
        }
    }
}
