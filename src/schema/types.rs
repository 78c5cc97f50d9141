use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized description of one attestation type
///
/// Serialized as the per-type JSON config; field order is the emitted key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRecord {
    /// Canonical attestation type identifier (`@custom:name`)
    pub name: String,
    /// Raw interface doc comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_comment: Option<String>,
    pub description: String,
    pub verification: String,
    /// Lowest-used-timestamp policy
    pub lut: String,
    pub proof: StructRecord,
    pub request: StructRecord,
    pub response: StructRecord,
    pub request_body: StructRecord,
    pub response_body: StructRecord,
    /// Auxiliary structs declared after `RequestBody`, in declaration order
    pub request_structs: Vec<StructRecord>,
    /// Auxiliary structs declared after `ResponseBody`, in declaration order
    pub response_structs: Vec<StructRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_abi: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_abi: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_abi: Option<Value>,
}

impl TypeRecord {
    /// Attach the ABI shapes read from the compiled temporary contract.
    pub fn with_abis(mut self, abis: AbiDefinitions) -> Self {
        self.request_abi = Some(abis.request_abi);
        self.response_abi = Some(abis.response_abi);
        self.proof_abi = Some(abis.proof_abi);
        self
    }
}

/// One Solidity struct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructRecord {
    pub name: String,
    pub description: String,
    /// Text placed above the struct in generated documentation
    pub above: String,
    /// Text placed below the struct in generated documentation
    pub below: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_comment: Option<String>,
    /// Members in declaration order
    pub params: Vec<ParamRecord>,
}

/// One struct member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamRecord {
    pub name: String,
    /// Full type string, e.g. `struct IPayment.Proof` or `uint256[3]`
    #[serde(rename = "type")]
    pub ty: String,
    /// `ty` with the namespace prefix stripped
    pub type_simple: String,
    pub comment: String,
}

/// `inputs[0]` of the `request`, `response` and `proof` functions of a temporary contract
#[derive(Debug, Clone, PartialEq)]
pub struct AbiDefinitions {
    pub request_abi: Value,
    pub response_abi: Value,
    pub proof_abi: Value,
}
