use serde::Deserialize;

/// Root node of a solc AST for one source file
///
/// Only the parts the schema extractor reads are modelled; every other node is
/// kept as [`SourceUnitNode::Other`].
#[derive(Debug, Clone, Deserialize)]
pub struct SourceUnit {
    #[serde(default, rename = "absolutePath")]
    pub absolute_path: Option<String>,
    #[serde(default)]
    pub nodes: Vec<SourceUnitNode>,
}

/// Top-level node of a [`SourceUnit`]
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "nodeType")]
pub enum SourceUnitNode {
    ContractDefinition(ContractDefinition),
    #[serde(other)]
    Other,
}

/// `contract`, `interface` or `library` definition
#[derive(Debug, Clone, Deserialize)]
pub struct ContractDefinition {
    pub name: String,
    #[serde(default, rename = "contractKind")]
    pub contract_kind: Option<String>,
    #[serde(default)]
    pub documentation: Option<Documentation>,
    #[serde(default)]
    pub nodes: Vec<ContractNode>,
}

impl ContractDefinition {
    /// Doc comment text, if any.
    pub fn doc_text(&self) -> Option<&str> {
        self.documentation.as_ref().map(Documentation::text)
    }

    /// Struct definitions in declaration order.
    pub fn structs(&self) -> impl Iterator<Item = &StructDefinition> {
        self.nodes.iter().filter_map(|node| match node {
            ContractNode::StructDefinition(def) => Some(def),
            ContractNode::Other => None,
        })
    }
}

/// Member node of a [`ContractDefinition`]
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "nodeType")]
pub enum ContractNode {
    StructDefinition(StructDefinition),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StructDefinition {
    pub name: String,
    #[serde(default)]
    pub documentation: Option<Documentation>,
    #[serde(default)]
    pub members: Vec<VariableDeclaration>,
}

impl StructDefinition {
    /// Doc comment text, if any.
    pub fn doc_text(&self) -> Option<&str> {
        self.documentation.as_ref().map(Documentation::text)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariableDeclaration {
    pub name: String,
    #[serde(rename = "typeDescriptions")]
    pub type_descriptions: TypeDescriptions,
}

impl VariableDeclaration {
    /// Full type string (`uint256`, `struct IPayment.Foo[]`), trimmed.
    pub fn type_string(&self) -> &str {
        self.type_descriptions
            .type_string
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeDescriptions {
    #[serde(default, rename = "typeString")]
    pub type_string: Option<String>,
}

/// Doc comment attached to a node
///
/// Current compilers emit a `StructuredDocumentation` object; legacy ASTs carry a
/// bare string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Documentation {
    Structured { text: String },
    Legacy(String),
}

impl Documentation {
    pub fn text(&self) -> &str {
        match self {
            Documentation::Structured { text } | Documentation::Legacy(text) => text,
        }
    }
}
