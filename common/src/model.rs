use std::collections::HashMap;

use enum_iterator::Sequence;
use serde::{Serialize, Deserialize};

/// Single metadata field as produced by the extractor
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct RawField {
    /// Raw field text
    pub value: String,
}

/// Field name to raw value mapping embedded in an image
pub type RawMetadata = HashMap<String, RawField>;

/// `parameters` field split into its three sections.
///
/// Sections are non-overlapping slices of the raw field in original
/// order; only the two marker literals and surrounding whitespace are
/// stripped.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct ParsedParams {
    /// Positive prompt
    pub prompt: String,
    /// Negative prompt
    pub negative_prompt: String,
    /// Trailing generation settings, raw
    pub parameters: String,
}

impl ParsedParams {
    /// Raw text of the given section
    pub fn field(&self, field: ParamField) -> &str {
        match field {
            ParamField::Prompt => &self.prompt,
            ParamField::NegativePrompt => &self.negative_prompt,
            ParamField::Parameters => &self.parameters,
        }
    }
}

/// Card section displaying one parsed field
#[derive(Clone, Copy, Debug, PartialEq, Sequence, Serialize, Deserialize)]
pub enum ParamField {
    Prompt,
    NegativePrompt,
    Parameters,
}

impl ParamField {
    /// Section title
    pub fn name(&self) -> &'static str {
        match self {
            ParamField::Prompt => "prompt",
            ParamField::NegativePrompt => "negative prompt",
            ParamField::Parameters => "parameters",
        }
    }
}
