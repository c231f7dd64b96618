use serde::{Deserialize, Serialize};

use sas_core::{AdCopyKind, AdCopyUnit};

use crate::error::OptimizerError;

/// Loosely-typed ad copy unit as it arrives over the wire.
///
/// `kind` stays a string here so an unrecognized value is reported as
/// [`OptimizerError::InvalidInput`] instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdCopyUnitInput {
    pub content: String,
    pub kind: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl TryFrom<AdCopyUnitInput> for AdCopyUnit {
    type Error = OptimizerError;

    fn try_from(input: AdCopyUnitInput) -> Result<Self, Self::Error> {
        let kind: AdCopyKind = input.kind.parse()?;
        Ok(AdCopyUnit {
            content: input.content,
            kind,
            keywords: input.keywords,
            limit: input.limit,
        })
    }
}
