//! Sweep-axis descriptors and the fixed axis-type table.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, XyzError};

/// Parameter kinds the grid-plot script can sweep along one axis.
///
/// The backend addresses axis kinds by position in its own option table. That
/// position is returned by [`AxisType::wire_index`] and is pinned explicitly
/// per variant, so reordering the declarations below never changes what is
/// sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AxisType {
    /// No sweep on this axis.
    Nothing,
    /// Base seed.
    Seed,
    /// Variation seed.
    VarSeed,
    /// Variation strength.
    VarStrength,
    /// Sampling steps.
    Steps,
    /// High-resolution pass steps.
    HiresSteps,
    /// Classifier-free guidance scale.
    CfgScale,
    /// Prompt search and replace.
    PromptSearchReplace,
    /// Prompt term permutations.
    PromptOrder,
    /// Sampler name.
    Sampler,
    /// Model checkpoint name.
    CheckpointName,
    /// Sigma churn.
    SigmaChurn,
    /// Sigma minimum.
    SigmaMin,
    /// Sigma maximum.
    SigmaMax,
    /// Sigma noise.
    SigmaNoise,
    /// Eta.
    Eta,
    /// CLIP skip.
    ClipSkip,
    /// Denoising strength.
    Denoising,
    /// High-resolution upscaler.
    HiresUpscaler,
    /// VAE selection.
    Vae,
    /// Prompt styles.
    Styles,
}

impl AxisType {
    /// Every axis type, listed in wire order.
    pub const ALL: [AxisType; 21] = [
        AxisType::Nothing,
        AxisType::Seed,
        AxisType::VarSeed,
        AxisType::VarStrength,
        AxisType::Steps,
        AxisType::HiresSteps,
        AxisType::CfgScale,
        AxisType::PromptSearchReplace,
        AxisType::PromptOrder,
        AxisType::Sampler,
        AxisType::CheckpointName,
        AxisType::SigmaChurn,
        AxisType::SigmaMin,
        AxisType::SigmaMax,
        AxisType::SigmaNoise,
        AxisType::Eta,
        AxisType::ClipSkip,
        AxisType::Denoising,
        AxisType::HiresUpscaler,
        AxisType::Vae,
        AxisType::Styles,
    ];

    /// Index the grid-plot script expects for this axis type.
    pub const fn wire_index(self) -> u32 {
        match self {
            AxisType::Nothing => 0,
            AxisType::Seed => 1,
            AxisType::VarSeed => 2,
            AxisType::VarStrength => 3,
            AxisType::Steps => 4,
            AxisType::HiresSteps => 5,
            AxisType::CfgScale => 6,
            AxisType::PromptSearchReplace => 7,
            AxisType::PromptOrder => 8,
            AxisType::Sampler => 9,
            AxisType::CheckpointName => 10,
            AxisType::SigmaChurn => 11,
            AxisType::SigmaMin => 12,
            AxisType::SigmaMax => 13,
            AxisType::SigmaNoise => 14,
            AxisType::Eta => 15,
            AxisType::ClipSkip => 16,
            AxisType::Denoising => 17,
            AxisType::HiresUpscaler => 18,
            AxisType::Vae => 19,
            AxisType::Styles => 20,
        }
    }

    /// Label stored in corpus files and shown by the backend UI.
    pub const fn label(self) -> &'static str {
        match self {
            AxisType::Nothing => "Nothing",
            AxisType::Seed => "Seed",
            AxisType::VarSeed => "Var. seed",
            AxisType::VarStrength => "Var. strength",
            AxisType::Steps => "Steps",
            AxisType::HiresSteps => "Hires steps",
            AxisType::CfgScale => "CFG Scale",
            AxisType::PromptSearchReplace => "Prompt S/R",
            AxisType::PromptOrder => "Prompt order",
            AxisType::Sampler => "Sampler",
            AxisType::CheckpointName => "Checkpoint name",
            AxisType::SigmaChurn => "Sigma Churn",
            AxisType::SigmaMin => "Sigma min",
            AxisType::SigmaMax => "Sigma max",
            AxisType::SigmaNoise => "Sigma noise",
            AxisType::Eta => "Eta",
            AxisType::ClipSkip => "Clip skip",
            AxisType::Denoising => "Denoising",
            AxisType::HiresUpscaler => "Hires upscaler",
            AxisType::Vae => "VAE",
            AxisType::Styles => "Styles",
        }
    }

    /// Parses an exact label. Matching is case sensitive.
    pub fn from_label(label: &str) -> Result<Self, XyzError> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.label() == label)
            .ok_or_else(|| {
                XyzError::AxisType(
                    ErrorInfo::new("axis-type-unknown", format!("unknown axis type {label:?}"))
                        .with_context("label", label)
                        .with_hint("run `xyz-grid axes` to list the accepted labels"),
                )
            })
    }
}

impl Display for AxisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One sweep dimension: an axis type label plus the backend-interpreted values.
///
/// The label is kept as written so that corpora containing labels outside the
/// table can still be stored and round-tripped; resolution happens at execution
/// time through [`AxisSpec::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSpec {
    /// Axis type label.
    #[serde(rename = "type")]
    pub kind: String,
    /// Encoded list of values, passed to the backend untouched.
    pub values: String,
}

impl AxisSpec {
    /// Creates a spec from a label and encoded values.
    pub fn new(kind: impl Into<String>, values: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            values: values.into(),
        }
    }

    /// Resolves the stored label against the axis-type table.
    pub fn resolve(&self) -> Result<AxisType, XyzError> {
        AxisType::from_label(&self.kind)
    }

    /// Returns true for the `Nothing` axis with no values.
    pub fn is_nothing(&self) -> bool {
        self.kind == AxisType::Nothing.label() && self.values.is_empty()
    }
}

impl Default for AxisSpec {
    fn default() -> Self {
        Self::new(AxisType::Nothing.label(), "")
    }
}

impl From<AxisType> for AxisSpec {
    fn from(kind: AxisType) -> Self {
        Self::new(kind.label(), "")
    }
}
