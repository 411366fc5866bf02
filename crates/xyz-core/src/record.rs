//! Test records and their on-disk shape.

use serde::{Deserialize, Serialize};

use crate::axis::AxisSpec;

/// Seed value meaning "let the backend choose".
pub const RANDOM_SEED: i64 = -1;

/// One test case: a prompt plus shared generation parameters and up to three
/// sweep axes.
///
/// Records written by the single-axis tools carry no X or Y axis; those keys
/// are omitted on disk and resolve to the `Nothing` axis when executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RecordWire", into = "RecordWire")]
pub struct Record {
    /// Main generation instruction. `None` when the record was appended
    /// without one.
    pub prompt: Option<String>,
    /// Content the backend should suppress.
    pub negative_prompt: String,
    /// Generation seed, [`RANDOM_SEED`] for backend-chosen.
    pub seed: i64,
    /// Optional X sweep axis.
    pub x_axis: Option<AxisSpec>,
    /// Optional Y sweep axis.
    pub y_axis: Option<AxisSpec>,
    /// Z sweep axis.
    pub z_axis: AxisSpec,
}

impl Record {
    /// Creates a record with the given prompt and every other field defaulted.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Self::default()
        }
    }

    /// Prompt text, empty when absent.
    pub fn prompt_text(&self) -> &str {
        self.prompt.as_deref().unwrap_or_default()
    }

    /// X, Y and Z axes with absent axes replaced by `Nothing`.
    pub fn axes(&self) -> [AxisSpec; 3] {
        [
            self.x_axis.clone().unwrap_or_default(),
            self.y_axis.clone().unwrap_or_default(),
            self.z_axis.clone(),
        ]
    }
}

impl Default for Record {
    fn default() -> Self {
        Self {
            prompt: None,
            negative_prompt: String::new(),
            seed: RANDOM_SEED,
            x_axis: None,
            y_axis: None,
            z_axis: AxisSpec::default(),
        }
    }
}

/// Scalar accepted where the corpus format expects text. Hand-edited corpora
/// sometimes carry bare numbers for axis values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
            Scalar::Bool(flag) => flag.to_string(),
        }
    }
}

fn default_seed() -> i64 {
    RANDOM_SEED
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RecordWire {
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    negative_prompt: Option<Scalar>,
    #[serde(default = "default_seed")]
    seed: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x_axis_type: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x_axis_values: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y_axis_type: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y_axis_values: Option<Scalar>,
    #[serde(default)]
    z_axis_type: Option<Scalar>,
    #[serde(default)]
    z_axis_values: Option<Scalar>,
}

fn axis_from_wire(kind: Option<Scalar>, values: Option<Scalar>) -> Option<AxisSpec> {
    if kind.is_none() && values.is_none() {
        return None;
    }
    let mut spec = AxisSpec::default();
    if let Some(kind) = kind {
        spec.kind = kind.into_text();
    }
    if let Some(values) = values {
        spec.values = values.into_text();
    }
    Some(spec)
}

fn axis_to_wire(spec: Option<AxisSpec>) -> (Option<Scalar>, Option<Scalar>) {
    match spec {
        Some(spec) => (Some(Scalar::Text(spec.kind)), Some(Scalar::Text(spec.values))),
        None => (None, None),
    }
}

impl From<RecordWire> for Record {
    fn from(wire: RecordWire) -> Self {
        Record {
            prompt: wire.prompt,
            negative_prompt: wire
                .negative_prompt
                .map(Scalar::into_text)
                .unwrap_or_default(),
            seed: wire.seed,
            x_axis: axis_from_wire(wire.x_axis_type, wire.x_axis_values),
            y_axis: axis_from_wire(wire.y_axis_type, wire.y_axis_values),
            z_axis: axis_from_wire(wire.z_axis_type, wire.z_axis_values).unwrap_or_default(),
        }
    }
}

impl From<Record> for RecordWire {
    fn from(record: Record) -> Self {
        let (x_axis_type, x_axis_values) = axis_to_wire(record.x_axis);
        let (y_axis_type, y_axis_values) = axis_to_wire(record.y_axis);
        let (z_axis_type, z_axis_values) = axis_to_wire(Some(record.z_axis));
        RecordWire {
            prompt: record.prompt,
            negative_prompt: Some(Scalar::Text(record.negative_prompt)),
            seed: record.seed,
            x_axis_type,
            x_axis_values,
            y_axis_type,
            y_axis_values,
            z_axis_type,
            z_axis_values,
        }
    }
}
