#![deny(missing_docs)]
#![doc = "Core types for xyz-grid: axis descriptors, test records, corpora, the error taxonomy and artifact naming."]

pub mod axis;
pub mod corpus;
pub mod errors;
mod hash;
pub mod naming;
pub mod record;
pub mod rng;

pub use axis::{AxisSpec, AxisType};
pub use corpus::Corpus;
pub use errors::{ErrorInfo, XyzError};
pub use hash::{stable_hash_string, to_canonical_json_bytes};
pub use naming::{
    artifact_stem, sanitize_component, truncate_prompt, MAX_FILE_NAME_BYTES, PROMPT_COMPONENT_CHARS,
};
pub use record::{Record, RANDOM_SEED};
pub use rng::RngHandle;
