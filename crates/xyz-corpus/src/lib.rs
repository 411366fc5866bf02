//! Corpus construction: sampled builds from a caption source and single-record appends.

#![deny(missing_docs)]

mod append;
mod build;

pub use append::append_record;
pub use build::{
    build_and_store, build_corpus, distinct_captions, sample_captions, BuildPlan, SharedParams,
};
pub use xyz_harvest::CaptionSource;
