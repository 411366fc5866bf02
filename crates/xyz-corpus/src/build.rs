use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rand::seq::index;
use rand::Rng;
use xyz_core::errors::{ErrorInfo, XyzError};
use xyz_core::{AxisSpec, Corpus, Record, RngHandle, RANDOM_SEED};
use xyz_harvest::{count_images, harvest, CaptionSource};

/// Parameters shared by every record of one build. Only the prompt varies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedParams {
    /// Negative prompt for every record.
    pub negative_prompt: String,
    /// Stored generation seed, [`RANDOM_SEED`] for backend-chosen.
    pub seed: i64,
    /// X axis, omitted from the file when `None`.
    pub x_axis: Option<AxisSpec>,
    /// Y axis, omitted from the file when `None`.
    pub y_axis: Option<AxisSpec>,
    /// Z axis.
    pub z_axis: AxisSpec,
}

impl Default for SharedParams {
    fn default() -> Self {
        Self {
            negative_prompt: String::new(),
            seed: RANDOM_SEED,
            x_axis: None,
            y_axis: None,
            z_axis: AxisSpec::default(),
        }
    }
}

impl SharedParams {
    /// Record for `prompt` carrying the shared parameters.
    pub fn record_for(&self, prompt: String) -> Record {
        Record {
            prompt: Some(prompt),
            negative_prompt: self.negative_prompt.clone(),
            seed: self.seed,
            x_axis: self.x_axis.clone(),
            y_axis: self.y_axis.clone(),
            z_axis: self.z_axis.clone(),
        }
    }
}

/// Inputs of a corpus build.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    /// Directory walked for images and captions.
    pub source_dir: PathBuf,
    /// Number of records to produce.
    pub count: usize,
    /// Parameters copied into every record.
    pub shared: SharedParams,
    /// Where captions come from.
    pub source: CaptionSource,
    /// Fixes the caption selection when set.
    pub sample_seed: Option<u64>,
}

impl BuildPlan {
    /// Plan for `count` records from `source_dir` with sidecar captions and
    /// default shared parameters.
    pub fn new(source_dir: impl Into<PathBuf>, count: usize) -> Self {
        Self {
            source_dir: source_dir.into(),
            count,
            shared: SharedParams::default(),
            source: CaptionSource::Sidecar,
            sample_seed: None,
        }
    }
}

/// Drops repeated captions, keeping first occurrences in order.
pub fn distinct_captions(captions: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    captions
        .into_iter()
        .filter(|caption| seen.insert(caption.clone()))
        .collect()
}

/// Draws `count` captions uniformly without replacement.
pub fn sample_captions<R: Rng + ?Sized>(
    captions: &[String],
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>, XyzError> {
    if count > captions.len() {
        return Err(XyzError::Sampling(
            ErrorInfo::new(
                "build-sampling",
                format!(
                    "cannot sample {count} distinct captions from {} available",
                    captions.len()
                ),
            )
            .with_context("requested", count.to_string())
            .with_context("distinct", captions.len().to_string()),
        ));
    }
    Ok(index::sample(rng, captions.len(), count)
        .into_iter()
        .map(|idx| captions[idx].clone())
        .collect())
}

/// Samples captions under `plan.source_dir` into a fresh corpus.
///
/// Checks run in order: the image count must cover `count`, at least one
/// caption must be harvested, and enough distinct captions must exist.
pub fn build_corpus(plan: &BuildPlan) -> Result<Corpus, XyzError> {
    let image_count = count_images(&plan.source_dir);
    tracing::info!(
        requested = plan.count,
        images = image_count,
        dir = %plan.source_dir.display(),
        "creating prompts from image files"
    );
    if image_count < plan.count {
        return Err(XyzError::Capacity(
            ErrorInfo::new(
                "build-capacity",
                format!("not enough images to generate {} prompts", plan.count),
            )
            .with_path(&plan.source_dir)
            .with_context("images", image_count.to_string())
            .with_context("requested", plan.count.to_string()),
        ));
    }

    let captions = harvest(&plan.source_dir, plan.source);
    if captions.is_empty() {
        return Err(XyzError::Caption(
            ErrorInfo::new("build-captions", "could not get captions")
                .with_path(&plan.source_dir)
                .with_hint(match plan.source {
                    CaptionSource::Sidecar => "no .txt caption files found; try --filename-caption",
                    CaptionSource::Filename => "no image files found",
                }),
        ));
    }

    let population = distinct_captions(captions);
    let mut rng = RngHandle::from_optional_seed(plan.sample_seed);
    let sampled = sample_captions(&population, plan.count, &mut rng)?;
    Ok(sampled
        .into_iter()
        .map(|prompt| plan.shared.record_for(prompt))
        .collect())
}

/// Builds a corpus and writes it to `dest`, replacing any existing file.
///
/// Nothing is written when the build fails.
pub fn build_and_store(plan: &BuildPlan, dest: &Path) -> Result<Corpus, XyzError> {
    let corpus = build_corpus(plan)?;
    corpus.store(dest)?;
    tracing::info!(records = corpus.len(), path = %dest.display(), "corpus written");
    Ok(corpus)
}
