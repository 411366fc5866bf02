use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use xyz_core::errors::{ErrorInfo, XyzError};
use xyz_core::{artifact_stem, stable_hash_string, AxisSpec, Corpus, Record};

use crate::backend::{
    xyz_plot_args, ResolvedAxis, SynthesisBackend, Txt2ImgRequest, DENOISING_STRENGTH,
    XYZ_PLOT_SCRIPT,
};
use crate::config::RunConfig;
use crate::sidecar::render_sidecar;

/// Files written for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordArtifacts {
    /// 1-based position of the record in the corpus.
    pub seq: usize,
    /// Image returned by the backend.
    pub image: PathBuf,
    /// Text description written next to the image.
    pub metadata: PathBuf,
}

/// A record that produced no artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    /// 1-based position of the record in the corpus.
    pub seq: usize,
    /// Why the record failed.
    pub error: XyzError,
}

/// Outcome of a corpus run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Directory holding this run's artifacts.
    pub run_dir: PathBuf,
    /// SHA-256 over the canonical JSON of the executed corpus.
    pub corpus_hash: String,
    /// Number of records in the corpus.
    pub total: usize,
    /// Records whose artifacts were written.
    pub succeeded: Vec<RecordArtifacts>,
    /// Records that failed, in corpus order.
    pub failed: Vec<RecordFailure>,
}

impl RunReport {
    /// True when every record succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Sequence numbers of the failed records.
    pub fn failed_seqs(&self) -> Vec<usize> {
        self.failed.iter().map(|failure| failure.seq).collect()
    }
}

/// Per-run directory name, `YYYYMMDD-HHMMSS`.
pub fn run_dir_name(at: NaiveDateTime) -> String {
    at.format("%Y%m%d-%H%M%S").to_string()
}

const MAX_RUN_DIR_ATTEMPTS: usize = 100;

/// Creates a fresh `<output_dir>/<name>` directory, creating missing parents.
///
/// An existing directory is never reused: when `<name>` is taken the next
/// free `<name>-2`, `<name>-3`, ... is created instead.
pub fn create_run_dir(output_dir: &Path, name: &str) -> Result<PathBuf, XyzError> {
    fs::create_dir_all(output_dir).map_err(|err| XyzError::io("run-mkdir", output_dir, err))?;
    for attempt in 1..=MAX_RUN_DIR_ATTEMPTS {
        let run_dir = match attempt {
            1 => output_dir.join(name),
            n => output_dir.join(format!("{name}-{n}")),
        };
        match fs::create_dir(&run_dir) {
            Ok(()) => return Ok(run_dir),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                tracing::debug!(path = %run_dir.display(), "run directory exists, trying next");
            }
            Err(err) => return Err(XyzError::io("run-mkdir", &run_dir, err)),
        }
    }
    Err(XyzError::Io(
        ErrorInfo::new("run-dir-exists", "no free run directory name")
            .with_path(&output_dir.join(name))
            .with_context("attempts", MAX_RUN_DIR_ATTEMPTS.to_string()),
    ))
}

fn resolve_axes(axes: &[AxisSpec; 3]) -> Result<[ResolvedAxis; 3], XyzError> {
    let resolve = |spec: &AxisSpec| -> Result<ResolvedAxis, XyzError> {
        Ok(ResolvedAxis {
            kind: spec.resolve()?,
            values: spec.values.clone(),
        })
    };
    Ok([resolve(&axes[0])?, resolve(&axes[1])?, resolve(&axes[2])?])
}

/// Builds the backend request for one record.
///
/// Fails when the record has no prompt or an axis label is unknown.
pub fn build_request(record: &Record, config: &RunConfig) -> Result<Txt2ImgRequest, XyzError> {
    let prompt = record.prompt.clone().ok_or_else(|| {
        XyzError::Record(
            ErrorInfo::new("record-no-prompt", "record has no prompt")
                .with_hint("give the record a prompt with `xyz-grid append -p ...`"),
        )
    })?;
    let axes = resolve_axes(&record.axes())?;
    Ok(Txt2ImgRequest {
        prompt,
        negative_prompt: record.negative_prompt.clone(),
        seed: config.effective_seed(record),
        sampler_name: config.sampler.clone(),
        sampler_index: config.sampler.clone(),
        steps: config.steps,
        cfg_scale: config.cfg_scale,
        width: config.width,
        height: config.height,
        denoising_strength: DENOISING_STRENGTH,
        seed_resize_from_h: 0,
        seed_resize_from_w: 0,
        script_name: XYZ_PLOT_SCRIPT.to_string(),
        script_args: xyz_plot_args(&axes),
    })
}

fn run_record(
    seq: usize,
    record: &Record,
    run_dir: &Path,
    config: &RunConfig,
    backend: &mut dyn SynthesisBackend,
) -> Result<RecordArtifacts, XyzError> {
    let request = build_request(record, config)?;
    let image = backend.txt2img(&request)?;

    let stem = artifact_stem(
        seq,
        request.seed,
        request.width,
        request.height,
        &request.prompt,
    );
    let image_path = run_dir.join(format!("{stem}.png"));
    let metadata_path = run_dir.join(format!("{stem}.txt"));
    tracing::info!(path = %image_path.display(), "saving image");
    fs::write(&image_path, &image).map_err(|err| XyzError::io("artifact-image", &image_path, err))?;
    if let Err(err) = fs::write(&metadata_path, render_sidecar(&request, &record.axes())) {
        // A record either has both artifacts or none.
        if let Err(remove_err) = fs::remove_file(&image_path) {
            tracing::warn!(
                path = %image_path.display(),
                error = %remove_err,
                "cannot remove orphaned image"
            );
        }
        return Err(XyzError::io("artifact-metadata", &metadata_path, err));
    }
    Ok(RecordArtifacts {
        seq,
        image: image_path,
        metadata: metadata_path,
    })
}

/// Executes every record of `corpus` in order, writing artifacts into `run_dir`.
///
/// A failing record is logged and skipped unless `config.fail_fast` is set, in
/// which case its error is returned and later records are not attempted.
pub fn execute(
    corpus: &Corpus,
    run_dir: &Path,
    config: &RunConfig,
    backend: &mut dyn SynthesisBackend,
) -> Result<RunReport, XyzError> {
    let total = corpus.len();
    let mut report = RunReport {
        run_dir: run_dir.to_path_buf(),
        corpus_hash: stable_hash_string(corpus)?,
        total,
        succeeded: Vec::with_capacity(total),
        failed: Vec::new(),
    };
    for (idx, record) in corpus.iter().enumerate() {
        let seq = idx + 1;
        tracing::info!("generating xyz grid {seq} out of {total} prompt tests");
        match run_record(seq, record, run_dir, config, backend) {
            Ok(artifacts) => report.succeeded.push(artifacts),
            Err(err) if config.fail_fast => return Err(err),
            Err(err) => {
                tracing::warn!(seq, error = %err, "record failed, continuing");
                report.failed.push(RecordFailure { seq, error: err });
            }
        }
    }
    Ok(report)
}

/// Loads the corpus at `corpus_path` and executes it into a fresh
/// timestamped directory under `output_dir`.
pub fn run(
    corpus_path: &Path,
    output_dir: &Path,
    config: &RunConfig,
    backend: &mut dyn SynthesisBackend,
) -> Result<RunReport, XyzError> {
    let corpus = Corpus::load(corpus_path)?;
    tracing::info!(records = corpus.len(), path = %corpus_path.display(), "loaded prompt tests");
    let run_dir = create_run_dir(output_dir, &run_dir_name(Local::now().naive_local()))?;
    execute(&corpus, &run_dir, config, backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn run_dir_name_layout() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 1)
            .unwrap();
        assert_eq!(run_dir_name(at), "20240307-090501");
    }

    #[test]
    fn run_dir_is_never_reused() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("nested/out");
        let first = create_run_dir(&out, "20240307-090501").unwrap();
        let second = create_run_dir(&out, "20240307-090501").unwrap();
        let third = create_run_dir(&out, "20240307-090501").unwrap();
        assert_eq!(first, out.join("20240307-090501"));
        assert_eq!(second, out.join("20240307-090501-2"));
        assert_eq!(third, out.join("20240307-090501-3"));
    }

    #[test]
    fn request_carries_fixed_fields() {
        let record = Record {
            negative_prompt: "blurry".into(),
            z_axis: AxisSpec::new("Steps", "20,30"),
            ..Record::new("a lighthouse")
        };
        let request = build_request(&record, &RunConfig::default()).unwrap();
        assert_eq!(request.seed, 555);
        assert_eq!(request.denoising_strength, 0.7);
        assert_eq!(request.seed_resize_from_h, 0);
        assert_eq!(request.seed_resize_from_w, 0);
        assert_eq!(request.script_name, "X/Y/Z Plot");
        assert_eq!(request.script_args.len(), 14);
    }

    #[test]
    fn missing_prompt_is_a_record_error() {
        let err = build_request(&Record::default(), &RunConfig::default()).unwrap_err();
        assert!(matches!(err, XyzError::Record(_)));
    }
}
