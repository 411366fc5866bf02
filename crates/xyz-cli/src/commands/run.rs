use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use xyz_core::to_canonical_json_bytes;
use xyz_engine::{run as run_corpus, RunConfig, SeedPolicy, WebUiClient};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Corpus file to execute.
    #[arg(short = 'i', long = "input-filename", default_value = "xyz_prompts.json")]
    pub input_filename: PathBuf,
    /// Parent of the timestamped run directory.
    #[arg(short = 'O', long = "output-folder", default_value = "output")]
    pub output_folder: PathBuf,
    /// YAML run configuration; flags given below override it.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(short = 'S', long)]
    pub sampler: Option<String>,
    #[arg(short = 't', long)]
    pub steps: Option<u32>,
    #[arg(short = 's', long, allow_negative_numbers = true)]
    pub seed: Option<i64>,
    #[arg(short = 'c', long = "cfg-scale")]
    pub cfg_scale: Option<f64>,
    #[arg(short = 'W', long)]
    pub width: Option<u32>,
    #[arg(short = 'H', long)]
    pub height: Option<u32>,
    /// Backend host.
    #[arg(long)]
    pub host: Option<String>,
    /// Backend port.
    #[arg(long)]
    pub port: Option<u16>,
    /// Per-request timeout in seconds.
    #[arg(long = "timeout-secs")]
    pub timeout_secs: Option<u64>,
    /// `run` sends the run seed for every record, `record` each record's own seed.
    #[arg(long = "seed-policy")]
    pub seed_policy: Option<SeedPolicy>,
    /// Stop at the first failed record.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,
}

fn resolve_config(args: &RunArgs) -> Result<RunConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(sampler) = &args.sampler {
        config.sampler = sampler.clone();
    }
    if let Some(steps) = args.steps {
        config.steps = steps;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(cfg_scale) = args.cfg_scale {
        config.cfg_scale = cfg_scale;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(host) = &args.host {
        config.backend.host = host.clone();
    }
    if let Some(port) = args.port {
        config.backend.port = port;
    }
    if args.timeout_secs.is_some() {
        config.backend.timeout_secs = args.timeout_secs;
    }
    if let Some(policy) = args.seed_policy {
        config.seed_policy = policy;
    }
    config.fail_fast |= args.fail_fast;
    Ok(config)
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(args)?;
    let mut backend = WebUiClient::new(&config.backend)?;
    tracing::info!(url = backend.url(), "using synthesis backend");
    let report = run_corpus(
        &args.input_filename,
        &args.output_folder,
        &config,
        &mut backend,
    )?;
    println!("{}", String::from_utf8(to_canonical_json_bytes(&report)?)?);
    if !report.is_clean() {
        return Err(format!(
            "{} of {} records failed: {:?}",
            report.failed.len(),
            report.total,
            report.failed_seqs()
        )
        .into());
    }
    Ok(())
}
