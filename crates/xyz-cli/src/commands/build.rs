use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use xyz_core::{AxisSpec, AxisType, RANDOM_SEED};
use xyz_corpus::{build_and_store, BuildPlan, CaptionSource, SharedParams};

use super::optional_axis;

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Number of prompts to sample.
    #[arg(short = 'n', long = "num-prompts", default_value_t = 15)]
    pub num_prompts: usize,
    /// Directory holding the source images and caption files.
    #[arg(short = 'd', long = "input-directory", default_value = "input")]
    pub input_directory: PathBuf,
    /// Corpus file to write. Replaced if it exists.
    #[arg(short = 'O', long = "output-file", default_value = "xyz_prompts.json")]
    pub output_file: PathBuf,
    #[arg(short = 'N', long = "negative-prompt", default_value = "")]
    pub negative_prompt: String,
    /// Generation seed stored in every record, -1 for random.
    #[arg(short = 's', long, default_value_t = RANDOM_SEED, allow_negative_numbers = true)]
    pub seed: i64,
    #[arg(short = 'x', long = "x-axis-type")]
    pub x_axis_type: Option<String>,
    #[arg(short = 'X', long = "x-axis-values", allow_hyphen_values = true)]
    pub x_axis_values: Option<String>,
    #[arg(short = 'y', long = "y-axis-type")]
    pub y_axis_type: Option<String>,
    #[arg(short = 'Y', long = "y-axis-values", allow_hyphen_values = true)]
    pub y_axis_values: Option<String>,
    #[arg(short = 'z', long = "z-axis-type", default_value = AxisType::Nothing.label())]
    pub z_axis_type: String,
    #[arg(short = 'Z', long = "z-axis-values", default_value = "", allow_hyphen_values = true)]
    pub z_axis_values: String,
    /// Take captions from image filenames instead of `.txt` files.
    #[arg(short = 'f', long = "filename-caption")]
    pub filename_caption: bool,
    /// Seed for caption sampling; omit for a fresh selection each time.
    #[arg(long = "sample-seed")]
    pub sample_seed: Option<u64>,
}

pub fn run(args: &BuildArgs) -> Result<(), Box<dyn Error>> {
    let plan = BuildPlan {
        source: CaptionSource::from_filename_flag(args.filename_caption),
        sample_seed: args.sample_seed,
        shared: SharedParams {
            negative_prompt: args.negative_prompt.clone(),
            seed: args.seed,
            x_axis: optional_axis(args.x_axis_type.clone(), args.x_axis_values.clone()),
            y_axis: optional_axis(args.y_axis_type.clone(), args.y_axis_values.clone()),
            z_axis: AxisSpec::new(args.z_axis_type.clone(), args.z_axis_values.clone()),
        },
        ..BuildPlan::new(&args.input_directory, args.num_prompts)
    };
    let corpus = build_and_store(&plan, &args.output_file)?;
    println!(
        "wrote {} prompts to {}",
        corpus.len(),
        args.output_file.display()
    );
    Ok(())
}
