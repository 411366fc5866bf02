use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use xyz_core::{AxisSpec, AxisType, Record, RANDOM_SEED};
use xyz_corpus::append_record;

#[derive(Args, Debug)]
pub struct AppendArgs {
    /// Corpus file to extend. Created if missing.
    #[arg(short = 'O', long = "output-file", default_value = "xyz_prompts.json")]
    pub output_file: PathBuf,
    /// Prompt text. Stored as null when omitted.
    #[arg(short = 'p', long)]
    pub prompt: Option<String>,
    #[arg(short = 'N', long = "negative-prompt", default_value = "")]
    pub negative_prompt: String,
    #[arg(short = 's', long, default_value_t = RANDOM_SEED, allow_negative_numbers = true)]
    pub seed: i64,
    #[arg(short = 'z', long = "z-axis-type", default_value = AxisType::Nothing.label())]
    pub z_axis_type: String,
    #[arg(short = 'Z', long = "z-axis-values", default_value = "", allow_hyphen_values = true)]
    pub z_axis_values: String,
}

pub fn run(args: &AppendArgs) -> Result<(), Box<dyn Error>> {
    let record = Record {
        prompt: args.prompt.clone(),
        negative_prompt: args.negative_prompt.clone(),
        seed: args.seed,
        x_axis: None,
        y_axis: None,
        z_axis: AxisSpec::new(args.z_axis_type.clone(), args.z_axis_values.clone()),
    };
    let corpus = append_record(&args.output_file, record)?;
    println!(
        "{} now holds {} prompts",
        args.output_file.display(),
        corpus.len()
    );
    Ok(())
}
