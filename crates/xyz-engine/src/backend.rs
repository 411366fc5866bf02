//! Synthesis backend contract.
//!
//! One request per record: the record's prompts, the run's sampler settings and
//! an invocation of the backend's X/Y/Z grid-plot script. The positional
//! script arguments are fixed by the script and must not be reordered.

use serde::Serialize;
use xyz_core::errors::XyzError;
use xyz_core::AxisType;

/// Grid-plot script name as registered in the backend.
pub const XYZ_PLOT_SCRIPT: &str = "X/Y/Z Plot";
/// Denoising strength sent with every request.
pub const DENOISING_STRENGTH: f64 = 0.7;

/// One positional script argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScriptArg {
    /// Integer argument such as an axis index.
    Int(i64),
    /// String argument, including the `"True"`/`"False"` flags.
    Text(String),
    /// List argument; the per-axis dropdown slots are always empty.
    List(Vec<String>),
}

/// Resolved sweep axis: wire index plus encoded values.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAxis {
    /// Axis type resolved from its label.
    pub kind: AxisType,
    /// Encoded values, passed through untouched.
    pub values: String,
}

// The script reads these flags as strings.
fn flag(value: bool) -> ScriptArg {
    ScriptArg::Text(if value { "True" } else { "False" }.to_string())
}

/// Positional arguments of the grid-plot script for three axes.
///
/// Layout: for X, Y and Z in turn `[index, values, []]`, then draw legend,
/// include lone images, include sub-grids, no fixed seeds, margin size.
pub fn xyz_plot_args(axes: &[ResolvedAxis; 3]) -> Vec<ScriptArg> {
    let mut args = Vec::with_capacity(14);
    for axis in axes {
        args.push(ScriptArg::Int(i64::from(axis.kind.wire_index())));
        args.push(ScriptArg::Text(axis.values.clone()));
        args.push(ScriptArg::List(Vec::new()));
    }
    args.push(flag(true));
    args.push(flag(false));
    args.push(flag(false));
    args.push(flag(false));
    args.push(ScriptArg::Int(0));
    args
}

/// Text-to-image request body. Field names are the backend's JSON keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Txt2ImgRequest {
    /// Positive prompt.
    pub prompt: String,
    /// Negative prompt.
    pub negative_prompt: String,
    /// Generation seed, `-1` for backend-chosen.
    pub seed: i64,
    /// Sampler name.
    pub sampler_name: String,
    /// Sampler again, for backends that read the older key.
    pub sampler_index: String,
    /// Sampling steps.
    pub steps: u32,
    /// Classifier-free guidance scale.
    pub cfg_scale: f64,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Fixed at [`DENOISING_STRENGTH`].
    pub denoising_strength: f64,
    /// Seed resize height, always 0.
    pub seed_resize_from_h: i64,
    /// Seed resize width, always 0.
    pub seed_resize_from_w: i64,
    /// Always [`XYZ_PLOT_SCRIPT`].
    pub script_name: String,
    /// Positional grid-plot arguments from [`xyz_plot_args`].
    pub script_args: Vec<ScriptArg>,
}

/// Anything that can turn a [`Txt2ImgRequest`] into encoded image bytes.
pub trait SynthesisBackend {
    /// Runs one generation and returns the first image, encoded.
    fn txt2img(&mut self, request: &Txt2ImgRequest) -> Result<Vec<u8>, XyzError>;
}
