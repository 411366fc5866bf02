//! Execution of xyz-grid corpora against a text-to-image backend.

#![deny(missing_docs)]

mod backend;
mod config;
mod run;
mod sidecar;
mod webui;

pub use backend::{
    xyz_plot_args, ResolvedAxis, ScriptArg, SynthesisBackend, Txt2ImgRequest, DENOISING_STRENGTH,
    XYZ_PLOT_SCRIPT,
};
pub use config::{BackendConfig, RunConfig, SeedPolicy};
pub use run::{
    build_request, create_run_dir, execute, run, run_dir_name, RecordArtifacts, RecordFailure,
    RunReport,
};
pub use sidecar::render_sidecar;
pub use webui::{decode_image, first_image, WebUiClient};
