use std::fmt::Write as _;

use xyz_core::AxisSpec;

use crate::backend::Txt2ImgRequest;

/// Human-readable description of one generation, written next to its image.
pub fn render_sidecar(request: &Txt2ImgRequest, axes: &[AxisSpec; 3]) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Prompt: {}", request.prompt);
    let _ = writeln!(text, "Negative prompt: {}", request.negative_prompt);
    text.push('\n');
    let _ = writeln!(text, "Sampler: {}", request.sampler_name);
    let _ = writeln!(text, "Steps: {}", request.steps);
    let _ = writeln!(text, "Seed: {}", request.seed);
    let _ = writeln!(text, "CFG scale: {:?}", request.cfg_scale);
    let _ = writeln!(text, "Height: {}", request.height);
    let _ = writeln!(text, "Width: {}", request.width);
    let _ = writeln!(text, "Script: {}", request.script_name);
    for (name, axis) in ["X", "Y", "Z"].iter().zip(axes) {
        let _ = writeln!(text, "{name} Type: {}", axis.kind);
        let _ = writeln!(text, "{name} Values: {}", axis.values);
    }
    text
}
