pub mod append;
pub mod axes;
pub mod build;
pub mod run;

use xyz_core::AxisSpec;

/// Axis spec from a `-x/-X` style pair, `None` when neither was given.
pub(crate) fn optional_axis(kind: Option<String>, values: Option<String>) -> Option<AxisSpec> {
    if kind.is_none() && values.is_none() {
        return None;
    }
    let default = AxisSpec::default();
    Some(AxisSpec::new(
        kind.unwrap_or(default.kind),
        values.unwrap_or(default.values),
    ))
}
