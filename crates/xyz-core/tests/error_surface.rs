use xyz_core::errors::{ErrorInfo, XyzError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("path", "input")
        .with_context("requested", "5")
}

#[test]
fn capacity_error_surface() {
    let err = XyzError::Capacity(sample_info("build-capacity", "not enough images"));
    assert_eq!(err.info().code, "build-capacity");
    assert!(err.info().context.contains_key("requested"));
}

#[test]
fn caption_error_surface() {
    let err = XyzError::Caption(sample_info("build-captions", "could not get captions"));
    assert_eq!(err.info().code, "build-captions");
    assert!(err.to_string().starts_with("caption error: could not get captions"));
}

#[test]
fn axis_type_error_surface() {
    let err = XyzError::AxisType(sample_info("axis-type-unknown", "unknown axis type"));
    assert_eq!(err.info().code, "axis-type-unknown");
}

#[test]
fn backend_error_surface() {
    let err = XyzError::Backend(
        ErrorInfo::new("backend-status", "http 500").with_hint("is the backend running?"),
    );
    assert!(err.to_string().contains("hint: is the backend running?"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = XyzError::Sampling(sample_info("build-sampling", "too few captions"));
    let value = serde_json::to_value(&err).expect("json");
    assert_eq!(value["family"], "Sampling");
    assert_eq!(value["detail"]["code"], "build-sampling");
    let back: XyzError = serde_json::from_value(value).expect("decode");
    assert_eq!(back, err);
}
