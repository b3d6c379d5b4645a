use super::*;

#[test]
fn predict_endpoint_formats_stage_path() {
    assert_eq!(predict_endpoint(Stage::Order), "/api/predict/order");
    assert_eq!(predict_endpoint(Stage::Compactor), "/api/predict/compactor");
}

#[test]
fn server_error_prefers_body_message() {
    let body = ErrorBody { status: Some("error".to_owned()), message: Some("could not convert string to float".to_owned()) };
    let err = server_error(400, Some(body));
    assert_eq!(
        err,
        ApiError::Server { status: 400, message: "could not convert string to float".to_owned() }
    );
    assert_eq!(err.to_string(), "could not convert string to float");
}

#[test]
fn server_error_falls_back_to_status_message() {
    assert_eq!(server_error(502, None).to_string(), "request failed: 502");
    let blank = ErrorBody { status: None, message: Some("  ".to_owned()) };
    assert_eq!(server_error(500, Some(blank)).to_string(), "request failed: 500");
}

#[test]
fn transport_and_decode_errors_display_detail() {
    assert_eq!(ApiError::Transport("network down".to_owned()).to_string(), "network down");
    assert_eq!(ApiError::Decode("expected value".to_owned()).to_string(), "expected value");
}
