use axum::http::StatusCode;
use rstest::rstest;
use studio_api::middleware::error_handling::map_error;
use studio_core::errors::StudioError;
use studio_db::password;

#[rstest]
#[case(StudioError::NotFound("Slot not found".to_string()), StatusCode::NOT_FOUND)]
#[case(StudioError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(StudioError::Authentication("Invalid credentials.".to_string()), StatusCode::UNAUTHORIZED)]
#[case(StudioError::Authorization("Only the teacher can do that.".to_string()), StatusCode::FORBIDDEN)]
#[case(StudioError::Conflict("This class is full.".to_string()), StatusCode::CONFLICT)]
#[case(StudioError::Database(eyre::eyre!("disk full")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: StudioError, #[case] expected: StatusCode) {
    assert_eq!(map_error(error).status(), expected);
}

#[test]
fn test_internal_error_maps_to_500() {
    let error = StudioError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));
    assert_eq!(map_error(error).status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_hash_password() {
    let hashed = password::hash_password("test_password").unwrap();

    assert_ne!(hashed, "test_password");
    assert!(hashed.starts_with("$argon2"));
    assert!(password::verify_password("test_password", &hashed).unwrap());
    assert!(!password::verify_password("wrong_password", &hashed).unwrap());
}
