use image_store::domain::image::{
    ALLOWED_CONTENT_TYPES, ImageContentType, ObjectKey, StorageError, file_extension,
    is_valid_content_type, resolve_object_key,
};

#[test]
fn every_allowed_type_passes_in_any_case() {
    for allowed in ALLOWED_CONTENT_TYPES {
        assert!(is_valid_content_type(allowed));
        assert!(is_valid_content_type(&allowed.to_uppercase()));
        assert!(ImageContentType::new(&allowed.to_ascii_uppercase()).is_ok());
    }
}

#[test]
fn unlisted_types_are_rejected() {
    for rejected in ["image/bmp", "image/heic", "text/plain", "imagepng", "image/"] {
        assert!(!is_valid_content_type(rejected), "{rejected} should be rejected");
        assert!(matches!(
            ImageContentType::new(rejected),
            Err(StorageError::InvalidContentType(_))
        ));
    }
}

#[test]
fn photo_png_keeps_uppercase_extension() {
    assert_eq!(file_extension("photo.PNG"), "PNG");
    assert!(ObjectKey::generate("photo.PNG").as_str().ends_with(".PNG"));
}

#[test]
fn filename_without_dot_becomes_the_extension() {
    let key = ObjectKey::generate("README");
    assert!(key.as_str().starts_with("projects/"));
    assert!(key.as_str().ends_with(".README"));
}

#[test]
fn delete_target_resolution() {
    assert_eq!(
        resolve_object_key("https://host/my-bucket/projects/abc.png", "my-bucket").as_str(),
        "projects/abc.png"
    );
    assert_eq!(
        resolve_object_key("projects/abc.png", "my-bucket").as_str(),
        "projects/abc.png"
    );
    assert_eq!(
        resolve_object_key("http://[::1/projects/abc.png", "my-bucket").as_str(),
        "http://[::1/projects/abc.png"
    );
}
