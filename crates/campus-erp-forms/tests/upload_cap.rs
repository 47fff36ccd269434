//! Tests for the configured upload size cap.
//!
//! These run in their own process because they install custom global
//! settings; the cap resolution order is field descriptor first, then
//! `Settings.max_upload_mb`.

use campus_erp_core::settings::{init_settings, Settings};
use campus_erp_core::value::UploadFile;
use campus_erp_forms::files::FileError;
use campus_erp_forms::{render_control, Control, FieldDef, FieldKind, FormState};

fn install_five_mb_cap() {
    let settings = Settings {
        max_upload_mb: 5,
        ..Settings::default()
    };
    // First caller installs; the other tests share the same instance.
    init_settings(settings).ok();
}

fn png(size_mb: usize) -> UploadFile {
    UploadFile::new("scan.png", "image/png", vec![0_u8; size_mb * 1024 * 1024])
}

#[test]
fn test_configured_cap_enforced_when_field_has_none() {
    install_five_mb_cap();
    let fields = vec![FieldDef::new("attachment", "Attachment", FieldKind::File)];
    let mut form = FormState::open_create(fields);

    let err = form.attach_file("attachment", png(7)).unwrap_err();
    assert_eq!(err, FileError::TooLarge { max_mb: 5 });
    assert!(form.get("attachment").is_none());

    form.attach_file("attachment", png(4)).unwrap();
    assert!(form.get("attachment").is_some());
}

#[test]
fn test_field_cap_overrides_configured_cap() {
    install_five_mb_cap();
    let fields = vec![FieldDef::new("photo", "Photo", FieldKind::File).max_size_mb(2)];
    let mut form = FormState::open_create(fields);

    let err = form.attach_file("photo", png(3)).unwrap_err();
    assert_eq!(err, FileError::TooLarge { max_mb: 2 });
}

#[test]
fn test_file_drop_shows_configured_cap() {
    install_five_mb_cap();
    let fields = vec![FieldDef::new("attachment", "Attachment", FieldKind::File)];
    let form = FormState::open_create(fields.clone());

    match render_control(&fields[0], &form) {
        Control::FileDrop { max_size_mb, .. } => assert_eq!(max_size_mb, 5),
        other => panic!("expected file drop, got {other:?}"),
    }
}
