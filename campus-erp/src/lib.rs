//! # campus-erp
//!
//! Headless administration front-end core for a school ERP.
//!
//! This is the meta-crate that re-exports the layer crates for convenient
//! access. Depend on `campus-erp` to get the whole stack, or on individual
//! crates for finer-grained control.

/// Values, field errors, settings, and logging setup.
pub use campus_erp_core as core;

/// Form engine: field descriptors, controls, normalization, files, and
/// diff-based submission.
#[cfg(feature = "forms")]
pub use campus_erp_forms as forms;

/// REST client: bearer auth, token refresh, envelopes, submission transport.
#[cfg(feature = "client")]
pub use campus_erp_client as client;

/// Page layer: table shell, CRUD controller, notices, entity registry.
#[cfg(feature = "pages")]
pub use campus_erp_pages as pages;

// Third-party re-exports so downstream code can match versions.
pub use chrono;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;
pub use tracing_subscriber;

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use campus_erp_core::error::FieldErrors;
    pub use campus_erp_core::settings::Settings;
    pub use campus_erp_core::value::{UploadFile, Value};

    #[cfg(feature = "forms")]
    pub use campus_erp_forms::{
        build_submission, render_control, Control, FieldDef, FieldKind, FormState, Rule,
        SubmitAbort, Submission,
    };

    #[cfg(feature = "client")]
    pub use campus_erp_client::{ApiClient, ClientError, SessionState, TokenPair, TokenStore};

    #[cfg(feature = "pages")]
    pub use campus_erp_pages::{CrudPage, EntityDef, ListQuery, Notice, NoticeLevel, PageState};
}
