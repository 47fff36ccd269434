//! # campus-erp-forms
//!
//! The form engine behind every management screen: field descriptors
//! ([`fields::FieldDef`]), the descriptor-to-control renderer
//! ([`controls::render_control`]), wire/edit value normalization
//! ([`normalize`]), local file gating and previews ([`files`]), form state
//! ([`state::FormState`]), and diff-based submission payload construction
//! ([`submit::build_submission`]).
//!
//! Everything here is pure and synchronous; the network lives in
//! `campus-erp-client`.

pub mod controls;
pub mod fields;
pub mod files;
pub mod normalize;
pub mod state;
pub mod submit;
pub mod validation;

pub use controls::{filter_options, render_control, Control};
pub use fields::{ChoiceOption, FieldDef, FieldKind, Rule};
pub use files::{validate_upload, FileError, FilePreview};
pub use state::FormState;
pub use submit::{build_submission, Part, PartBody, Payload, SubmitAbort, SubmitMode, Submission};
