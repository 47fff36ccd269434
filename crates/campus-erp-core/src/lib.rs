//! # campus-erp-core
//!
//! Foundation types for the campus-erp administration front-end: the
//! [`Value`](value::Value) model shared by forms, records, and wire payloads,
//! error types, application settings, and logging setup.

pub mod error;
pub mod logging;
pub mod settings;
pub mod value;

pub use error::{CoreError, CoreResult, FieldErrors};
pub use settings::Settings;
pub use value::{UploadFile, Value};
