//! oncolens-common: shared types, errors, and configuration used across all OncoLens crates.

pub mod error;
pub mod features;
pub mod models;
pub mod model_info;
pub mod csv_import;
pub mod form;
pub mod prediction;
pub mod config;

// Re-export commonly used types
pub use features::{FeatureField, FeatureVector, FEATURE_COUNT, FEATURE_FIELDS};
pub use models::ModelSelection;
pub use form::{FormSubmission, InputForm, InputSource, InputTab, SourcePolicy};
pub use prediction::{ErrorBody, Prediction, Submission};
pub use error::{OncolensError, PredictionError};
