//! oncolens-web: browser front end for the breast-tumor classification service.
//! Serves a single page with three steps:
//!   - Enter patient data (manual entry or CSV import)
//!   - Choose a model
//!   - Run the prediction and show the result

pub mod router;
pub mod handlers;
pub mod state;
pub mod session;
