// HTTP server setup (Axum)
pub mod app;
pub mod form;
pub mod routes;

pub use app::*;
pub use form::SubmittedForm;
