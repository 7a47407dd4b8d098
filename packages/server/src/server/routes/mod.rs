// HTTP routes
pub mod actions;
pub mod health;
pub mod webhook;

pub use actions::*;
pub use health::*;
pub use webhook::*;
