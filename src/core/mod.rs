pub mod locale;
pub mod models;
pub mod session;
pub mod settings;
pub mod store;
