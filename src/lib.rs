pub mod config;
pub mod i18n;
pub mod negotiator;
pub mod seo;
pub mod server;
