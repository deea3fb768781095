pub mod config;
pub mod error;
pub mod site;
pub mod types;

pub use config::{load_site_toml, parse_site_toml};
pub use error::{Error, Result};
pub use site::site;
pub use types::*;
