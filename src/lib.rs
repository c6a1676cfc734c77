pub mod config;
pub mod domain;
pub mod error;
pub mod resolver;
pub mod runner;
pub mod sources;
pub mod ui;

pub use domain::VersionRecord;
pub use error::{Result, VersionError};
pub use resolver::Resolver;
