pub mod domain;
pub mod export;
pub mod resources;

pub use domain::{ItemRecord, TraitMap, TraitRow};
pub use export::{normalize, DatabaseWriter};
pub use resources::{WikibaseClient, WikibaseQueryConfig};
