mod record;

pub use record::{ItemRecord, TraitMap, TraitRow};
