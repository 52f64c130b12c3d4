mod wikibase;

pub use wikibase::{WikibaseClient, WikibaseQueryConfig, DEFAULT_ENDPOINT};
