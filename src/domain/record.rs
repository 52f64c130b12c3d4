use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type TraitMap = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone)]
pub struct TraitRow {
    pub item_uri: String,
    pub item_label: String,
    pub property_label: String,
    pub descriptor_label: String,
    pub value_label: String,
    pub image: Option<String>,
    pub wikidata_xref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    pub wikibase: String,
    #[serde(default)]
    pub wikidata_xref: Option<String>,
    #[serde(default)]
    pub traits: TraitMap,
    #[serde(rename = "imageURL", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ItemRecord {
    pub fn new(
        name: impl Into<String>,
        wikibase: impl Into<String>,
        wikidata_xref: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            wikibase: wikibase.into(),
            wikidata_xref,
            traits: TraitMap::new(),
            image_url: None,
        }
    }
}
