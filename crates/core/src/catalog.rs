//! Content catalog - items and their variants used to label tile pairs
//!
//! The wire document is the static JSON served next to the game. Field aliases
//! accept the published `weapons`/`skins`/`baseWeapon` names.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use memory_match_types::Rarity;

/// Legend entry for a rarity tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityInfo {
    pub id: u32,
    pub name: String,
    pub color: String,
}

/// A concrete variant of an item; one variant backs one tile pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    pub name: String,
    /// Rarity tag as written in the document. Unknown tags are kept verbatim.
    pub rarity: String,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Variant {
    /// Parsed rarity, if the tag is one of the known seven.
    pub fn rarity_tag(&self) -> Option<Rarity> {
        Rarity::from_str(&self.rarity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    #[serde(alias = "baseWeapon")]
    pub name: String,
    #[serde(alias = "skins", default)]
    pub variants: Vec<Variant>,
}

/// Read-only catalog of items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCatalog {
    #[serde(default)]
    pub rarities: BTreeMap<String, RarityInfo>,
    #[serde(alias = "weapons", default)]
    pub items: Vec<CatalogItem>,
}

impl ContentCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            rarities: BTreeMap::new(),
            items,
        }
    }

    /// True when no item contributes a variant.
    pub fn is_empty(&self) -> bool {
        self.items.iter().all(|item| item.variants.is_empty())
    }

    /// Every (item, variant) combination in document order.
    pub fn pairings(&self) -> impl Iterator<Item = (&CatalogItem, &Variant)> + '_ {
        self.items
            .iter()
            .flat_map(|item| item.variants.iter().map(move |v| (item, v)))
    }

    /// Distinct non-empty variant ids; each one names a media asset.
    pub fn variant_ids(&self) -> BTreeSet<String> {
        self.pairings()
            .map(|(_, v)| v.id.clone())
            .filter(|id| !id.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r##"{
        "rarities": {
            "covert": { "id": 6, "name": "Covert", "color": "#eb4b4b" }
        },
        "weapons": [
            {
                "id": 7,
                "baseWeapon": "AK-47",
                "skins": [
                    { "id": "ak-redline", "name": "Redline", "rarity": "classified", "imageUrl": "/x.webp" },
                    { "id": "ak-vulcan", "name": "Vulcan", "rarity": "covert" }
                ]
            },
            { "id": 9, "baseWeapon": "AWP", "skins": [] },
            {
                "id": 1,
                "baseWeapon": "Deagle",
                "skins": [ { "id": "ak-redline", "name": "Dup", "rarity": "weird" } ]
            }
        ]
    }"##;

    #[test]
    fn parses_published_field_names() {
        let catalog: ContentCatalog = serde_json::from_str(DOCUMENT).unwrap();
        assert_eq!(catalog.items.len(), 3);
        assert_eq!(catalog.items[0].name, "AK-47");
        assert_eq!(catalog.items[0].variants[0].image_url.as_deref(), Some("/x.webp"));
        assert_eq!(catalog.rarities["covert"].name, "Covert");
    }

    #[test]
    fn pairings_skip_items_without_variants() {
        let catalog: ContentCatalog = serde_json::from_str(DOCUMENT).unwrap();
        let names: Vec<_> = catalog
            .pairings()
            .map(|(item, v)| format!("{}|{}", item.name, v.name))
            .collect();
        assert_eq!(names, vec!["AK-47|Redline", "AK-47|Vulcan", "Deagle|Dup"]);
    }

    #[test]
    fn variant_ids_are_deduplicated() {
        let catalog: ContentCatalog = serde_json::from_str(DOCUMENT).unwrap();
        let ids: Vec<_> = catalog.variant_ids().into_iter().collect();
        assert_eq!(ids, vec!["ak-redline", "ak-vulcan"]);
    }

    #[test]
    fn unknown_rarity_is_kept() {
        let catalog: ContentCatalog = serde_json::from_str(DOCUMENT).unwrap();
        let dup = &catalog.items[2].variants[0];
        assert_eq!(dup.rarity, "weird");
        assert_eq!(dup.rarity_tag(), None);
        assert_eq!(catalog.items[0].variants[1].rarity_tag(), Some(Rarity::Covert));
    }

    #[test]
    fn empty_catalog_detection() {
        assert!(ContentCatalog::default().is_empty());
        let only_empty = ContentCatalog::new(vec![CatalogItem {
            id: 1,
            name: "Knife".into(),
            variants: vec![],
        }]);
        assert!(only_empty.is_empty());
    }
}
