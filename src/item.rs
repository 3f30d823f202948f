//! Item data
//!
//! Records follow the DataDragon `item.json` layout. Item ids only appear as
//! the keys of the `data` map, so they are copied onto each record on load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::champion::Image;
use crate::presenter::Listable;

/// The `item.json` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemData {
    #[serde(rename = "type")]
    pub data_type: String,
    pub version: String,
    /// Items keyed by id
    pub data: BTreeMap<String, Item>,
}

impl ItemData {
    /// All items in id order, each carrying its id
    pub fn into_items(self) -> Vec<Item> {
        self.data
            .into_iter()
            .map(|(id, mut item)| {
                item.id = id;
                item
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub colloq: String,
    #[serde(default)]
    pub plaintext: String,
    /// Items this one builds into
    #[serde(default)]
    pub into: Vec<String>,
    /// Components
    #[serde(default)]
    pub from: Vec<String>,
    pub image: Option<Image>,
    #[serde(default)]
    pub gold: ItemGold,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub stats: BTreeMap<String, f64>,
    pub depth: Option<u32>,
    #[serde(rename = "inStore")]
    pub in_store: Option<bool>,
    #[serde(rename = "requiredChampion")]
    pub required_champion: Option<String>,
}

impl Item {
    /// Icon URL on the DataDragon CDN, if the record names an image
    pub fn icon_url(&self, version: &str) -> Option<String> {
        self.image.as_ref().map(|image| {
            format!(
                "https://ddragon.leagueoflegends.com/cdn/{}/img/item/{}",
                version, image.full
            )
        })
    }

    /// Whether the item can be bought in the shop
    pub fn is_purchasable(&self) -> bool {
        self.gold.purchasable && self.in_store != Some(false)
    }
}

impl Listable for Item {
    fn key(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGold {
    #[serde(default)]
    pub base: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub sell: u32,
    #[serde(default)]
    pub purchasable: bool,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn item(id: &str, name: &str, total: u32) -> Item {
        Item {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            colloq: String::new(),
            plaintext: format!("{} plaintext", name),
            into: Vec::new(),
            from: Vec::new(),
            image: None,
            gold: ItemGold {
                base: total,
                total,
                sell: total * 7 / 10,
                purchasable: true,
            },
            tags: vec!["Damage".into()],
            stats: BTreeMap::new(),
            depth: None,
            in_store: None,
            required_champion: None,
        }
    }

    #[test]
    fn test_ids_come_from_map_keys() {
        let json = r#"{
            "type": "item",
            "version": "14.1.1",
            "basic": {"name": ""},
            "data": {
                "3031": {"name": "Infinity Edge", "gold": {"base": 625, "total": 3400, "sell": 2380, "purchasable": true}},
                "1001": {"name": "Boots", "tags": ["Boots"], "inStore": true}
            }
        }"#;
        let data: ItemData = serde_json::from_str(json).unwrap();
        let items = data.into_items();

        let keys: Vec<_> = items.iter().map(|i| i.key()).collect();
        assert_eq!(keys, ["1001", "3031"]);
        assert_eq!(items[1].gold.total, 3400);
        assert_eq!(items[0].in_store, Some(true));
        assert!(items[0].image.is_none());
    }

    #[test]
    fn test_purchasable() {
        let mut boots = item("1001", "Boots", 300);
        assert!(boots.is_purchasable());

        boots.in_store = Some(false);
        assert!(!boots.is_purchasable());

        let mut trinket = item("3340", "Stealth Ward", 0);
        trinket.gold.purchasable = false;
        assert!(!trinket.is_purchasable());
    }

    #[test]
    fn test_icon_url() {
        let mut sword = item("1036", "Long Sword", 350);
        assert_eq!(sword.icon_url("14.1.1"), None);

        sword.image = Some(Image {
            full: "1036.png".into(),
            sprite: "item0.png".into(),
            group: "item".into(),
            x: 0,
            y: 0,
            w: 48,
            h: 48,
        });
        assert_eq!(
            sword.icon_url("14.1.1").as_deref(),
            Some("https://ddragon.leagueoflegends.com/cdn/14.1.1/img/item/1036.png")
        );
    }
}
