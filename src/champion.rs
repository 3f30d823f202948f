//! Champion data
//!
//! Records follow the DataDragon `champion.json` layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::presenter::Listable;

/// The `champion.json` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChampionData {
    #[serde(rename = "type")]
    pub data_type: String,
    pub format: String,
    pub version: String,
    /// Champions keyed by id; ordered so listings are stable
    pub data: BTreeMap<String, Champion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Champion {
    pub id: String,
    pub key: String,
    pub name: String,
    pub title: String,
    pub version: String,
    pub blurb: String,
    pub info: ChampionInfo,
    pub image: Image,
    pub tags: Vec<String>,
    pub partype: String,
    pub stats: ChampionStats,
}

impl Champion {
    /// Square portrait URL on the DataDragon CDN
    pub fn portrait_url(&self) -> String {
        format!(
            "https://ddragon.leagueoflegends.com/cdn/{}/img/champion/{}",
            self.version, self.image.full
        )
    }
}

impl Listable for Champion {
    fn key(&self) -> &str {
        &self.key
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Role ratings, each 0-10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampionInfo {
    pub attack: u8,
    pub defense: u8,
    pub magic: u8,
    pub difficulty: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub full: String,
    pub sprite: String,
    pub group: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionStats {
    pub hp: f64,
    #[serde(rename = "hpperlevel")]
    pub hp_per_level: f64,
    pub mp: f64,
    #[serde(rename = "mpperlevel")]
    pub mp_per_level: f64,
    #[serde(rename = "movespeed")]
    pub move_speed: f64,
    pub armor: f64,
    #[serde(rename = "armorperlevel")]
    pub armor_per_level: f64,
    #[serde(rename = "spellblock")]
    pub spell_block: f64,
    #[serde(rename = "spellblockperlevel")]
    pub spell_block_per_level: f64,
    #[serde(rename = "attackrange")]
    pub attack_range: f64,
    #[serde(rename = "hpregen")]
    pub hp_regen: f64,
    #[serde(rename = "hpregenperlevel")]
    pub hp_regen_per_level: f64,
    #[serde(rename = "mpregen")]
    pub mp_regen: f64,
    #[serde(rename = "mpregenperlevel")]
    pub mp_regen_per_level: f64,
    pub crit: f64,
    #[serde(rename = "critperlevel")]
    pub crit_per_level: f64,
    #[serde(rename = "attackdamage")]
    pub attack_damage: f64,
    #[serde(rename = "attackdamageperlevel")]
    pub attack_damage_per_level: f64,
    #[serde(rename = "attackspeedperlevel")]
    pub attack_speed_per_level: f64,
    #[serde(rename = "attackspeed")]
    pub attack_speed: f64,
}
