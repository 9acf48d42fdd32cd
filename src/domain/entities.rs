use std::{
    fmt,
    str::FromStr,
    time::{Duration, SystemTime},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Game league a price snapshot belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum League {
    Standard,
    Hardcore,
    #[default]
    Mercenaries,
    HardcoreMercenaries,
}

impl League {
    pub const ALL: [League; 4] = [
        League::Standard,
        League::Hardcore,
        League::Mercenaries,
        League::HardcoreMercenaries,
    ];

    /// URL segment used for routing and configuration.
    pub fn slug(&self) -> &'static str {
        match self {
            League::Standard => "standard",
            League::Hardcore => "hardcore",
            League::Mercenaries => "mercenaries",
            League::HardcoreMercenaries => "hardcore-mercenaries",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            League::Standard => "Standard",
            League::Hardcore => "Hardcore",
            League::Mercenaries => "Mercenaries",
            League::HardcoreMercenaries => "Hardcore Mercenaries",
        }
    }

    /// League identifier expected by the price API and the trade site.
    pub fn api_name(&self) -> &'static str {
        // Display and API names currently coincide.
        self.name()
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown league: {0}")]
pub struct UnknownLeague(pub String);

impl FromStr for League {
    type Err = UnknownLeague;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        League::ALL
            .into_iter()
            .find(|league| league.slug() == s)
            .ok_or_else(|| UnknownLeague(s.to_string()))
    }
}

/// Unique item category as reported by the price API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ItemCategory {
    Weapon,
    Armour,
    Accessory,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 3] = [
        ItemCategory::Weapon,
        ItemCategory::Armour,
        ItemCategory::Accessory,
    ];

    pub fn api_name(&self) -> &'static str {
        match self {
            ItemCategory::Weapon => "UniqueWeapon",
            ItemCategory::Armour => "UniqueArmour",
            ItemCategory::Accessory => "UniqueAccessory",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemCategory::Weapon => "Weapon",
            ItemCategory::Armour => "Armour",
            ItemCategory::Accessory => "Accessory",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown item category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ItemCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemCategory::ALL
            .into_iter()
            .find(|category| category.api_name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for ItemCategory {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ItemCategory> for String {
    fn from(value: ItemCategory) -> Self {
        value.api_name().to_string()
    }
}

/// Current market price of one unique, per league.
#[derive(Clone, Debug, PartialEq)]
pub struct MarketQuote {
    pub name: String,
    pub chaos_value: f64,
    pub base_type: String,
    pub category: ItemCategory,
}

/// Dust yields of one unique from the bundled reference catalogue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldRecord {
    pub name: String,
    pub base_type: String,
    #[serde(rename = "dustVal")]
    pub dust_base: f64,
    #[serde(rename = "dustValIlvl84")]
    pub dust_ilvl84: f64,
    #[serde(rename = "dustValIlvl84Q20")]
    pub dust_ilvl84_q20: f64,
    pub dust_per_slot: f64,
    #[serde(rename = "w")]
    pub width: u8,
    #[serde(rename = "h")]
    pub height: u8,
    pub slots: u8,
    pub link: String,
}

/// A priced unique with its derived disenchant efficiency.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Item {
    /// Position within one merge; not stable across merges.
    pub id: usize,
    pub unique_id: String,
    pub name: String,
    pub base_type: String,
    pub chaos: f64,
    pub variant: Option<String>,
    pub calculated_dust_value: f64,
    pub dust_per_chaos: f64,
    pub category: ItemCategory,
}

/// Result of one merge run for a league.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemDataset {
    pub league: League,
    pub items: Vec<Item>,
    pub last_updated: SystemTime,
    /// Quote names dropped because the catalogue has no yield data for them.
    pub missing: Vec<String>,
}

impl ItemDataset {
    pub fn age(&self) -> Duration {
        self.last_updated.elapsed().unwrap_or_default()
    }

    pub fn is_stale(&self, threshold: Duration) -> bool {
        self.age() > threshold
    }

    /// Compact age such as `42s`, `5m`, `3h` or `2d`.
    pub fn age_string(&self) -> String {
        let secs = self.age().as_secs();
        if secs < 60 {
            format!("{secs}s")
        } else if secs < 3600 {
            format!("{}m", secs / 60)
        } else if secs < 86400 {
            format!("{}h", secs / 3600)
        } else {
            format!("{}d", secs / 86400)
        }
    }

    pub fn relative_label(&self) -> String {
        relative_time(self.age())
    }

    /// RFC 3339 timestamp of the merge, for tooltips.
    pub fn absolute_label(&self) -> String {
        OffsetDateTime::from(self.last_updated)
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

pub fn relative_time(age: Duration) -> String {
    let minutes = age.as_secs() / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "just now".to_string()
    } else if hours < 1 {
        plural(minutes, "minute")
    } else if days < 1 {
        plural(hours, "hour")
    } else {
        plural(days, "day")
    }
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn league_slugs_round_trip() {
        for league in League::ALL {
            assert_eq!(league.slug().parse::<League>(), Ok(league));
        }
        assert_eq!(
            "hardcore-mercenaries".parse::<League>().map(|l| l.api_name()),
            Ok("Hardcore Mercenaries")
        );
    }

    #[test]
    fn unknown_league_is_rejected() {
        assert_eq!(
            "Mercenaries".parse::<League>(),
            Err(UnknownLeague("Mercenaries".to_string()))
        );
        assert!("".parse::<League>().is_err());
    }

    #[test]
    fn category_accepts_only_known_strings() {
        assert_eq!("UniqueArmour".parse::<ItemCategory>(), Ok(ItemCategory::Armour));
        assert_eq!(
            "UniqueFlask".parse::<ItemCategory>(),
            Err(UnknownCategory("UniqueFlask".to_string()))
        );
    }

    #[test]
    fn yield_record_reads_catalogue_keys() {
        let json = r#"{
            "name": "Goldrim",
            "baseType": "Leather Cap",
            "dustVal": 100,
            "dustValIlvl84": 250,
            "dustValIlvl84Q20": 300,
            "dustPerSlot": 75,
            "w": 2,
            "h": 2,
            "slots": 4,
            "link": "https://www.poewiki.net/wiki/Goldrim"
        }"#;
        let record: YieldRecord = serde_json::from_str(json).expect("valid record");
        assert_eq!(record.base_type, "Leather Cap");
        assert_eq!(record.dust_base, 100.0);
        assert_eq!(record.dust_ilvl84, 250.0);
        assert_eq!(record.dust_ilvl84_q20, 300.0);
        assert_eq!((record.width, record.height, record.slots), (2, 2, 4));
    }

    #[test]
    fn relative_labels() {
        assert_eq!(relative_time(Duration::from_secs(30)), "just now");
        assert_eq!(relative_time(Duration::from_secs(60)), "1 minute ago");
        assert_eq!(relative_time(Duration::from_secs(5 * 60)), "5 minutes ago");
        assert_eq!(relative_time(Duration::from_secs(2 * 3600)), "2 hours ago");
        assert_eq!(relative_time(Duration::from_secs(3 * 86400)), "3 days ago");
    }

    #[test]
    fn dataset_staleness_uses_last_updated() {
        let dataset = ItemDataset {
            league: League::Standard,
            items: Vec::new(),
            last_updated: SystemTime::now() - Duration::from_secs(600),
            missing: Vec::new(),
        };
        assert!(dataset.is_stale(Duration::from_secs(300)));
        assert!(!dataset.is_stale(Duration::from_secs(3600)));
        assert_eq!(dataset.age_string(), "10m");
        assert!(dataset.absolute_label().contains('T'));
    }
}
