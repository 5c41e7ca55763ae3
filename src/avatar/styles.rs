//! Avatar style snapshot
//!
//! The minimal projection of a user profile needed to draw the avatar:
//! cosmetic preferences, equipped items and the buffs that swap the avatar
//! for a transformation sprite. Field names follow the API's camelCase JSON
//! and every field is optional so trimmed documents still load.

use serde::{Deserialize, Serialize};

/// Body size of a freshly registered account
pub const DEFAULT_SIZE: &str = "slim";

/// The API sends `""` for cleared values; treat it like a missing field.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Preferences, items and stats of a user, as far as rendering cares
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStyles {
    pub items: ItemsStyles,
    pub preferences: PreferencesStyles,
    pub stats: StatsStyles,
}

impl UserStyles {
    /// Parse a snapshot from its JSON form
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Hair color and per-region style indices. A style of 0 means "none".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HairPreferences {
    pub color: Option<String>,
    pub base: Option<u32>,
    pub bangs: Option<u32>,
    pub beard: Option<u32>,
    pub mustache: Option<u32>,
    pub flower: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesStyles {
    pub hair: HairPreferences,
    pub size: Option<String>,
    pub skin: Option<String>,
    pub shirt: Option<String>,
    pub chair: Option<String>,
    pub costume: Option<bool>,
    pub sleep: Option<bool>,
    pub background: Option<String>,
}

impl PreferencesStyles {
    pub fn costume(&self) -> bool {
        self.costume.unwrap_or(false)
    }

    pub fn sleep(&self) -> bool {
        self.sleep.unwrap_or(false)
    }

    /// Body size shared by shirt and armor sprites, `slim` when unset
    pub fn size(&self) -> &str {
        non_empty(&self.size).unwrap_or(DEFAULT_SIZE)
    }

    pub fn background(&self) -> Option<&str> {
        non_empty(&self.background)
    }
}

/// One gear set: slot name to item key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EquippedGear {
    pub weapon: Option<String>,
    pub armor: Option<String>,
    pub head: Option<String>,
    pub shield: Option<String>,
    pub back: Option<String>,
    pub head_accessory: Option<String>,
    pub eyewear: Option<String>,
    pub body: Option<String>,
}

/// Battle gear and the costume worn over it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GearStyles {
    pub equipped: EquippedGear,
    pub costume: EquippedGear,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemsStyles {
    pub gear: GearStyles,
    pub current_mount: Option<String>,
    pub current_pet: Option<String>,
}

impl ItemsStyles {
    pub fn current_mount(&self) -> Option<&str> {
        non_empty(&self.current_mount)
    }

    pub fn current_pet(&self) -> Option<&str> {
        non_empty(&self.current_pet)
    }
}

/// Active buffs. Only the four visual flags influence rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuffsStyles {
    pub per: Option<f64>,
    pub con: Option<f64>,
    pub stealth: Option<f64>,
    pub seafoam: Option<bool>,
    pub shiny_seed: Option<bool>,
    pub snowball: Option<bool>,
    pub spooky_sparkles: Option<bool>,
}

impl BuffsStyles {
    pub fn seafoam(&self) -> bool {
        self.seafoam.unwrap_or(false)
    }

    pub fn shiny_seed(&self) -> bool {
        self.shiny_seed.unwrap_or(false)
    }

    pub fn snowball(&self) -> bool {
        self.snowball.unwrap_or(false)
    }

    pub fn spooky_sparkles(&self) -> bool {
        self.spooky_sparkles.unwrap_or(false)
    }

    /// Whether any transformation buff replaces the regular avatar
    pub fn is_transformed(&self) -> bool {
        self.seafoam() || self.shiny_seed() || self.snowball() || self.spooky_sparkles()
    }
}

/// Character class as named by the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabiticaClass {
    #[default]
    Warrior,
    Rogue,
    /// Shown as "Mage" in the apps
    Wizard,
    Healer,
}

impl HabiticaClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabiticaClass::Warrior => "warrior",
            HabiticaClass::Rogue => "rogue",
            HabiticaClass::Wizard => "wizard",
            HabiticaClass::Healer => "healer",
        }
    }
}

impl std::fmt::Display for HabiticaClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsStyles {
    pub buffs: BuffsStyles,
    pub class: HabiticaClass,
}
