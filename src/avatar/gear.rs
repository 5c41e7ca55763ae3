//! Gear slots and sprite name resolution

use super::styles::{EquippedGear, UserStyles};

/// Equipment categories, in no particular drawing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GearSlot {
    Weapon,
    Armor,
    Head,
    Shield,
    Back,
    HeadAccessory,
    Eyewear,
    Body,
}

impl GearSlot {
    pub const ALL: [GearSlot; 8] = [
        GearSlot::Weapon,
        GearSlot::Armor,
        GearSlot::Head,
        GearSlot::Shield,
        GearSlot::Back,
        GearSlot::HeadAccessory,
        GearSlot::Eyewear,
        GearSlot::Body,
    ];

    /// Slot name as used in item keys
    pub fn as_str(&self) -> &'static str {
        match self {
            GearSlot::Weapon => "weapon",
            GearSlot::Armor => "armor",
            GearSlot::Head => "head",
            GearSlot::Shield => "shield",
            GearSlot::Back => "back",
            GearSlot::HeadAccessory => "headAccessory",
            GearSlot::Eyewear => "eyewear",
            GearSlot::Body => "body",
        }
    }

    /// Item key meaning "nothing equipped", e.g. `armor_base_0`
    pub fn base_sentinel(&self) -> String {
        format!("{}_base_0", self.as_str())
    }
}

impl EquippedGear {
    /// Item key in `slot`, if any
    pub fn get(&self, slot: GearSlot) -> Option<&str> {
        let item = match slot {
            GearSlot::Weapon => &self.weapon,
            GearSlot::Armor => &self.armor,
            GearSlot::Head => &self.head,
            GearSlot::Shield => &self.shield,
            GearSlot::Back => &self.back,
            GearSlot::HeadAccessory => &self.head_accessory,
            GearSlot::Eyewear => &self.eyewear,
            GearSlot::Body => &self.body,
        };
        item.as_deref()
    }
}

/// Items whose sprite does not follow the `<item key>.png` convention.
/// 2019 Kickstarter backer gear only exists as animated GIFs.
pub const SPECIAL_ASSETS: &[(&str, &str)] = &[
    ("armor_special_ks2019", "BackerOnly-Equip-MythicGryphonArmor.gif"),
    ("eyewear_special_ks2019", "BackerOnly-Equip-MythicGryphonVisor.gif"),
    ("head_special_ks2019", "BackerOnly-Equip-MythicGryphonHelm.gif"),
    ("shield_special_ks2019", "BackerOnly-Equip-MythicGryphonShield.gif"),
    ("weapon_special_ks2019", "BackerOnly-Equip-MythicGryphonGlaive.gif"),
];

/// Sprite file for an item that breaks the naming convention
pub fn special_asset(item: &str) -> Option<&'static str> {
    SPECIAL_ASSETS
        .iter()
        .find(|(key, _)| *key == item)
        .map(|(_, asset)| *asset)
}

/// Sprite name for the item worn in `slot`, or `None` when nothing is drawn.
///
/// Costume gear is used instead of battle gear when the costume preference is
/// on. Armor sprites come in slim and broad cuts and get the body size as a
/// prefix.
pub fn resolve_gear(styles: &UserStyles, slot: GearSlot) -> Option<String> {
    let gear = if styles.preferences.costume() {
        &styles.items.gear.costume
    } else {
        &styles.items.gear.equipped
    };

    let item = gear.get(slot).filter(|item| !item.is_empty())?;
    if item == slot.base_sentinel() {
        return None;
    }

    if let Some(asset) = special_asset(item) {
        return Some(asset.to_string());
    }

    match slot {
        GearSlot::Armor => {
            Some(format!("{}_{}", styles.preferences.size(), item))
        }
        _ => Some(item.to_string()),
    }
}
