//! Layer planning
//!
//! Turns a [`UserStyles`] snapshot into the ordered list of sprites to draw.
//! Later layers are pasted over earlier ones, so the order produced here is
//! the drawing order.

use super::gear::{resolve_gear, GearSlot};
use super::styles::UserStyles;

pub const CANVAS_WIDTH: u32 = 141;
pub const CANVAS_HEIGHT: u32 = 147;

/// Left edge of every character sprite
pub const CHARACTER_X: i64 = 24;
/// Vertical shift of the character when not riding
pub const UNMOUNTED_OFFSET_Y: i64 = 24;
/// Top edge of mount body and head sprites
pub const MOUNT_Y: i64 = 18;
pub const PET_POSITION: (i64, i64) = (0, 48);

// Fallbacks matching the defaults of a freshly registered account.
const DEFAULT_SKIN: &str = "915533";
const DEFAULT_SHIRT: &str = "blue";
const DEFAULT_HAIR_COLOR: &str = "red";

/// One sprite and where its top-left corner lands on the canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub asset: String,
    pub x: i64,
    pub y: i64,
}

impl Layer {
    pub fn new(asset: impl Into<String>, x: i64, y: i64) -> Self {
        Self {
            asset: asset.into(),
            x,
            y,
        }
    }
}

/// Riders sit higher; without a mount the character is shifted down.
pub fn mount_offset_y(styles: &UserStyles) -> i64 {
    if styles.items.current_mount().is_some() {
        0
    } else {
        UNMOUNTED_OFFSET_Y
    }
}

/// Build the full drawing order for a snapshot
pub fn plan_layers(styles: &UserStyles) -> Vec<Layer> {
    let preferences = &styles.preferences;
    let items = &styles.items;
    let buffs = &styles.stats.buffs;
    let offset_y = mount_offset_y(styles);
    let character = |asset: String| Layer::new(asset, CHARACTER_X, offset_y);

    let mut layers = Vec::new();

    if let Some(background) = preferences.background() {
        layers.push(Layer::new(format!("background_{}", background), 0, 0));
    }

    if let Some(mount) = items.current_mount() {
        layers.push(Layer::new(format!("Mount_Body_{}", mount), CHARACTER_X, MOUNT_Y));
    }

    if buffs.is_transformed() {
        let class = styles.stats.class;
        if buffs.spooky_sparkles() {
            layers.push(character("ghost".to_string()));
        }
        // Both class sprites follow shinySeed; the snowball flag only selects
        // this branch.
        if buffs.shiny_seed() {
            layers.push(character(format!("avatar_snowball_{}", class)));
        }
        if buffs.shiny_seed() {
            layers.push(character(format!("avatar_floral_{}", class)));
        }
        if buffs.seafoam() {
            layers.push(character("seafoam_star".to_string()));
        }
        push_hair_flower(&mut layers, styles, offset_y);
    } else {
        let size = preferences.size();
        let gear = |layers: &mut Vec<Layer>, slot: GearSlot| {
            if let Some(asset) = resolve_gear(styles, slot) {
                layers.push(character(asset));
            }
        };

        if let Some(chair) = preferences.chair.as_deref() {
            if !chair.is_empty() && chair != "none" {
                layers.push(Layer::new(format!("chair_{}", chair), CHARACTER_X, 0));
            }
        }

        gear(&mut layers, GearSlot::Back);

        let skin = preferences.skin.as_deref().unwrap_or(DEFAULT_SKIN);
        let sleep_suffix = if preferences.sleep() { "_sleep" } else { "" };
        layers.push(character(format!("skin_{}{}", skin, sleep_suffix)));

        let shirt = preferences.shirt.as_deref().unwrap_or(DEFAULT_SHIRT);
        layers.push(character(format!("{}_shirt_{}", size, shirt)));

        layers.push(character("head_0".to_string()));

        gear(&mut layers, GearSlot::Armor);

        let hair = &preferences.hair;
        let color = hair.color.as_deref().unwrap_or(DEFAULT_HAIR_COLOR);
        let regions = [
            ("bangs", hair.bangs),
            ("base", hair.base),
            ("mustache", hair.mustache),
            ("beard", hair.beard),
        ];
        for (region, style) in regions {
            match style {
                Some(style) if style != 0 => {
                    layers.push(character(format!("hair_{}_{}_{}", region, style, color)));
                }
                _ => {}
            }
        }

        for slot in [
            GearSlot::Body,
            GearSlot::Eyewear,
            GearSlot::Head,
            GearSlot::HeadAccessory,
        ] {
            gear(&mut layers, slot);
        }

        push_hair_flower(&mut layers, styles, offset_y);

        gear(&mut layers, GearSlot::Shield);
        gear(&mut layers, GearSlot::Weapon);
    }

    if preferences.sleep() {
        layers.push(character("zzz".to_string()));
    }

    if let Some(mount) = items.current_mount() {
        layers.push(Layer::new(format!("Mount_Head_{}", mount), CHARACTER_X, MOUNT_Y));
    }

    if let Some(pet) = items.current_pet() {
        let (x, y) = PET_POSITION;
        layers.push(Layer::new(format!("Pet-{}", pet), x, y));
    }

    layers
}

fn push_hair_flower(layers: &mut Vec<Layer>, styles: &UserStyles, offset_y: i64) {
    if let Some(flower) = styles.preferences.hair.flower.filter(|flower| *flower != 0) {
        layers.push(Layer::new(
            format!("hair_flower_{}", flower),
            CHARACTER_X,
            offset_y,
        ));
    }
}
