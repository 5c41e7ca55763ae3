//! Avatar rendering
//!
//! A user's avatar is a stack of small sprites (background, mount, skin,
//! shirt, hair, gear, pet) pasted in a fixed order onto a 141×147 canvas.
//! [`plan_layers`] decides what goes on the stack, [`AvatarCompositor`]
//! fetches and draws it.

pub mod canvas;
pub mod compositor;
pub mod gear;
pub mod plan;
pub mod styles;

pub use canvas::{decode_sprite, Canvas};
pub use compositor::{AvatarCompositor, RenderReport, SkipReason, SkippedLayer};
pub use gear::{resolve_gear, special_asset, GearSlot, SPECIAL_ASSETS};
pub use plan::{mount_offset_y, plan_layers, Layer, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use styles::{
    BuffsStyles, EquippedGear, GearStyles, HabiticaClass, HairPreferences, ItemsStyles,
    PreferencesStyles, StatsStyles, UserStyles, DEFAULT_SIZE,
};
