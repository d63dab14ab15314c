pub mod ops;
pub mod types;

pub use ops::{
    add_block, delete_block, duplicate_block, move_block, reorder, set_seo, set_slug, set_status,
    set_title, toggle_visibility, update_block,
};
pub use types::{BlockPatch, Command, Direction, MutationError, Outcome, SettingsPatch};
