pub mod content;
pub mod template;

pub use content::{BlockContent, BlockSettings, ContentBlock, ContentShapeError};
pub use template::{list_block_types, template_for, BlockTemplate, BlockType, BlockTypeInfo};
