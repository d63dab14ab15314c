pub mod id;
pub mod model;
pub mod seo;
pub mod validate;

pub use id::{BlockId, PageId};
pub use model::{slugify, PageDocument, PageStatus};
pub use seo::{parse_keywords, SearchPreview, SeoMetadata};
pub use validate::{validate_document, validate_slug, ValidationError};
