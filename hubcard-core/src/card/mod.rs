//! Model card document and metadata.

pub mod data;
pub mod document;
pub mod template;

pub use data::ModelCardData;
pub use document::ModelCard;
pub use template::render_training_body;
