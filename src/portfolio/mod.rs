//! Client-side state for portfolio editing: the form, its feature list,
//! the pending-upload queue, the image order, and the multi-step save.

pub mod features;
pub mod form;
pub mod reorder;
pub mod uploader;
pub mod workflow;

pub use features::{FeatureEditor, FeatureList};
pub use form::{FormMode, PortfolioForm};
pub use reorder::ImageReorder;
pub use uploader::{ImageUploader, LocalFile};
pub use workflow::EditWorkflow;
