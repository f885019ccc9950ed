pub mod app;
pub mod args;
pub mod colors;
pub mod editor;
pub mod error;
pub mod metadata;
pub mod model;
pub mod ui;
pub mod utils;

pub use app::App;
pub use args::Args;
pub use editor::{Editor, resolve_editor};
pub use error::{DeletionError, PutError, Result};
pub use metadata::EntryMetadata;
pub use model::DirectoryModel;
pub use utils::{DiskUsage, sizeof_fmt};
