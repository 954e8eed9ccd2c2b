//! Loading work-package exports into [`ActionRow`](amos_model::ActionRow)s.

pub mod columns;
mod discovery;
pub mod error;
mod reader;

pub use columns::WorkPackageColumns;
pub use discovery::list_work_packages;
pub use error::{IngestError, Result};
pub use reader::{WorkPackage, parse_date, read_work_package};
