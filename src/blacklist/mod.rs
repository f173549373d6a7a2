pub mod error;
pub mod parser;
pub mod report;
pub mod store;
pub mod types;

pub use error::BlacklistError;
pub use parser::parse_bulk_xml;
pub use report::ReportHandle;
pub use store::BlacklistStore;
pub use types::{BlacklistScope, BulkItem, MediaId};
