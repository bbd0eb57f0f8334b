pub mod get_doc;
pub mod search;
pub mod status;

pub use get_doc::*;
pub use search::*;
pub use status::*;
