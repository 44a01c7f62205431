pub mod error;
pub mod split;
pub mod table;

pub use error::{DatasetError, Result};
pub use split::{Split, TARGET_COLUMN, split_features_target};
pub use table::{DataSource, Table};
