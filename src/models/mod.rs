pub mod period;
pub mod record_set;
pub mod transaction;

pub use period::*;
pub use record_set::*;
pub use transaction::*;
