//! Command implementations.

pub mod candidates;
pub mod config;
pub mod inventory;
pub mod recommend;

pub use self::candidates::execute_candidates;
pub use self::config::execute_config;
pub use self::inventory::execute_inventory;
pub use self::recommend::execute_recommend;
