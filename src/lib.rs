pub mod analyzers;
pub mod config;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod stats;
pub mod store;

pub use analyzers::groups::GroupKey;
pub use analyzers::ranking::PASS_SLOTS;
pub use stats::StatsData;
pub use store::StatsStore;
