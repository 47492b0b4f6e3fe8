pub mod ledger;
pub mod lecture;
pub mod semester;
pub mod stats;
