//! Rule tables and load-time rule classification.

pub mod keywords;
pub mod table;

pub use keywords::FareKeywords;
pub use table::FareRuleTable;
