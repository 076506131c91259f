//! Risk keyword table and clause matcher.

mod matcher;
mod table;

pub use matcher::RiskMatcher;
pub use table::{RiskKeywordTable, SeverityTier};
