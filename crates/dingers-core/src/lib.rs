// Core domain for the fantasy home-run tracker: configuration, name
// normalization, the roster index and calendar periods.

pub mod config;
pub mod normalize;
pub mod period;
pub mod roster;
