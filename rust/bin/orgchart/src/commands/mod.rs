pub mod chart;
pub mod context;
pub mod login;
pub mod roster;
pub mod serve;
