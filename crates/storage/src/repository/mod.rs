pub mod consent;
pub mod results;
