pub mod audit;
pub mod dispatch;
pub mod import;
pub mod schema;
pub mod serve;
pub mod token;
