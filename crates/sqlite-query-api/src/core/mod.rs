pub mod columns;
pub mod connection;
pub mod ident;
pub mod limits;
pub mod query;
pub mod rows;
pub mod schema;
pub mod types;
