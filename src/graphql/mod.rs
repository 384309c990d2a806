pub mod handler;
pub mod schema;

pub use handler::{graphiql, graphql_handler};
pub use schema::{create_schema, MutationRoot, QueryRoot, Schema};
