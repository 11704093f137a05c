// Service exports
pub mod oracle;
pub mod postgres;
pub mod store;

pub use oracle::{CompletionClient, OracleError, RankingOracle};
pub use postgres::{PgConnector, PgSession, PROFILES_QUERY};
pub use store::{ProfileStore, StoreConnector, StoreError, StoreSession};
