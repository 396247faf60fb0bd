pub mod memory;
pub mod migrations;
pub mod pool;
pub mod profiles;
pub mod store;
pub mod util;

pub use memory::InMemoryProfileStore;
pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool_from_url, create_pool_from_url_checked, DbPoolError, PgPool};
pub use profiles::PgProfileStore;
pub use store::{ProfileStore, ProfileStoreError};
