mod file_store;
mod key_value;
mod session;

pub use file_store::JsonFileStore;
pub use key_value::{InMemoryKeyValueStore, KeyValueStore};
pub use session::{ACCESS_TOKEN_KEY, SessionStore, USER_KEY};
