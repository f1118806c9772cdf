pub mod file;
pub mod types;

pub use file::{get_store_path, load_store, save_store};
pub use types::{Store, StoredEvaluation};
