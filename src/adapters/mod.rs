// Adapters layer: concrete implementations for external systems (store, local files).

pub mod local_storage;
pub mod supabase;

pub use local_storage::LocalStorage;
pub use supabase::SupabaseClient;
