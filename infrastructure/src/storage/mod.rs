//! Local persistence adapters

mod json_profile_store;

pub use json_profile_store::JsonFileProfileStore;
