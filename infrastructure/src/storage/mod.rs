//! Record persistence adapters

mod record_store;

pub use record_store::JsonRecordStore;
