//! Order records and submission to an external store.

mod record;
mod store;

pub use record::{OrderLineItem, OrderRecord};
pub use store::{
    submit_order, JsonFileOrderStore, MemoryOrderStore, OrderReceipt, OrderStore, RetryPolicy,
    StoreError,
};
