//! Delivery date projection module.

mod working_days;

pub use working_days::{
    add_working_days, is_working_day, project_delivery, project_delivery_at, DeliverySchedule,
};
