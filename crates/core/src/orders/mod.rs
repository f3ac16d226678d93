//! Clinic orders: records, filtering and per-clinic rollups.

pub mod error;
pub mod filter;
pub mod service;
pub mod types;


pub use error::OrderError;
pub use filter::OrderFilter;
pub use service::OrderService;
pub use types::{Clinic, ClinicOrderSummary, ClinicOrders, Order, OrderStatus, OrderSummary};
