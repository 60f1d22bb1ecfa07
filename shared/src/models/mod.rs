//! Domain models for the packaging production tracking platform

mod consumption;
mod currency;
mod cut_product;
mod production;
mod raw_material;
mod shipment;
pub mod stock;
mod user;

pub use consumption::*;
pub use currency::*;
pub use cut_product::*;
pub use production::*;
pub use raw_material::*;
pub use shipment::*;
pub use stock::*;
pub use user::*;
