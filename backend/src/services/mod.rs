//! Business logic services for the packaging production tracking server

pub mod auth;
pub mod consumption;
pub mod currency;
pub mod cut_product;
pub mod production;
pub mod raw_material;
pub mod shipment;
pub mod stock;
pub mod user;

pub use auth::AuthService;
pub use consumption::ConsumptionService;
pub use currency::CurrencyService;
pub use cut_product::CutProductService;
pub use production::ProductionService;
pub use raw_material::RawMaterialService;
pub use shipment::ShipmentService;
pub use stock::StockService;
pub use user::UserService;
