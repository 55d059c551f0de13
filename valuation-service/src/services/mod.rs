pub mod linear;
pub mod metrics;
pub mod model;
pub mod store;

pub use linear::LinearPriceModel;
pub use metrics::{get_metrics, init_metrics, record_valuation};
pub use model::{ModelError, PriceModel};
pub use store::load_or_train;
