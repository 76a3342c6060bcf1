pub mod analysis_client;
pub mod auth_client;
pub mod catalog_client;

pub use analysis_client::AnalysisClient;
pub use auth_client::AuthClient;
pub use catalog_client::CatalogClient;
