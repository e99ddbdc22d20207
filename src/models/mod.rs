pub mod geocoding;
pub mod routes;
