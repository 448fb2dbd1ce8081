// Input ingestion and the stage cache
pub mod csv_parser;
pub mod json_parser;
pub mod loader;
pub mod schema;
pub mod stage_cache;
