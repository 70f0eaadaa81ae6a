pub mod csv_import;
pub mod json_catalog;
