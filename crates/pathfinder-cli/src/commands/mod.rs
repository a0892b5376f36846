pub mod business_case;
pub mod catalog;
pub mod growth;
pub mod roi;
pub mod tco;
pub mod timeline;
