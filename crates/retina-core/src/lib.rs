pub mod annotation;
pub mod comparison;
pub mod config;
pub mod consts;
pub mod error;
pub mod evolution;
pub mod filters;
pub mod geometry;
pub mod io;
pub mod report;
pub mod repository;
pub mod scan;
pub mod session;
pub mod severity;
pub mod viewport;
