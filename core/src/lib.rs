pub mod catalog;
pub mod config;
pub mod dedup;
pub mod issues;
pub mod pipeline;
pub mod report;
pub mod safety;
pub mod validator;

pub mod error;
