//! Salary feed acquisition and table extraction

pub mod http;
pub mod provider;
pub mod table;

pub use http::HttpProvider;
pub use provider::{DataSource, FetchError, FetchResult, SalaryProvider, StaticProvider};
pub use table::{extract_rows, Column, ColumnMap, TableError};
