//! Domain types shared by every stage of the pipeline.

pub mod salary;

pub use salary::{Dataset, RawRow, SalaryRecord, Season};
