//! Grammar productions, split by statement family. Each submodule adds
//! methods to [`Parser`](super::Parser).

pub mod ddl;
pub mod dml;
pub mod expressions;
pub mod functions;
pub mod query;
pub mod types;
