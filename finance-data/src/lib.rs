mod batch;
mod schedule_loader;
mod tables_config;

pub use batch::{BatchLoadError, TaxInputLoader, TaxInputRecord};
pub use schedule_loader::{BracketRecord, ScheduleLoader, ScheduleLoaderError};
pub use tables_config::{TablesConfigError, load_tables, parse_tables, tables_to_toml};
