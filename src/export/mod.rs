//! CSV export of report resources.
//!
//! Resources are written with the header
//! `last_access_date,public_id,secure_url`, one row per resource, most
//! recently accessed first. `last_access` is rendered as `MM-DD-YYYY` in
//! UTC. Output files are staged next to their destination and only moved
//! into place once every row has been written.

mod csv_writer;
mod recency;
mod row;
mod staged_file;

pub use csv_writer::write_csv;
pub use recency::sort_by_recency;
pub use row::{CSV_HEADER, ExportedRow, LAST_ACCESS_DATE_FORMAT};
pub use staged_file::StagedFile;
