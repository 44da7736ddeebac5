/// All backend primary keys are 64-bit integers.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (planned start, deadlines) carry no time zone.
pub type Date = chrono::NaiveDate;
