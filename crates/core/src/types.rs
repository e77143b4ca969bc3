/// Archive primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Users come from the external identity provider and are keyed by UUID.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Usage is metered per UTC calendar date.
pub type UsageDate = chrono::NaiveDate;

/// The metering day for "now".
pub fn usage_day() -> UsageDate {
    chrono::Utc::now().date_naive()
}
