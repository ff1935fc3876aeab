use chrono::{DateTime, Datelike, Duration, FixedOffset, Utc};

/// Civil timezone all week math is anchored to: America/Sao_Paulo,
/// a fixed UTC-03:00 offset, no DST.
const TZ_OFFSET_SECS: i32 = 3 * 3600;

/// Monday of the week containing `instant`, as a `YYYY-MM-DD` string
/// resolved in the fixed civil timezone.
///
/// Never fails: if the fixed offset cannot be constructed the UTC calendar
/// date is used instead, a degraded but non-fatal path.
pub fn week_start_for(instant: DateTime<Utc>) -> String {
    let local_date = match FixedOffset::west_opt(TZ_OFFSET_SECS) {
        Some(tz) => instant.with_timezone(&tz).date_naive(),
        None => instant.date_naive(),
    };

    // Monday=0 .. Sunday=6, so this is exactly the number of days to walk back.
    let days_back = i64::from(local_date.weekday().num_days_from_monday());
    let monday = local_date - Duration::days(days_back);
    monday.format("%Y-%m-%d").to_string()
}

/// Time source for the progress store and session factory.
/// `Clock::fixed` pins the instant so tests can place sessions in a chosen week.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    fixed: Option<DateTime<Utc>>,
}

impl Clock {
    pub fn system() -> Self {
        Clock { fixed: None }
    }

    pub fn fixed(instant: DateTime<Utc>) -> Self {
        Clock { fixed: Some(instant) }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.fixed.unwrap_or_else(Utc::now)
    }

    /// Monday of the current week in the fixed civil timezone.
    pub fn week_start(&self) -> String {
        week_start_for(self.now())
    }

    /// Current UTC calendar date as `YYYY-MM-DD` (session `date` field).
    pub fn today(&self) -> String {
        self.now().date_naive().format("%Y-%m-%d").to_string()
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}
