//! Time windows used to bucket automation records for quota accounting.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};

/// Longest accepted rolling window, about ten years.
pub const MAX_ROLLING_DAYS: u32 = 3650;

/// The span over which a user's processed-product count is capped.
///
/// Calendar windows start at local midnight; the rolling window is measured
/// backwards from `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaWindow {
    /// From local midnight of the current day.
    Daily,
    /// From local midnight of the most recent Monday.
    Weekly,
    /// The trailing `days` days ending at `now`.
    Rolling { days: u32 },
}

impl QuotaWindow {
    /// Returns the inclusive lower bound of the window that contains `now`.
    #[must_use]
    pub fn start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.with_timezone(&Local).date_naive();
        match self {
            Self::Daily => local_midnight(today),
            Self::Weekly => {
                let back = today.weekday().num_days_from_monday();
                local_midnight(today - Duration::days(i64::from(back)))
            }
            Self::Rolling { days } => now
                .checked_sub_signed(Duration::days(i64::from(days)))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        }
    }
}

fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    // Midnight can fall inside a DST gap; treat it as UTC midnight then.
    Local.from_local_datetime(&naive).earliest().map_or_else(
        || Utc.from_utc_datetime(&naive),
        |dt| dt.with_timezone(&Utc),
    )
}

impl std::fmt::Display for QuotaWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuotaWindow::Daily => write!(f, "daily"),
            QuotaWindow::Weekly => write!(f, "weekly"),
            QuotaWindow::Rolling { days } => write!(f, "rolling:{days}"),
        }
    }
}

impl FromStr for QuotaWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            other => {
                let days = other
                    .strip_prefix("rolling:")
                    .ok_or_else(|| format!("unknown quota window \"{s}\""))?
                    .parse::<u32>()
                    .map_err(|e| format!("invalid rolling window length: {e}"))?;
                if days == 0 || days > MAX_ROLLING_DAYS {
                    return Err(format!(
                        "rolling window must span 1 to {MAX_ROLLING_DAYS} days, got {days}"
                    ));
                }
                Ok(Self::Rolling { days })
            }
        }
    }
}
