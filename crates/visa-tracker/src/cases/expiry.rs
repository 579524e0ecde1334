use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

/// Signed calendar-day distance from `today` to `expiration`.
///
/// Negative once the expiration date has passed, zero on the expiration day itself.
pub fn days_left(expiration: NaiveDate, today: NaiveDate) -> i64 {
    (expiration - today).num_days()
}

/// Same as [`days_left`], truncating `now` to its calendar date in its own time zone.
pub fn days_left_at<Tz: TimeZone>(expiration: NaiveDate, now: &DateTime<Tz>) -> i64 {
    days_left(expiration, now.date_naive())
}

/// Whole calendar months from `start` to `end`; a trailing partial month is not counted.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let years = i64::from(end.year()) - i64::from(start.year());
    let months = i64::from(end.month()) - i64::from(start.month());
    let mut total = years * 12 + months;
    if total > 0 && end.day() < start.day() {
        total -= 1;
    } else if total < 0 && end.day() > start.day() {
        total += 1;
    }
    total
}
