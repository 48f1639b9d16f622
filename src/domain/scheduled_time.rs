use chrono::{DateTime, Datelike, FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeZone};

/// An optional future instant at which the batch should be delivered,
/// rendered as `YYYY-MM-DDTHH:MM:SS±HH:MM`.
///
/// The user enters a plain local date and time with no zone indicator. We
/// resolve it against the submitting environment's timezone and emit the
/// UTC-normalized date-time followed by that zone's signed offset, so the
/// remote service receives an unambiguous instant no matter where the batch
/// was submitted from.
#[derive(Debug, Clone)]
pub struct ScheduledTime(String);

impl ScheduledTime {
    /// Accepts `YYYY-MM-DDTHH:MM` and `YYYY-MM-DDTHH:MM:SS`, resolved against
    /// the local timezone.
    pub fn parse(s: String) -> Result<Self, String> {
        let naive = parse_date_time(&s)?;
        let instant = resolve(naive, &Local)?;
        let offset = instant.offset().fix();
        Self::from_utc(instant.naive_utc(), offset)
    }

    /// Same as [`ScheduledTime::parse`], with the timezone offset supplied by
    /// the caller instead of taken from the environment.
    pub fn parse_with_offset(s: String, offset: FixedOffset) -> Result<Self, String> {
        let naive = parse_date_time(&s)?;
        let instant = resolve(naive, &offset)?;
        Self::from_utc(instant.naive_utc(), offset)
    }

    // Normalization moves the date by up to a day, so the four-digit fence
    // has to hold for the UTC year too, not just the entered one
    fn from_utc(utc: NaiveDateTime, offset: FixedOffset) -> Result<Self, String> {
        if !(0..=9999).contains(&utc.year()) {
            return Err(format!("{} is out of range for a schedule year.", utc.year()));
        }
        Ok(Self(render(utc, offset)))
    }
}

impl AsRef<str> for ScheduledTime {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn parse_date_time(s: &str) -> Result<NaiveDateTime, String> {
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| {
            format!(
                "{} is not a valid schedule date and time; expected YYYY-MM-DDTHH:MM or YYYY-MM-DDTHH:MM:SS.",
                s
            )
        })?;

    // Keep the year inside the four-digit range so the rendered timestamp
    // always has the declared shape.
    if !(0..=9999).contains(&naive.year()) {
        return Err(format!("{} is out of range for a schedule year.", naive.year()));
    }

    Ok(naive)
}

fn resolve<Tz: TimeZone>(naive: NaiveDateTime, timezone: &Tz) -> Result<DateTime<Tz>, String> {
    match timezone.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Ok(instant),
        // A clock rolled back (the end of daylight saving) names two
        // instants; the earlier one wins, chosen by comparing the candidates
        // rather than trusting the pair's order
        LocalResult::Ambiguous(first, second) => Ok(first.min(second)),
        // A clock jumped forward and this wall time never happened
        LocalResult::None => Err(format!(
            "{} does not exist in the submitting timezone (it falls inside a daylight-saving gap).",
            naive
        )),
    }
}

/// The date-time part is the UTC instant with its own zone indicator dropped;
/// the suffix carries the submitting zone's offset, signed positive east of
/// UTC, with zero-padded two-digit hour and minute fields.
fn render(utc: NaiveDateTime, offset: FixedOffset) -> String {
    let seconds_east = offset.local_minus_utc();
    let sign = if seconds_east < 0 { '-' } else { '+' };
    let offset_minutes = seconds_east.abs() / 60;

    format!(
        "{}{}{:02}:{:02}",
        utc.format("%Y-%m-%dT%H:%M:%S"),
        sign,
        offset_minutes / 60,
        offset_minutes % 60
    )
}
