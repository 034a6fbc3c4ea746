use chrono::{DateTime, Days, TimeZone, Utc};
use tokio::time::Duration;

pub(super) fn duration_until_next_digest(hour_utc: u8, minute_utc: u8) -> Duration {
    duration_until_next_digest_from(Utc::now(), hour_utc, minute_utc)
}

fn duration_until_next_digest_from(
    now: DateTime<Utc>,
    hour_utc: u8,
    minute_utc: u8,
) -> Duration {
    let today = now.date_naive();
    let Some(scheduled_today_naive) = today.and_hms_opt(hour_utc as u32, minute_utc as u32, 0)
    else {
        return Duration::from_secs(60);
    };

    let mut scheduled = Utc.from_utc_datetime(&scheduled_today_naive);
    if scheduled <= now {
        let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
        let Some(scheduled_tomorrow_naive) =
            tomorrow.and_hms_opt(hour_utc as u32, minute_utc as u32, 0)
        else {
            return Duration::from_secs(60);
        };
        scheduled = Utc.from_utc_datetime(&scheduled_tomorrow_naive);
    }

    (scheduled - now)
        .to_std()
        .unwrap_or_else(|_| Duration::from_secs(60))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::duration_until_next_digest_from;

    #[test]
    fn waits_until_later_today_when_slot_is_ahead() {
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 6, 0, 0).unwrap();
        let wait = duration_until_next_digest_from(now, 8, 30);
        assert_eq!(wait.as_secs(), 2 * 3600 + 30 * 60);
    }

    #[test]
    fn rolls_to_tomorrow_when_slot_already_passed() {
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 9, 0, 0).unwrap();
        let wait = duration_until_next_digest_from(now, 8, 0);
        assert_eq!(wait.as_secs(), 23 * 3600);
    }

    #[test]
    fn exact_slot_time_schedules_the_next_day() {
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 8, 0, 0).unwrap();
        let wait = duration_until_next_digest_from(now, 8, 0);
        assert_eq!(wait.as_secs(), 24 * 3600);
    }
}
