//! Helpers for the keyword log and the daily schedule.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

/// Append the searched keyword to the keyword log, one per line.
///
/// The log is append-only and the caller is single-process and
/// sequential, so no locking is needed.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn append_keyword_log(path: &str, keywords: &str) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(format!("{keywords}\n").as_bytes()).await?;
    debug!(%keywords, "Appended keyword to log");
    Ok(())
}

/// Time until the next occurrence of `target` after `now`.
///
/// A target equal to `now` schedules tomorrow's run, never an immediate
/// one, so the returned duration is always positive.
pub fn duration_until(target: NaiveTime, now: NaiveDateTime) -> Duration {
    let today_run = now.date().and_time(target);
    if today_run > now {
        today_run - now
    } else {
        today_run + Duration::days(1) - now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 8, 12)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_duration_until_later_today() {
        let wait = duration_until(NaiveTime::from_hms_opt(10, 0, 0).unwrap(), at(9, 0));
        assert_eq!(wait.num_seconds(), 3600);
    }

    #[test]
    fn test_duration_until_rolls_over_to_tomorrow() {
        let wait = duration_until(NaiveTime::from_hms_opt(10, 0, 0).unwrap(), at(10, 30));
        assert_eq!(wait.num_seconds(), 23 * 3600 + 30 * 60);
    }

    #[test]
    fn test_duration_until_exact_time_waits_a_full_day() {
        let wait = duration_until(NaiveTime::from_hms_opt(10, 0, 0).unwrap(), at(10, 0));
        assert_eq!(wait.num_seconds(), 24 * 3600);
    }

    #[tokio::test]
    async fn test_append_keyword_log_appends_lines() {
        let path = std::env::temp_dir().join("newsgrab_keyword_log_test.txt");
        let _ = std::fs::remove_file(&path);
        let path_str = path.to_str().unwrap();

        append_keyword_log(path_str, "hernia repair").await.unwrap();
        append_keyword_log(path_str, "3D").await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "hernia repair\n3D\n");

        let _ = std::fs::remove_file(&path);
    }
}
