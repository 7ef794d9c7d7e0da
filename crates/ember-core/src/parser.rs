use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use tracing::debug;

use crate::datetime::MS_PER_DAY;
use crate::task::Task;

/// Builds a pending task from trimmed, non-empty input. Inputs that carry
/// no recognizable date phrase simply get no due date; this never fails.
#[tracing::instrument(skip(text, now))]
pub fn parse(text: &str, now: DateTime<Utc>) -> Task {
    let mut task = Task::new(text.to_string());
    task.due = recognize_due_phrase(text, now);
    debug!(due = ?task.due, "parsed task input");
    task
}

/// Recognizes a trailing date phrase: the literal word `tomorrow`, or
/// `at <hour>` with an optional AM/PM suffix. Case-sensitive.
fn recognize_due_phrase(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let phrase_re = Regex::new(r"(.+)(?P<phrase>tomorrow|at (?P<clock>\d{1,2}(?:AM|PM)?))").ok()?;
    let captures = phrase_re.captures(text)?;
    let phrase = captures.name("phrase")?.as_str();

    if phrase == "tomorrow" {
        return Some(now + Duration::milliseconds(MS_PER_DAY));
    }

    // The clock component is captured but the due date stays pinned to the
    // moment of entry.
    // TODO: fold the captured hour into the computed due date.
    let _clock = captures.name("clock");
    debug!(phrase, "clock phrase recognized; hour not applied");
    Some(now)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::parse;
    use crate::datetime::MS_PER_DAY;

    fn fixed_now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 16, 5, 0, 0)
            .single()
            .expect("valid now")
    }

    #[test]
    fn plain_text_has_no_due_date() {
        let task = parse("Buy milk", fixed_now());
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert!(task.due.is_none());
    }

    #[test]
    fn tomorrow_is_exactly_one_day_out() {
        let now = fixed_now();
        let task = parse("Buy milk tomorrow", now);
        assert_eq!(task.due, Some(now + Duration::milliseconds(MS_PER_DAY)));
    }

    #[test]
    fn text_keeps_the_date_phrase() {
        let task = parse("Buy milk tomorrow", fixed_now());
        assert_eq!(task.text, "Buy milk tomorrow");
    }

    #[test]
    fn clock_phrase_pins_due_to_entry_time() {
        let now = fixed_now();
        for input in ["Call mom at 5PM", "Call mom at 11AM", "Call mom at 9"] {
            let task = parse(input, now);
            assert_eq!(task.due, Some(now), "input: {input}");
        }
    }

    #[test]
    fn phrase_matching_is_case_sensitive() {
        let now = fixed_now();
        assert!(parse("Buy milk Tomorrow", now).due.is_none());
        assert!(parse("Call mom at 5pm", now).due.is_some());
        // lowercase "pm" is not part of the phrase, but "at 5" still is
        assert_eq!(parse("Call mom at 5pm", now).due, Some(now));
    }

    #[test]
    fn phrase_needs_leading_text() {
        assert!(parse("tomorrow", fixed_now()).due.is_none());
    }
}
