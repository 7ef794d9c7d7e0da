use chrono::{DateTime, Utc};

pub const MS_PER_DAY: i64 = 86_400_000;

/// Signed distance from `now` to `due` in days, fractional. Negative when
/// the due date has already passed.
#[must_use]
pub fn fractional_days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (due - now).num_milliseconds() as f64 / MS_PER_DAY as f64
}

pub mod iso_date_serde {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(
            dt: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match dt {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let opt = Option::<String>::deserialize(deserializer)?;
            match opt {
                Some(raw) => DateTime::parse_from_rfc3339(&raw)
                    .map(|dt| Some(dt.with_timezone(&Utc)))
                    .map_err(serde::de::Error::custom),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{MS_PER_DAY, fractional_days_until};

    #[test]
    fn one_day_out_is_exactly_one() {
        let now = Utc
            .with_ymd_and_hms(2026, 2, 16, 5, 0, 0)
            .single()
            .expect("valid now");
        let due = now + Duration::milliseconds(MS_PER_DAY);
        assert_eq!(fractional_days_until(due, now), 1.0);
    }

    #[test]
    fn overdue_is_negative() {
        let now = Utc
            .with_ymd_and_hms(2026, 2, 16, 5, 0, 0)
            .single()
            .expect("valid now");
        let due = now - Duration::hours(12);
        assert!(fractional_days_until(due, now) < 0.0);
    }
}
