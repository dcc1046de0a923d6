//! Range-bounded row selection shared by every rate table
//!
//! A row matches a query when the query date falls inside the row's
//! effective window and every other bounded dimension and discrete key
//! agrees (see [`RateQuery::matches`]). All bounds are `[lower, upper)`.
//!
//! A well-formed table has at most one match. When a table holds
//! overlapping rows, the row whose window starts latest wins and ties go
//! to the smallest id, so the result never depends on storage order.

use chrono::NaiveDate;
use std::cmp::Reverse;
use tracing::warn;

use core_kernel::{EffectiveDates, RateId};

/// A reference-data row with an effective-date window
pub trait RateRow {
    /// Table the row is stored in
    const TABLE: &'static str;

    fn id(&self) -> RateId;

    fn effective_dates(&self) -> EffectiveDates;
}

/// A lookup against one rate table
pub trait RateQuery {
    type Row: RateRow;

    /// Date the rate must be effective on
    fn date(&self) -> NaiveDate;

    /// True when every non-date dimension and key of `row` matches
    fn matches(&self, row: &Self::Row) -> bool;

    /// Human-readable form used in errors and logs
    fn describe(&self) -> String;
}

/// Selects the row matching `query`, applying the overlap tie-break
pub fn select_rate<'a, Q>(
    rows: impl IntoIterator<Item = &'a Q::Row>,
    query: &Q,
) -> Option<&'a Q::Row>
where
    Q: RateQuery,
    Q::Row: 'a,
{
    let date = query.date();
    let candidates: Vec<&Q::Row> = rows
        .into_iter()
        .filter(|row| row.effective_dates().contains(date) && query.matches(row))
        .collect();

    if candidates.len() > 1 {
        warn!(
            table = Q::Row::TABLE,
            matches = candidates.len(),
            query = %query.describe(),
            "Multiple rate rows match; using latest effective window"
        );
    }

    candidates
        .into_iter()
        .max_by_key(|row| (row.effective_dates().lower(), Reverse(row.id())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    struct Band {
        id: RateId,
        dates: EffectiveDates,
        code: &'static str,
    }

    impl RateRow for Band {
        const TABLE: &'static str = "bands";

        fn id(&self) -> RateId {
            self.id
        }

        fn effective_dates(&self) -> EffectiveDates {
            self.dates
        }
    }

    struct BandQuery {
        code: &'static str,
        date: NaiveDate,
    }

    impl RateQuery for BandQuery {
        type Row = Band;

        fn date(&self) -> NaiveDate {
            self.date
        }

        fn matches(&self, row: &Band) -> bool {
            row.code == self.code
        }

        fn describe(&self) -> String {
            format!("code {} on {}", self.code, self.date)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn band(id: u128, lower: NaiveDate, upper: NaiveDate, code: &'static str) -> Band {
        Band {
            id: RateId::from_uuid(Uuid::from_u128(id)),
            dates: EffectiveDates::new(lower, upper).unwrap(),
            code,
        }
    }

    #[test]
    fn test_date_window_is_half_open() {
        let rows = vec![band(1, date(2019, 5, 15), date(2020, 5, 15), "A")];

        let on_lower = BandQuery { code: "A", date: date(2019, 5, 15) };
        assert!(select_rate(&rows, &on_lower).is_some());

        let on_upper = BandQuery { code: "A", date: date(2020, 5, 15) };
        assert!(select_rate(&rows, &on_upper).is_none());
    }

    #[test]
    fn test_discrete_key_must_match() {
        let rows = vec![band(1, date(2019, 5, 15), date(2020, 5, 15), "A")];
        let query = BandQuery { code: "B", date: date(2019, 6, 1) };
        assert!(select_rate(&rows, &query).is_none());
    }

    #[test]
    fn test_overlap_prefers_latest_window_then_smallest_id() {
        let rows = vec![
            band(5, date(2019, 1, 1), date(2021, 1, 1), "A"),
            band(9, date(2019, 6, 1), date(2020, 6, 1), "A"),
            band(7, date(2019, 6, 1), date(2020, 6, 1), "A"),
        ];
        let query = BandQuery { code: "A", date: date(2019, 7, 1) };

        let chosen = select_rate(&rows, &query).unwrap();
        assert_eq!(chosen.id, RateId::from_uuid(Uuid::from_u128(7)));

        let reversed: Vec<_> = rows.into_iter().rev().collect();
        let chosen = select_rate(&reversed, &query).unwrap();
        assert_eq!(chosen.id, RateId::from_uuid(Uuid::from_u128(7)));
    }
}
