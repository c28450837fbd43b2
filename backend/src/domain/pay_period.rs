//! Pay-period calendar.
//!
//! Pay periods are 14-day windows numbered from an anchor. Period `pp` starts
//! `14 * (pp - anchor_pp)` days after the anchor date and ends 13 days later.

use chrono::{Datelike, Duration, NaiveDate};

use crate::config::PayPeriodAnchor;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::pay_period::PayPeriodSpan;

pub const PERIOD_LENGTH_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayPeriodCalendar {
    anchor_date: NaiveDate,
    anchor_pp: i64,
}

impl PayPeriodCalendar {
    pub fn new(anchor: PayPeriodAnchor) -> Self {
        Self {
            anchor_date: anchor.date,
            anchor_pp: anchor.pp_number,
        }
    }

    /// First day of pay period `pp`
    pub fn start(&self, pp: i64) -> DomainResult<NaiveDate> {
        pp.checked_sub(self.anchor_pp)
            .and_then(|offset| offset.checked_mul(PERIOD_LENGTH_DAYS))
            .and_then(Duration::try_days)
            .and_then(|offset| self.anchor_date.checked_add_signed(offset))
            .ok_or_else(|| out_of_range(pp))
    }

    /// Last day of pay period `pp` (inclusive)
    pub fn end(&self, pp: i64) -> DomainResult<NaiveDate> {
        self.start(pp)?
            .checked_add_signed(Duration::days(PERIOD_LENGTH_DAYS - 1))
            .ok_or_else(|| out_of_range(pp))
    }

    /// (year, month) a pay period's bills fall due in
    pub fn month_of(&self, pp: i64) -> DomainResult<(i32, u32)> {
        let start = self.start(pp)?;
        Ok((start.year(), start.month()))
    }

    /// Concrete due date of a bill, clamping `due_day` into the resolved month
    pub fn due_date(&self, pp: i64, due_day: u32) -> DomainResult<NaiveDate> {
        let (year, month) = self.month_of(pp)?;
        let day = due_day.clamp(1, last_day_of_month(year, month));
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| out_of_range(pp))
    }

    pub fn period_for(&self, pp: i64) -> DomainResult<PayPeriodSpan> {
        Ok(PayPeriodSpan {
            pp_number: pp,
            start_date: self.start(pp)?,
            end_date: self.end(pp)?,
        })
    }
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

fn out_of_range(pp: i64) -> DomainError {
    DomainError::validation(format!("Pay period {} is out of range", pp))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar() -> PayPeriodCalendar {
        PayPeriodCalendar::new(PayPeriodAnchor::default())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_anchor_period_boundaries() {
        let cal = calendar();
        assert_eq!(cal.start(17).unwrap(), date(2025, 8, 4));
        assert_eq!(cal.end(17).unwrap(), date(2025, 8, 17));
        assert_eq!(cal.start(18).unwrap(), date(2025, 8, 18));
        assert_eq!(cal.start(16).unwrap(), date(2025, 7, 21));
        assert_eq!(cal.end(16).unwrap(), date(2025, 8, 3));
    }

    #[test]
    fn test_periods_are_contiguous() {
        let cal = calendar();
        for pp in -5..60 {
            let next_start = cal.start(pp + 1).unwrap();
            assert_eq!(cal.end(pp).unwrap().succ_opt().unwrap(), next_start);
        }
    }

    #[test]
    fn test_due_date_clamps_to_month_end() {
        let cal = calendar();
        assert_eq!(cal.due_date(17, 31).unwrap(), date(2025, 8, 31));
        assert_eq!(cal.due_date(17, 15).unwrap(), date(2025, 8, 15));

        // PP 30 starts 2026-02-02
        assert_eq!(cal.month_of(30).unwrap(), (2026, 2));
        assert_eq!(cal.due_date(30, 31).unwrap(), date(2026, 2, 28));
        assert_eq!(cal.due_date(30, 0).unwrap(), date(2026, 2, 1));
    }

    #[test]
    fn test_leap_year_february() {
        let cal = PayPeriodCalendar::new(PayPeriodAnchor {
            date: date(2028, 2, 7),
            pp_number: 1,
        });
        assert_eq!(cal.due_date(1, 30).unwrap(), date(2028, 2, 29));
    }

    #[test]
    fn test_out_of_range_period_is_rejected() {
        let err = calendar().start(i64::MAX).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
