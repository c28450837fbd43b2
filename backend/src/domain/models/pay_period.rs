use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainPayPeriod {
    pub id: i64,
    pub pp_number: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Pay period boundaries before the row has an id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayPeriodSpan {
    pub pp_number: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
