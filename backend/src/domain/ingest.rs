//! CSV bill ingestion.
//!
//! Rows are parsed into validated [`NewBill`] values before anything is
//! stored. Required columns are `Name`, `Amount`, `DueDay`, `Class` and `PP`;
//! `Month` is optional. Headers match case-insensitively.

use rust_decimal::Decimal;
use shared::BillClass;
use std::str::FromStr;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::bill::NewBill;

const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Pick the candidate delimiter that appears most often in the header line
pub fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().find(|line| !line.trim().is_empty()).unwrap_or("");

    let mut best = b',';
    let mut best_count = 0;
    for delimiter in CANDIDATE_DELIMITERS {
        let count = header.bytes().filter(|b| *b == delimiter).count();
        if count > best_count {
            best = delimiter;
            best_count = count;
        }
    }
    best
}

struct Columns {
    name: usize,
    amount: usize,
    due_day: usize,
    class: usize,
    pp: usize,
    month: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> DomainResult<Self> {
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(wanted))
        };
        let require = |wanted: &str| {
            find(wanted).ok_or_else(|| {
                DomainError::validation(format!("CSV is missing required column '{}'", wanted))
            })
        };

        Ok(Self {
            name: require("Name")?,
            amount: require("Amount")?,
            due_day: require("DueDay")?,
            class: require("Class")?,
            pp: require("PP")?,
            month: find("Month"),
        })
    }
}

/// Parse a CSV upload into bills. Any bad row rejects the whole upload.
pub fn parse_bills_csv(text: &str) -> DomainResult<Vec<NewBill>> {
    let text = text.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(text))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| DomainError::validation(format!("Invalid CSV header: {}", e)))?
        .clone();
    let columns = Columns::from_headers(&headers)?;

    let mut bills = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| DomainError::validation(format!("Row {}: {}", row, e)))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let bill = parse_row(&record, &columns)
            .map_err(|reason| DomainError::validation(format!("Row {}: {}", row, reason)))?;
        bills.push(bill);
    }

    if bills.is_empty() {
        return Err(DomainError::validation("CSV contains no bill rows"));
    }
    Ok(bills)
}

fn parse_row(record: &csv::StringRecord, columns: &Columns) -> Result<NewBill, String> {
    let cell = |index: usize| record.get(index).map(str::trim).unwrap_or("");

    let name = cell(columns.name);
    if name.is_empty() {
        return Err("Name is empty".to_string());
    }

    let bill = NewBill {
        name: name.to_string(),
        month: columns
            .month
            .map(cell)
            .filter(|month| !month.is_empty())
            .map(str::to_string),
        amount: parse_amount(cell(columns.amount))?,
        due_day: cell(columns.due_day)
            .parse::<u32>()
            .map_err(|_| format!("invalid DueDay '{}'", cell(columns.due_day)))?,
        bill_class: BillClass::from_str(cell(columns.class)).map_err(|e| e.to_string())?,
        pay_period: cell(columns.pp)
            .parse::<i64>()
            .map_err(|_| format!("invalid PP '{}'", cell(columns.pp)))?,
        paid: false,
    };

    bill.validate().map_err(|e| e.to_string())?;
    Ok(bill)
}

/// Accepts "1200", "1,200.50" and "$45.00"
fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    Decimal::from_str(&cleaned).map_err(|_| format!("invalid Amount '{}'", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parses_comma_separated_rows() {
        let csv = "Name,Amount,DueDay,Class,PP,Month\n\
                   Rent,1800,1,Housing,17,Aug\n\
                   Visa,\"$1,250.40\",15,debt,18,\n";
        let bills = parse_bills_csv(csv).expect("valid csv");

        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].name, "Rent");
        assert_eq!(bills[0].month.as_deref(), Some("Aug"));
        assert_eq!(bills[0].amount, dec!(1800));
        assert_eq!(bills[1].amount, dec!(1250.40));
        assert_eq!(bills[1].bill_class, BillClass::Debt);
        assert_eq!(bills[1].pay_period, 18);
        assert_eq!(bills[1].due_day, 15);
        assert_eq!(bills[1].month, None);
        assert!(bills.iter().all(|b| !b.paid));
    }

    #[test]
    fn test_sniffs_other_delimiters_and_header_case() {
        let csv = " name ;AMOUNT;dueday;class;pp\nWater;45.10;20;Utilities;17\n";
        assert_eq!(sniff_delimiter(csv), b';');
        let bills = parse_bills_csv(csv).unwrap();
        assert_eq!(bills[0].name, "Water");
        assert_eq!(bills[0].amount, dec!(45.10));

        let tsv = "Name\tAmount\tDueDay\tClass\tPP\nPhone\t60\t9\tNeeded\t18\n";
        assert_eq!(parse_bills_csv(tsv).unwrap()[0].bill_class, BillClass::Needed);

        assert_eq!(sniff_delimiter("Name|Amount|DueDay|Class|PP"), b'|');
        assert_eq!(sniff_delimiter("JustOneColumn"), b',');
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let csv = "Name,Amount,DueDay,Class,PP\n,,,,\nGym,30,3,Comfort,17\n  ,  , , ,\n";
        let bills = parse_bills_csv(csv).unwrap();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].name, "Gym");
    }

    #[test]
    fn test_bad_row_names_the_row() {
        let csv = "Name,Amount,DueDay,Class,PP\nRent,1800,1,Housing,17\nBad,10,32,Housing,17\n";
        let err = parse_bills_csv(csv).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(err.to_string().starts_with("Row 2:"), "{}", err);

        let csv = "Name,Amount,DueDay,Class,PP\nRent,-5,1,Housing,17\n";
        assert!(parse_bills_csv(csv).unwrap_err().to_string().contains("Row 1"));

        let csv = "Name,Amount,DueDay,Class,PP\nRent,50000000000000000000000000000,1,Housing,17\n";
        let err = parse_bills_csv(csv).unwrap_err().to_string();
        assert!(err.starts_with("Row 1:") && err.contains("cannot exceed"), "{}", err);

        let csv = "Name,Amount,DueDay,Class,PP\nRent,5,1,Luxury,17\n";
        assert!(parse_bills_csv(csv).unwrap_err().to_string().contains("Luxury"));

        let csv = "Name,Amount,DueDay,Class,PP\nRent,5,1,Housing,seventeen\n";
        assert!(parse_bills_csv(csv).unwrap_err().to_string().contains("invalid PP"));
    }

    #[test]
    fn test_missing_column_and_empty_upload() {
        let err = parse_bills_csv("Name,Amount,DueDay,Class\nRent,1,1,Housing\n").unwrap_err();
        assert!(err.to_string().contains("'PP'"));

        let err = parse_bills_csv("Name,Amount,DueDay,Class,PP\n").unwrap_err();
        assert_eq!(err.to_string(), "CSV contains no bill rows");

        assert!(parse_bills_csv("").is_err());
    }
}
