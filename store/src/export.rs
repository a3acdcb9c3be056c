// CSV export of bills for spreadsheets.
use crate::error::StoreError;
use csv::Writer;
use shared::models::{Bill, Category};
use shared::utils::{format_amount, timestamp_to_date_time};
use std::io::Write;

pub const HEADER: [&str; 7] = ["id", "create_time", "date", "type", "category", "amount", "note"];

/// Writes one row per bill (in the given order) and returns the row count.
pub fn export_bills_csv<W: Write>(bills: &[Bill], categories: &[Category], writer: W) -> Result<usize, StoreError> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for bill in bills {
        let details = &bill.details;
        let category = details
            .category_id
            .and_then(|id| resolve_category_name(categories, id, bill))
            .unwrap_or_default();
        let row = [
            bill.id.to_string(),
            timestamp_to_date_time(bill.create_time, false),
            details.date.clone().unwrap_or_default(),
            details.kind.map(|k| k.to_string()).unwrap_or_default(),
            category.to_string(),
            details.amount.map(format_amount).unwrap_or_default(),
            details.note.clone().unwrap_or_default(),
        ];
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(bills.len())
}

/// Name of the category a bill points at. Stores seeded by older releases can
/// hold an expense and an income category under the same id; the one matching
/// the bill's own type wins.
pub fn resolve_category_name<'a>(categories: &'a [Category], id: i64, bill: &Bill) -> Option<&'a str> {
    let mut matches = categories.iter().filter(|c| c.id == id);
    let first = matches.next()?;
    let preferred = match bill.details.kind {
        Some(kind) if first.kind != kind => matches.find(|c| c.kind == kind).unwrap_or(first),
        _ => first,
    };
    Some(preferred.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{BillDraft, CategoryKind};

    fn category(id: i64, name: &str, kind: CategoryKind) -> Category {
        Category {
            id,
            name: name.to_string(),
            icon: "icon".to_string(),
            color: "#FFFFFF".to_string(),
            kind,
        }
    }

    fn bill(id: i64, draft: BillDraft) -> Bill {
        Bill {
            id,
            create_time: 0,
            details: draft,
        }
    }

    fn export_to_string(bills: &[Bill], categories: &[Category]) -> String {
        let mut out = Vec::new();
        export_bills_csv(bills, categories, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_export_header_only_for_no_bills() {
        let csv = export_to_string(&[], &[]);
        assert_eq!(csv, "id,create_time,date,type,category,amount,note\n");
    }

    #[test]
    fn test_export_row_fields() {
        let categories = vec![category(1, "Food", CategoryKind::Expense)];
        let bills = vec![bill(
            7,
            BillDraft {
                amount: Some(5.555),
                kind: Some(CategoryKind::Expense),
                category_id: Some(1),
                note: Some("noodles, extra spicy".to_string()),
                date: Some("2024-03-05".to_string()),
                ..Default::default()
            },
        )];
        let csv = export_to_string(&bills, &categories);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "7,,2024-03-05,expense,Food,5.56,\"noodles, extra spicy\"");
    }

    #[test]
    fn test_export_prefers_category_of_same_type() {
        let categories = vec![
            category(9, "Social", CategoryKind::Expense),
            category(9, "Salary", CategoryKind::Income),
        ];
        let bills = vec![
            bill(
                2,
                BillDraft {
                    kind: Some(CategoryKind::Income),
                    category_id: Some(9),
                    ..Default::default()
                },
            ),
            bill(1, BillDraft { category_id: Some(9), ..Default::default() }),
        ];
        let csv = export_to_string(&bills, &categories);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], "2,,,income,Salary,,");
        assert_eq!(lines[2], "1,,,,Social,,");
    }

    #[test]
    fn test_export_unknown_category_is_blank() {
        let bills = vec![bill(3, BillDraft { category_id: Some(404), amount: Some(1.0), ..Default::default() })];
        let csv = export_to_string(&bills, &[]);
        assert_eq!(csv.lines().nth(1), Some("3,,,,,1.00,"));
    }

    #[test]
    fn test_export_returns_row_count() {
        let bills = vec![bill(1, BillDraft::default()), bill(2, BillDraft::default())];
        let mut out = Vec::new();
        assert_eq!(export_bills_csv(&bills, &[], &mut out).unwrap(), 2);
    }
}
