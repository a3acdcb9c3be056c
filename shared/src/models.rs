use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Which side of the ledger a category (or bill) belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Expense,
    Income,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Expense => "expense",
            CategoryKind::Income => "income",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(CategoryKind::Expense),
            "income" => Ok(CategoryKind::Income),
            other => Err(format!("unknown category type '{}', expected 'expense' or 'income'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

/// A category as submitted by the caller, before the store assigns its id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

impl NewCategory {
    pub fn into_category(self, id: i64) -> Category {
        Category {
            id,
            name: self.name,
            icon: self.icon,
            color: self.color,
            kind: self.kind,
        }
    }
}

/// Caller-supplied part of a bill. The store attaches `id`/`createTime` and
/// otherwise passes these through untouched: every field is optional and any
/// key not listed here is kept in `extra`.
///
/// Reading never rejects a bill. A known key whose value does not fit its
/// field (say `"amount": "12.50"` or `"type": "transfer"`) leaves the field
/// `None` and stays in `extra` as written, so it is saved back unchanged.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CategoryKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for BillDraft {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut extra = Map::<String, Value>::deserialize(deserializer)?;
        Ok(BillDraft {
            amount: take_typed(&mut extra, "amount"),
            kind: take_typed(&mut extra, "type"),
            category_id: take_typed(&mut extra, "categoryId"),
            note: take_typed(&mut extra, "note"),
            date: take_typed(&mut extra, "date"),
            extra,
        })
    }
}

// Moves `key` out of `map` only when its value parses as `T`.
fn take_typed<T: DeserializeOwned>(map: &mut Map<String, Value>, key: &str) -> Option<T> {
    let parsed = serde_json::from_value(map.get(key)?.clone()).ok()?;
    map.remove(key);
    Some(parsed)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: i64,
    pub create_time: i64,
    #[serde(flatten)]
    pub details: BillDraft,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_kind_serializes_lowercase() {
        let category = Category {
            id: 3,
            name: "Shopping".to_string(),
            icon: "shop".to_string(),
            color: "#9C27B0".to_string(),
            kind: CategoryKind::Expense,
        };
        let value = serde_json::to_value(&category).unwrap();
        assert_eq!(value["type"], "expense");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_category_kind_from_str() {
        assert_eq!("Income".parse::<CategoryKind>().unwrap(), CategoryKind::Income);
        assert_eq!(" expense ".parse::<CategoryKind>().unwrap(), CategoryKind::Expense);
        assert!("transfer".parse::<CategoryKind>().is_err());
    }

    #[test]
    fn test_bill_keeps_unknown_caller_fields() {
        let raw = json!({
            "id": 1709629620000_i64,
            "createTime": 1709629620000_i64,
            "amount": 12.5,
            "type": "expense",
            "categoryId": 1,
            "note": "lunch",
            "date": "2024-03-05",
            "categoryName": "Food",
            "tags": ["work"]
        });
        let bill: Bill = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(bill.details.amount, Some(12.5));
        assert_eq!(bill.details.kind, Some(CategoryKind::Expense));
        assert_eq!(bill.details.category_id, Some(1));
        assert_eq!(bill.details.extra.get("categoryName"), Some(&json!("Food")));
        assert_eq!(serde_json::to_value(&bill).unwrap(), raw);
    }

    #[test]
    fn test_bill_keeps_mistyped_fields_verbatim() {
        let raw = json!({
            "id": 1,
            "createTime": 1,
            "amount": "12.50",
            "type": "transfer",
            "categoryId": "3",
            "note": null,
            "date": "2024-03-05"
        });
        let bill: Bill = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(bill.details.amount, None);
        assert_eq!(bill.details.kind, None);
        assert_eq!(bill.details.category_id, None);
        assert_eq!(bill.details.note, None);
        assert_eq!(bill.details.date.as_deref(), Some("2024-03-05"));
        assert_eq!(bill.details.extra.get("amount"), Some(&json!("12.50")));
        assert_eq!(bill.details.extra.get("type"), Some(&json!("transfer")));
        assert_eq!(serde_json::to_value(&bill).unwrap(), raw);
    }

    #[test]
    fn test_bill_with_no_details() {
        let bill: Bill = serde_json::from_value(json!({ "id": 7, "createTime": 7 })).unwrap();
        assert_eq!(bill.details, BillDraft::default());
        assert_eq!(serde_json::to_value(&bill).unwrap(), json!({ "id": 7, "createTime": 7 }));
    }
}
