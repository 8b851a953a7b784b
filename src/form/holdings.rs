use uuid::Uuid;

use crate::schema::HoldingPayload;

/// One row being edited. Identity lives in `id`; everything else is what
/// the user typed so far.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingRow {
    id: String,
    pub coin: String,
    pub quantity: f64,
    pub avg_buy_price: f64,
}

impl HoldingRow {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            coin: String::new(),
            quantity: 0.0,
            avg_buy_price: 0.0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Derived display value; recomputed on demand, never stored.
    pub fn value(&self) -> f64 {
        self.quantity * self.avg_buy_price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldingField {
    Coin,
    Quantity,
    AvgBuyPrice,
}

/// Ordered list editor for the holdings a request is built from. The list
/// always keeps at least one row.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingsEditor {
    rows: Vec<HoldingRow>,
}

impl Default for HoldingsEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl HoldingsEditor {
    pub fn new() -> Self {
        Self {
            rows: vec![HoldingRow::new()],
        }
    }

    pub fn rows(&self) -> &[HoldingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a blank row and returns its id.
    pub fn add(&mut self) -> String {
        let row = HoldingRow::new();
        let id = row.id.clone();
        self.rows.push(row);
        id
    }

    /// Removes the row with that id, unless it is the last one left.
    /// Returns whether a row was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        if self.rows.len() <= 1 {
            return false;
        }

        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        self.rows.len() < before
    }

    /// Replaces one field of one row. Numeric input that does not parse
    /// becomes 0; the schema rejects the 0 later.
    pub fn update(&mut self, id: &str, field: HoldingField, value: &str) -> bool {
        let Some(row) = self.rows.iter_mut().find(|row| row.id == id) else {
            return false;
        };

        match field {
            HoldingField::Coin => row.coin = value.to_string(),
            HoldingField::Quantity => row.quantity = parse_numeric(value),
            HoldingField::AvgBuyPrice => row.avg_buy_price = parse_numeric(value),
        }

        true
    }

    /// Sum of the derived row values.
    pub fn total_value(&self) -> f64 {
        self.rows.iter().map(HoldingRow::value).sum()
    }

    pub fn to_payload(&self) -> Vec<HoldingPayload> {
        self.rows
            .iter()
            .map(|row| HoldingPayload {
                id: row.id.clone(),
                coin: row.coin.clone(),
                quantity: row.quantity,
                avg_buy_price: row.avg_buy_price,
            })
            .collect()
    }
}

fn parse_numeric(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(0.0)
}

/// Formats a value the way the site displays money, e.g. `$69,420.50`.
pub fn format_usd(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let fraction = cents % 100;

    let mut digits = dollars.to_string();
    let mut grouped = String::new();
    while digits.len() > 3 {
        let tail = digits.split_off(digits.len() - 3);
        grouped = if grouped.is_empty() {
            tail
        } else {
            format!("{},{}", tail, grouped)
        };
    }
    grouped = if grouped.is_empty() {
        digits
    } else {
        format!("{},{}", digits, grouped)
    };

    let sign = if negative { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_one_blank_row() {
        let editor = HoldingsEditor::new();
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.rows()[0].coin, "");
        assert_eq!(editor.rows()[0].value(), 0.0);
    }

    #[test]
    fn test_add_appends_in_insertion_order() {
        let mut editor = HoldingsEditor::new();
        let second = editor.add();
        let third = editor.add();

        assert_eq!(editor.len(), 3);
        assert_eq!(editor.rows()[1].id(), second);
        assert_eq!(editor.rows()[2].id(), third);
    }

    #[test]
    fn test_remove_keeps_order_of_survivors() {
        let mut editor = HoldingsEditor::new();
        let first = editor.rows()[0].id().to_string();
        let second = editor.add();
        let third = editor.add();

        editor.update(&first, HoldingField::Coin, "BTC");
        editor.update(&second, HoldingField::Coin, "ETH");
        editor.update(&third, HoldingField::Coin, "SOL");

        assert!(editor.remove(&second));

        let coins: Vec<&str> = editor.rows().iter().map(|r| r.coin.as_str()).collect();
        assert_eq!(coins, vec!["BTC", "SOL"]);
    }

    #[test]
    fn test_remove_last_row_is_a_no_op() {
        let mut editor = HoldingsEditor::new();
        let only = editor.rows()[0].id().to_string();

        assert!(!editor.remove(&only));
        assert_eq!(editor.len(), 1);
    }

    #[test]
    fn test_update_recomputes_derived_value() {
        let mut editor = HoldingsEditor::new();
        let id = editor.rows()[0].id().to_string();

        editor.update(&id, HoldingField::Quantity, "2.5");
        editor.update(&id, HoldingField::AvgBuyPrice, "40000");
        assert_eq!(editor.rows()[0].value(), 100000.0);

        editor.update(&id, HoldingField::Quantity, "3");
        assert_eq!(editor.rows()[0].value(), 120000.0);
    }

    #[test]
    fn test_unparseable_numeric_input_becomes_zero() {
        let mut editor = HoldingsEditor::new();
        let id = editor.rows()[0].id().to_string();

        editor.update(&id, HoldingField::Quantity, "1.5");
        editor.update(&id, HoldingField::Quantity, "lots");

        assert_eq!(editor.rows()[0].quantity, 0.0);
    }

    #[test]
    fn test_update_unknown_id_does_nothing() {
        let mut editor = HoldingsEditor::new();
        assert!(!editor.update("missing", HoldingField::Coin, "BTC"));
        assert_eq!(editor.rows()[0].coin, "");
    }

    #[test]
    fn test_total_value_sums_rows() {
        let mut editor = HoldingsEditor::new();
        let first = editor.rows()[0].id().to_string();
        let second = editor.add();

        editor.update(&first, HoldingField::Quantity, "1");
        editor.update(&first, HoldingField::AvgBuyPrice, "50000");
        editor.update(&second, HoldingField::Quantity, "10");
        editor.update(&second, HoldingField::AvgBuyPrice, "3000");

        assert_eq!(editor.total_value(), 80000.0);
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(50000.0), "$50,000.00");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
        assert_eq!(format_usd(999.5), "$999.50");
    }
}
