use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// IGV (Peruvian VAT) rate: 18%, applied per line item and then summed.
pub fn igv_rate() -> Decimal {
    Decimal::new(18, 2)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    pub tax_id: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// Per-line amounts, always derived and never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineAmounts {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl LineItem {
    /// Computes subtotal, tax and total for this line. Tax is rounded to two
    /// decimals with banker's rounding so per-line sums reconcile with an
    /// aggregate computation.
    pub fn amounts(&self) -> LineAmounts {
        let subtotal = self.unit_price * Decimal::from(self.quantity);
        let tax = (subtotal * igv_rate())
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        LineAmounts {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    pub id: u64,
    /// Creation date, dd/mm/yyyy. Optional so externally edited files
    /// without it still load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub client: Client,
    pub items: Vec<LineItem>,
}

impl Quotation {
    /// Grand total: sum of per-line totals, in item order.
    pub fn grand_total(&self) -> Decimal {
        self.items.iter().map(|item| item.amounts().total).sum()
    }
}

/// Formats a monetary amount with the currency prefix and two decimals,
/// e.g. `S/ 531.00`.
pub fn format_money(prefix: &str, amount: Decimal) -> String {
    format!("{} {:.2}", prefix, amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_line_amounts_single_item() {
        let item = LineItem {
            description: "Plancha inox 2mm".to_string(),
            unit_price: dec("150.00"),
            quantity: 3,
        };
        let amounts = item.amounts();
        assert_eq!(amounts.subtotal, dec("450.00"));
        assert_eq!(amounts.tax, dec("81.00"));
        assert_eq!(amounts.total, dec("531.00"));
    }

    #[test]
    fn test_grand_total_sums_per_line_totals() {
        let quotation = Quotation {
            id: 1,
            date: None,
            client: sample_client(),
            items: vec![
                LineItem {
                    description: "Item A".to_string(),
                    unit_price: dec("10.00"),
                    quantity: 2,
                },
                LineItem {
                    description: "Item B".to_string(),
                    unit_price: dec("5.00"),
                    quantity: 1,
                },
            ],
        };
        // Per-line totals: 23.60 and 5.90.
        assert_eq!(quotation.items[0].amounts().total, dec("23.60"));
        assert_eq!(quotation.items[1].amounts().total, dec("5.90"));
        assert_eq!(quotation.grand_total(), dec("29.50"));
    }

    #[test]
    fn test_per_line_sum_reconciles_with_aggregate() {
        let items = vec![
            LineItem {
                description: "A".to_string(),
                unit_price: dec("33.33"),
                quantity: 3,
            },
            LineItem {
                description: "B".to_string(),
                unit_price: dec("0.05"),
                quantity: 7,
            },
            LineItem {
                description: "C".to_string(),
                unit_price: dec("199.99"),
                quantity: 1,
            },
        ];
        let per_line: Decimal = items.iter().map(|i| i.amounts().total).sum();

        let aggregate_subtotal: Decimal = items
            .iter()
            .map(|i| i.unit_price * Decimal::from(i.quantity))
            .sum();
        let aggregate = aggregate_subtotal
            + (aggregate_subtotal * igv_rate())
                .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

        let diff = (per_line - aggregate).abs();
        assert!(diff <= dec("0.01"), "difference {} exceeds a cent", diff);
    }

    #[test]
    fn test_tax_uses_bankers_rounding() {
        // Subtotal 0.25 -> raw tax 0.045, midpoint rounds to even: 0.04.
        let item = LineItem {
            description: "midpoint".to_string(),
            unit_price: dec("0.25"),
            quantity: 1,
        };
        assert_eq!(item.amounts().tax, dec("0.04"));

        // Subtotal 0.75 -> raw tax 0.135, midpoint rounds to even: 0.14.
        let item = LineItem {
            description: "midpoint".to_string(),
            unit_price: dec("0.75"),
            quantity: 1,
        };
        assert_eq!(item.amounts().tax, dec("0.14"));
    }

    #[test]
    fn test_zero_price_item() {
        let item = LineItem {
            description: "muestra gratis".to_string(),
            unit_price: Decimal::ZERO,
            quantity: 5,
        };
        let amounts = item.amounts();
        assert_eq!(amounts.subtotal, Decimal::ZERO);
        assert_eq!(amounts.tax, dec("0.00"));
        assert_eq!(amounts.total, dec("0.00"));
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money("S/", dec("531.00")), "S/ 531.00");
        assert_eq!(format_money("S/", dec("450")), "S/ 450.00");
        assert_eq!(format_money("S/", dec("29.5")), "S/ 29.50");
    }

    fn sample_client() -> Client {
        Client {
            name: "Juan Perez".to_string(),
            tax_id: "20123456789".to_string(),
            phone: "999999999".to_string(),
            email: "juan@x.com".to_string(),
            address: "Lima".to_string(),
        }
    }
}
