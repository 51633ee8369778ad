use crate::core::errors::SplitchatError;
use crate::core::services::BudgetStatus;
use log::{debug, error};
use serde_json::{Value, json};

// Generates Chart.js configuration for visualizing budgets against spend
pub struct Visualization;

impl Visualization {
    /// Generates a Chart.js bar chart configuration comparing each budget
    /// category's monthly limit with what was spent so far this month.
    ///
    /// # Arguments
    /// * `statuses` - Per-category budget status rows, as computed by the service.
    ///
    /// # Returns
    /// A JSON Value containing the Chart.js configuration, or an error if there is nothing to chart.
    pub fn generate_budget_chart(statuses: &[BudgetStatus]) -> Result<Value, SplitchatError> {
        debug!("Generating budget chart for {} categories", statuses.len());

        if statuses.is_empty() {
            error!("No budget data available for chart");
            return Err(SplitchatError::NoSpendingData);
        }

        let labels: Vec<&str> = statuses.iter().map(|s| s.category.as_str()).collect();
        let spent: Vec<f64> = statuses.iter().map(|s| s.spent).collect();
        let limits: Vec<f64> = statuses.iter().map(|s| s.monthly_limit).collect();

        // Generate dynamic colors to support any number of categories
        let base_colors = vec![
            (75, 192, 192),  // Teal
            (255, 99, 132),  // Red
            (54, 162, 235),  // Blue
            (255, 206, 86),  // Yellow
            (153, 102, 255), // Purple
        ];
        let mut background_colors = Vec::new();
        let mut border_colors = Vec::new();
        for i in 0..labels.len() {
            let (r, g, b) = base_colors[i % base_colors.len()];
            background_colors.push(format!("rgba({}, {}, {}, 0.6)", r, g, b));
            border_colors.push(format!("rgba({}, {}, {}, 1)", r, g, b));
        }

        // Create Chart.js configuration
        let chart_config = json!({
            "type": "bar",
            "data": {
                "labels": labels,
                "datasets": [{
                    "label": "Spent This Month",
                    "data": spent,
                    "backgroundColor": background_colors,
                    "borderColor": border_colors,
                    "borderWidth": 1
                },
                {
                    "label": "Monthly Limit",
                    "data": limits,
                    "backgroundColor": "rgba(201, 203, 207, 0.4)",
                    "borderColor": "rgba(201, 203, 207, 1)",
                    "borderWidth": 1
                }]
            },
            "options": {
                "scales": {
                    "y": {
                        "beginAtZero": true,
                        "title": {
                            "display": true,
                            "text": "Amount (Currency)"
                        }
                    },
                    "x": {
                        "title": {
                            "display": true,
                            "text": "Categories"
                        }
                    }
                },
                "plugins": {
                    "title": {
                        "display": true,
                        "text": "Monthly Budgets vs Spending"
                    }
                }
            }
        });

        debug!("Generated Chart.js configuration for {} budget categories", labels.len());
        Ok(chart_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(category: &str, limit: f64, spent: f64) -> BudgetStatus {
        BudgetStatus {
            category: category.to_string(),
            monthly_limit: limit,
            spent,
            remaining: limit - spent,
        }
    }

    #[test]
    fn empty_statuses_produce_no_chart() {
        let _ = env_logger::builder().is_test(true).try_init();
        let result = Visualization::generate_budget_chart(&[]);
        assert!(matches!(result, Err(SplitchatError::NoSpendingData)));
    }

    #[test]
    fn chart_carries_one_row_per_category() {
        let _ = env_logger::builder().is_test(true).try_init();
        let statuses = vec![status("Food", 500.0, 120.0), status("Travel", 300.0, 45.5)];

        let chart = Visualization::generate_budget_chart(&statuses).unwrap();

        assert_eq!(chart["type"], "bar");
        assert_eq!(chart["data"]["labels"], json!(["Food", "Travel"]));
        assert_eq!(chart["data"]["datasets"][0]["data"], json!([120.0, 45.5]));
        assert_eq!(chart["data"]["datasets"][1]["data"], json!([500.0, 300.0]));
    }
}
