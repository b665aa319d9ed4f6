//! Tip calculator

use serde::{Deserialize, Serialize};

use crate::error::WidgetError;

/// Derived values for one bill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TipBreakdown {
    pub tip_amount: f64,
    pub total_amount: f64,
}

/// `tip = bill * pct / 100`, `total = bill + tip`, unrounded
pub fn compute_tip(bill: f64, percentage: f64) -> TipBreakdown {
    let tip_amount = bill * (percentage / 100.0);
    TipBreakdown {
        tip_amount,
        total_amount: bill + tip_amount,
    }
}

/// Format a money amount with two decimals
pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Inputs plus the last computed result.
///
/// Results only change on [`TipCalculator::calculate`]; editing an input
/// leaves them stale until then.
#[derive(Debug, Clone)]
pub struct TipCalculator {
    bill: Option<f64>,
    percentage: Option<f64>,
    result: TipBreakdown,
}

impl TipCalculator {
    pub fn new() -> Self {
        Self {
            bill: None,
            percentage: None,
            result: TipBreakdown {
                tip_amount: 0.0,
                total_amount: 0.0,
            },
        }
    }

    pub fn set_bill(&mut self, bill: Option<f64>) {
        self.bill = bill;
    }

    pub fn set_percentage(&mut self, percentage: Option<f64>) {
        self.percentage = percentage;
    }

    pub fn result(&self) -> TipBreakdown {
        self.result
    }

    pub fn calculate(&mut self) -> Result<TipBreakdown, WidgetError> {
        let bill = self.bill.ok_or(WidgetError::MissingInput("bill amount"))?;
        let percentage = self
            .percentage
            .ok_or(WidgetError::MissingInput("tip percentage"))?;
        self.result = compute_tip(bill, percentage);
        Ok(self.result)
    }

    pub fn view(&self) -> TipView {
        TipView {
            bill_amount: self.bill,
            tip_percentage: self.percentage,
            tip_amount: self.result.tip_amount,
            total_amount: self.result.total_amount,
            tip_display: format_amount(self.result.tip_amount),
            total_display: format_amount(self.result.total_amount),
        }
    }
}

impl Default for TipCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipView {
    pub bill_amount: Option<f64>,
    pub tip_percentage: Option<f64>,
    pub tip_amount: f64,
    pub total_amount: f64,
    pub tip_display: String,
    pub total_display: String,
}
