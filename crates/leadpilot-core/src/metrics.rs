use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Live campaign performance reported by the deployment layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub spend: f64,
    pub leads: u32,
    /// Pre-computed cost per lead. Derived from `spend / leads` when absent.
    #[serde(default)]
    pub cpl: Option<f64>,
    #[serde(default)]
    pub conversion_rate: Option<f64>,
    #[serde(default)]
    pub landing_page_score: Option<u8>,
}

impl PerformanceMetrics {
    #[must_use]
    pub fn new(spend: f64, leads: u32) -> Self {
        Self {
            spend,
            leads,
            cpl: None,
            conversion_rate: None,
            landing_page_score: None,
        }
    }

    #[must_use]
    pub fn with_cpl(mut self, cpl: f64) -> Self {
        self.cpl = Some(cpl);
        self
    }

    /// Cost per lead used for classification.
    ///
    /// With no reported CPL and zero leads there is no observed cost per
    /// lead, so this returns `0.0`; the lead-count rules decide those cases.
    #[must_use]
    pub fn effective_cpl(&self) -> f64 {
        match self.cpl {
            Some(cpl) => cpl,
            None if self.leads > 0 => self.spend / f64::from(self.leads),
            None => 0.0,
        }
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] for negative or non-finite amounts, a
    /// conversion rate outside `[0, 1]`, or a landing score above 100.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_amount("spend", self.spend)?;
        if let Some(cpl) = self.cpl {
            check_amount("cpl", cpl)?;
        }
        if let Some(rate) = self.conversion_rate {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ValidationError::ConversionRateOutOfRange(rate));
            }
        }
        if let Some(score) = self.landing_page_score {
            if score > 100 {
                return Err(ValidationError::LandingScoreOutOfRange(score));
            }
        }
        Ok(())
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidMetric { field, value })
    }
}
