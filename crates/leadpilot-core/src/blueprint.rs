use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ValidationError;

/// Campaign intent captured during a planning session.
///
/// Created once and treated as immutable afterwards; administrative edits
/// happen in the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicBlueprint {
    pub id: Uuid,
    pub tenant_id: String,
    #[serde(default)]
    pub site_id: Option<String>,
    pub summary: String,
    #[serde(default)]
    pub checklist: Vec<String>,
    #[serde(default)]
    pub tracking_plan: Vec<String>,
    pub inputs: BlueprintInputs,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Structured answers that drive plan assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintInputs {
    /// e.g. `"Dubai Marina"`.
    pub target_location: String,
    #[serde(default)]
    pub audience: String,
    /// e.g. `"Lead Generation"`.
    pub goal: String,
    #[serde(default)]
    pub language: String,
}

impl StrategicBlueprint {
    /// Check the inputs the decision zipper relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyBlueprintField`] when the target
    /// location or goal is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.inputs.target_location.trim().is_empty() {
            return Err(ValidationError::EmptyBlueprintField("targetLocation"));
        }
        if self.inputs.goal.trim().is_empty() {
            return Err(ValidationError::EmptyBlueprintField("goal"));
        }
        Ok(())
    }
}

/// Spend ceilings for a campaign, in account currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetCaps {
    pub daily: f64,
    pub monthly: f64,
}

impl BudgetCaps {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if either cap is not a positive finite
    /// amount, or the daily cap exceeds the monthly cap.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("daily", self.daily), ("monthly", self.monthly)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::InvalidBudgetCap { field, value });
            }
        }
        if self.daily > self.monthly {
            return Err(ValidationError::DailyCapExceedsMonthly {
                daily: self.daily,
                monthly: self.monthly,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blueprint(location: &str, goal: &str) -> StrategicBlueprint {
        StrategicBlueprint {
            id: Uuid::new_v4(),
            tenant_id: "tenant-1".to_string(),
            site_id: None,
            summary: "Marina launch".to_string(),
            checklist: vec![],
            tracking_plan: vec![],
            inputs: BlueprintInputs {
                target_location: location.to_string(),
                audience: "Investors".to_string(),
                goal: goal.to_string(),
                language: "en".to_string(),
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn valid_blueprint_passes() {
        assert!(blueprint("Dubai Marina", "Lead Generation").validate().is_ok());
    }

    #[test]
    fn blank_location_is_rejected() {
        let err = blueprint("  ", "Lead Generation").validate().unwrap_err();
        assert_eq!(err, ValidationError::EmptyBlueprintField("targetLocation"));
    }

    #[test]
    fn blank_goal_is_rejected() {
        let err = blueprint("Dubai Marina", "").validate().unwrap_err();
        assert_eq!(err, ValidationError::EmptyBlueprintField("goal"));
    }

    #[test]
    fn deserializes_camel_case_document() {
        let json = r#"{
            "id": "4f8b7c1e-2a3d-4e5f-9a6b-7c8d9e0f1a2b",
            "tenantId": "tenant-9",
            "summary": "Spring push",
            "trackingPlan": ["gclid", "form_submit"],
            "inputs": {"targetLocation": "JVC", "goal": "Leads"},
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-01T10:00:00Z"
        }"#;
        let bp: StrategicBlueprint = serde_json::from_str(json).unwrap();
        assert_eq!(bp.tenant_id, "tenant-9");
        assert_eq!(bp.tracking_plan.len(), 2);
        assert!(bp.checklist.is_empty());
        assert_eq!(bp.inputs.target_location, "JVC");
        assert!(bp.inputs.audience.is_empty());
    }

    #[test]
    fn budget_caps_reject_non_positive() {
        let caps = BudgetCaps {
            daily: 0.0,
            monthly: 1000.0,
        };
        assert!(matches!(
            caps.validate(),
            Err(ValidationError::InvalidBudgetCap { field: "daily", .. })
        ));
    }

    #[test]
    fn budget_caps_reject_nan() {
        let caps = BudgetCaps {
            daily: 50.0,
            monthly: f64::NAN,
        };
        assert!(matches!(
            caps.validate(),
            Err(ValidationError::InvalidBudgetCap { field: "monthly", .. })
        ));
    }

    #[test]
    fn budget_caps_reject_daily_above_monthly() {
        let caps = BudgetCaps {
            daily: 500.0,
            monthly: 300.0,
        };
        assert!(matches!(
            caps.validate(),
            Err(ValidationError::DailyCapExceedsMonthly { .. })
        ));
    }
}
