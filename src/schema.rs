use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::db::{HoldingRecord, NewAnalysisRequest};
use crate::enums::{InvestmentGoal, RiskAppetite, Timeframe};
use crate::error::FieldError;

// ─── Analysis request payload ────────────────────────────────────────

/// The wire shape of a submission. All fields are soft at the serde level
/// so that missing values surface as validation errors rather than
/// deserialization failures.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequestPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Please enter a valid email address"),
        email(message = "Please enter a valid email address")
    )]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Please select an investment goal"),
        custom(function = validate_investment_goal, message = "Please select an investment goal")
    )]
    pub investment_goals: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Please select your risk appetite"),
        custom(function = validate_risk_appetite, message = "Please select your risk appetite")
    )]
    pub risk_appetite: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Please select your investment timeframe"),
        custom(function = validate_timeframe, message = "Please select your investment timeframe")
    )]
    pub timeframe: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Please add at least one holding"),
        length(min = 1, message = "Please add at least one holding"),
        nested
    )]
    pub holdings: Option<Vec<HoldingPayload>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HoldingPayload {
    /// Editing identity only; carries no meaning once submitted.
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please specify a coin"))]
    pub coin: String,

    #[serde(default)]
    #[validate(range(exclusive_min = 0.000001, message = "Please enter a valid quantity"))]
    pub quantity: f64,

    #[serde(default)]
    #[validate(range(exclusive_min = 0.000001, message = "Please enter a valid price"))]
    pub avg_buy_price: f64,
}

impl AnalysisRequestPayload {
    /// Validates the payload and converts it into the typed store input.
    /// Field errors come back addressed by wire path, sorted by field.
    pub fn into_new_request(self) -> std::result::Result<NewAnalysisRequest, Vec<FieldError>> {
        self.validate().map_err(|e| flatten_errors(&e))?;

        // Presence and option membership are guaranteed past validate().
        let investment_goals = parse_selected::<InvestmentGoal>(
            self.investment_goals.as_deref(),
            "investmentGoals",
            "Please select an investment goal",
        )?;
        let risk_appetite = parse_selected::<RiskAppetite>(
            self.risk_appetite.as_deref(),
            "riskAppetite",
            "Please select your risk appetite",
        )?;
        let timeframe = parse_selected::<Timeframe>(
            self.timeframe.as_deref(),
            "timeframe",
            "Please select your investment timeframe",
        )?;

        let holdings = self
            .holdings
            .unwrap_or_default()
            .into_iter()
            .map(|h| HoldingRecord {
                coin: h.coin,
                quantity: h.quantity,
                avg_buy_price: h.avg_buy_price,
            })
            .collect();

        Ok(NewAnalysisRequest {
            name: normalize_optional(self.name),
            email: self.email.unwrap_or_default(),
            investment_goals,
            risk_appetite,
            timeframe,
            holdings,
            tx_hash: normalize_optional(self.tx_hash),
        })
    }
}

// ─── Contact payload ─────────────────────────────────────────────────

/// Contact form shape with the stricter rules the form applies before
/// sending. The server itself only checks field presence.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactPayload {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

impl ContactPayload {
    pub fn check(&self) -> std::result::Result<(), Vec<FieldError>> {
        self.validate().map_err(|e| flatten_errors(&e))
    }
}

// ─── Field error flattening ──────────────────────────────────────────

/// Flattens nested validation errors into wire-addressed field errors,
/// e.g. `holdings[0].avgBuyPrice`.
pub fn flatten_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect_errors("", errors, &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    out
}

fn collect_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let name = to_camel(field.as_ref());
        let path = if prefix.is_empty() {
            name
        } else {
            format!("{}.{}", prefix, name)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    out.push(FieldError::new(path.clone(), err.code.to_string(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    let item_path = format!("{}[{}]", path, index);
                    collect_errors(&item_path, inner, out);
                }
            }
        }
    }
}

fn to_camel(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn parse_selected<T: FromStr>(
    value: Option<&str>,
    field: &str,
    message: &str,
) -> std::result::Result<T, Vec<FieldError>> {
    value
        .unwrap_or_default()
        .parse::<T>()
        .map_err(|_| vec![FieldError::new(field, "enum", message)])
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_investment_goal(value: &str) -> std::result::Result<(), ValidationError> {
    InvestmentGoal::from_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("enum"))
}

fn validate_risk_appetite(value: &str) -> std::result::Result<(), ValidationError> {
    RiskAppetite::from_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("enum"))
}

fn validate_timeframe(value: &str) -> std::result::Result<(), ValidationError> {
    Timeframe::from_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("enum"))
}
