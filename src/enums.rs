use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

// ─── InvestmentGoal ──────────────────────────────────────────────────

/// What the user wants out of their portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvestmentGoal {
    Growth,
    Income,
    Preservation,
    Speculation,
}

impl InvestmentGoal {
    /// Canonical string stored in the database and sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentGoal::Growth => "growth",
            InvestmentGoal::Income => "income",
            InvestmentGoal::Preservation => "preservation",
            InvestmentGoal::Speculation => "speculation",
        }
    }

    /// Human-readable display name.
    pub fn label(&self) -> &'static str {
        match self {
            InvestmentGoal::Growth => "Long-term Growth",
            InvestmentGoal::Income => "Regular Income",
            InvestmentGoal::Preservation => "Capital Preservation",
            InvestmentGoal::Speculation => "Short-term Gains",
        }
    }

    pub fn all() -> &'static [InvestmentGoal] {
        &[
            InvestmentGoal::Growth,
            InvestmentGoal::Income,
            InvestmentGoal::Preservation,
            InvestmentGoal::Speculation,
        ]
    }
}

impl fmt::Display for InvestmentGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentGoal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "growth" => Ok(InvestmentGoal::Growth),
            "income" => Ok(InvestmentGoal::Income),
            "preservation" => Ok(InvestmentGoal::Preservation),
            "speculation" => Ok(InvestmentGoal::Speculation),
            _ => Err(AppError::InvalidInput(format!(
                "Invalid investment goal: {}. Supported: growth, income, preservation, speculation",
                s
            ))),
        }
    }
}

// ─── RiskAppetite ────────────────────────────────────────────────────

/// How much drawdown the user claims to tolerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskAppetite {
    Conservative,
    Moderate,
    Aggressive,
    VeryAggressive,
}

impl RiskAppetite {
    /// Canonical string stored in the database and sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskAppetite::Conservative => "conservative",
            RiskAppetite::Moderate => "moderate",
            RiskAppetite::Aggressive => "aggressive",
            RiskAppetite::VeryAggressive => "very-aggressive",
        }
    }

    /// Human-readable display name.
    pub fn label(&self) -> &'static str {
        match self {
            RiskAppetite::Conservative => "Conservative",
            RiskAppetite::Moderate => "Moderate",
            RiskAppetite::Aggressive => "Aggressive",
            RiskAppetite::VeryAggressive => "Very Aggressive",
        }
    }

    pub fn all() -> &'static [RiskAppetite] {
        &[
            RiskAppetite::Conservative,
            RiskAppetite::Moderate,
            RiskAppetite::Aggressive,
            RiskAppetite::VeryAggressive,
        ]
    }
}

impl fmt::Display for RiskAppetite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskAppetite {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conservative" => Ok(RiskAppetite::Conservative),
            "moderate" => Ok(RiskAppetite::Moderate),
            "aggressive" => Ok(RiskAppetite::Aggressive),
            "very-aggressive" => Ok(RiskAppetite::VeryAggressive),
            _ => Err(AppError::InvalidInput(format!(
                "Invalid risk appetite: {}. Supported: conservative, moderate, aggressive, very-aggressive",
                s
            ))),
        }
    }
}

// ─── Timeframe ───────────────────────────────────────────────────────

/// Intended holding period for the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timeframe {
    Short,
    Medium,
    Long,
    VeryLong,
}

impl Timeframe {
    /// Canonical string stored in the database and sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Short => "short",
            Timeframe::Medium => "medium",
            Timeframe::Long => "long",
            Timeframe::VeryLong => "very-long",
        }
    }

    /// Human-readable display name.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Short => "Short-term (< 1 year)",
            Timeframe::Medium => "Medium-term (1-3 years)",
            Timeframe::Long => "Long-term (3-10 years)",
            Timeframe::VeryLong => "Very long-term (10+ years)",
        }
    }

    pub fn all() -> &'static [Timeframe] {
        &[
            Timeframe::Short,
            Timeframe::Medium,
            Timeframe::Long,
            Timeframe::VeryLong,
        ]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "short" => Ok(Timeframe::Short),
            "medium" => Ok(Timeframe::Medium),
            "long" => Ok(Timeframe::Long),
            "very-long" => Ok(Timeframe::VeryLong),
            _ => Err(AppError::InvalidInput(format!(
                "Invalid timeframe: {}. Supported: short, medium, long, very-long",
                s
            ))),
        }
    }
}
