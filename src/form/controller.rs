use validator::Validate;

use crate::error::FieldError;
use crate::schema::{flatten_errors, AnalysisRequestPayload};

use super::holdings::HoldingsEditor;

/// Which screen of the intake flow the user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStep {
    #[default]
    Profile,
    Holdings,
    Payment,
}

impl FormStep {
    pub const COUNT: u8 = 3;

    /// 1-based position for progress display.
    pub fn number(&self) -> u8 {
        match self {
            FormStep::Profile => 1,
            FormStep::Holdings => 2,
            FormStep::Payment => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormStep::Profile => "Your Profile",
            FormStep::Holdings => "Your Holdings",
            FormStep::Payment => "Payment",
        }
    }

    /// Wire field names this step's forward gate checks.
    fn guarded_fields(&self) -> &'static [&'static str] {
        match self {
            FormStep::Profile => &["name", "email", "investmentGoals", "riskAppetite", "timeframe"],
            FormStep::Holdings => &["holdings"],
            FormStep::Payment => &["txHash"],
        }
    }
}

/// Why a submission attempt did not start.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitBlocked {
    NotOnPaymentStep,
    AlreadyPending,
    Invalid(Vec<FieldError>),
}

/// All form state in one place, stepped forward only through the guarded
/// transitions below. Values survive any amount of back-and-forth; only a
/// successful submission clears them.
#[derive(Debug, Clone, Default)]
pub struct FormFlow {
    step: FormStep,
    pub name: String,
    pub email: String,
    pub investment_goals: String,
    pub risk_appetite: String,
    pub timeframe: String,
    pub holdings: HoldingsEditor,
    pub tx_hash: String,
    pending: bool,
}

impl FormFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Assembles the wire payload from the current state. Unselected
    /// option fields become absent so they surface as "please select"
    /// errors rather than bad values.
    pub fn payload(&self) -> AnalysisRequestPayload {
        AnalysisRequestPayload {
            name: optional(&self.name),
            email: Some(self.email.clone()),
            investment_goals: optional(&self.investment_goals),
            risk_appetite: optional(&self.risk_appetite),
            timeframe: optional(&self.timeframe),
            holdings: Some(self.holdings.to_payload()),
            tx_hash: optional(&self.tx_hash),
        }
    }

    /// Moves forward one step if the current step's fields validate.
    /// On failure the step stays put and the field errors come back.
    pub fn advance(&mut self) -> Result<FormStep, Vec<FieldError>> {
        let next = match self.step {
            FormStep::Profile => FormStep::Holdings,
            FormStep::Holdings => FormStep::Payment,
            FormStep::Payment => return Ok(FormStep::Payment),
        };

        let errors = self.step_errors(self.step);
        if !errors.is_empty() {
            return Err(errors);
        }

        self.step = next;
        Ok(next)
    }

    /// Unconditional backward transition; never loses data.
    pub fn back(&mut self) -> FormStep {
        self.step = match self.step {
            FormStep::Profile | FormStep::Holdings => FormStep::Profile,
            FormStep::Payment => FormStep::Holdings,
        };
        self.step
    }

    /// Starts a submission from the payment step: re-validates the whole
    /// payload, marks the flow pending, and hands the payload over. A
    /// second call while pending is refused.
    pub fn begin_submission(&mut self) -> Result<AnalysisRequestPayload, SubmitBlocked> {
        if self.step != FormStep::Payment {
            return Err(SubmitBlocked::NotOnPaymentStep);
        }
        if self.pending {
            return Err(SubmitBlocked::AlreadyPending);
        }

        let payload = self.payload();
        if let Err(errors) = payload.validate() {
            return Err(SubmitBlocked::Invalid(flatten_errors(&errors)));
        }

        self.pending = true;
        Ok(payload)
    }

    /// The submission went through; reset to a fresh flow.
    pub fn finish_success(&mut self) {
        *self = FormFlow::new();
    }

    /// The submission failed; keep everything for a retry.
    pub fn finish_failure(&mut self) {
        self.pending = false;
    }

    fn step_errors(&self, step: FormStep) -> Vec<FieldError> {
        let all = match self.payload().validate() {
            Ok(()) => return Vec::new(),
            Err(errors) => flatten_errors(&errors),
        };

        let guarded = step.guarded_fields();
        all.into_iter()
            .filter(|err| owns_field(guarded, &err.field))
            .collect()
    }
}

fn owns_field(guarded: &[&str], field: &str) -> bool {
    guarded.iter().any(|prefix| {
        field == *prefix
            || field.starts_with(&format!("{}[", prefix))
            || field.starts_with(&format!("{}.", prefix))
    })
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
