use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Product line an application is scored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Individual,
    Enterprise,
}

impl ProductKind {
    pub fn label(&self) -> &'static str {
        match self {
            ProductKind::Individual => "individual",
            ProductKind::Enterprise => "enterprise",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "individual" | "consumer" | "retail" => Some(Self::Individual),
            "enterprise" | "sme" | "business" => Some(Self::Enterprise),
            _ => None,
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Numeric attributes a scorecard can award points for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Age,
    PriorCreditScore,
    AverageBalance,
    DebtToIncome,
    CardCount,
    YearsOperating,
    BureauScore,
    ProfitMargin,
    DebtToEquity,
    CollateralCoverage,
}

impl AttributeKind {
    pub fn field_name(&self) -> &'static str {
        match self {
            AttributeKind::Age => "age",
            AttributeKind::PriorCreditScore => "prior_credit_score",
            AttributeKind::AverageBalance => "average_balance",
            AttributeKind::DebtToIncome => "debt_to_income",
            AttributeKind::CardCount => "card_count",
            AttributeKind::YearsOperating => "years_operating",
            AttributeKind::BureauScore => "bureau_score",
            AttributeKind::ProfitMargin => "profit_margin",
            AttributeKind::DebtToEquity => "debt_to_equity",
            AttributeKind::CollateralCoverage => "collateral_coverage",
        }
    }
}

/// Line of business declared by an enterprise applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndustryCategory {
    Manufacturing,
    Trading,
    Services,
    CommercialRealEstate,
    /// Karaoke, bars, and similar venues.
    RestrictedEntertainment,
}

impl IndustryCategory {
    pub fn label(&self) -> &'static str {
        match self {
            IndustryCategory::Manufacturing => "Manufacturing",
            IndustryCategory::Trading => "Trading",
            IndustryCategory::Services => "Services",
            IndustryCategory::CommercialRealEstate => "Commercial real estate",
            IndustryCategory::RestrictedEntertainment => "Restricted entertainment (karaoke/bar)",
        }
    }

    pub fn is_restricted(&self) -> bool {
        matches!(self, IndustryCategory::RestrictedEntertainment)
    }
}

/// Raw consumer application fields gathered by the intake layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualSubmission {
    pub age: f64,
    pub prior_credit_score: f64,
    pub average_balance: f64,
    /// Debt-to-income ratio as a percentage.
    pub debt_to_income: f64,
    pub card_count: u32,
    pub days_past_due: u32,
    pub income: f64,
    #[serde(default)]
    pub blacklisted: bool,
}

/// Raw SME application fields gathered by the intake layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnterpriseSubmission {
    pub years_operating: f64,
    pub bureau_score: f64,
    /// Net profit margin as a percentage.
    pub profit_margin: f64,
    /// Debt/equity ratio as a percentage.
    pub debt_to_equity: f64,
    /// Collateral value over loan amount, as a percentage.
    pub collateral_coverage: f64,
    pub max_days_past_due: u32,
    /// Registered charter capital in billions of VND.
    pub registered_capital: f64,
    pub industry: IndustryCategory,
}

/// Submission tagged with the product it was collected for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "product", rename_all = "snake_case")]
pub enum Submission {
    Individual(IndividualSubmission),
    Enterprise(EnterpriseSubmission),
}

impl Submission {
    pub fn product(&self) -> ProductKind {
        match self {
            Submission::Individual(_) => ProductKind::Individual,
            Submission::Enterprise(_) => ProductKind::Enterprise,
        }
    }
}

/// Categorical input checked by the restriction rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionInput {
    Blacklist { listed: bool },
    Industry { category: IndustryCategory },
}

impl RestrictionInput {
    pub fn is_matched(&self) -> bool {
        match self {
            RestrictionInput::Blacklist { listed } => *listed,
            RestrictionInput::Industry { category } => category.is_restricted(),
        }
    }
}

/// Non-scored facts consumed by the hard policy rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreeningFacts {
    pub days_past_due: u32,
    /// Monthly income for consumers, registered capital for enterprises.
    pub financial_capacity: f64,
    pub restriction: RestrictionInput,
}

/// Validated, immutable application ready for scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Application {
    product: ProductKind,
    attributes: BTreeMap<AttributeKind, f64>,
    screening: ScreeningFacts,
}

impl Application {
    pub fn from_submission(submission: Submission) -> Result<Self, InvalidInput> {
        match submission {
            Submission::Individual(individual) => Self::individual(individual),
            Submission::Enterprise(enterprise) => Self::enterprise(enterprise),
        }
    }

    pub fn individual(submission: IndividualSubmission) -> Result<Self, InvalidInput> {
        let age = within("age", submission.age, 0.0, 120.0)?;
        let prior_credit_score = within(
            "prior_credit_score",
            submission.prior_credit_score,
            0.0,
            1000.0,
        )?;
        let average_balance = non_negative("average_balance", submission.average_balance)?;
        let debt_to_income = non_negative("debt_to_income", submission.debt_to_income)?;
        let attributes = BTreeMap::from([
            (AttributeKind::Age, age),
            (AttributeKind::PriorCreditScore, prior_credit_score),
            (AttributeKind::AverageBalance, average_balance),
            (AttributeKind::DebtToIncome, debt_to_income),
            (AttributeKind::CardCount, f64::from(submission.card_count)),
        ]);

        let income = non_negative("income", submission.income)?;

        Ok(Self {
            product: ProductKind::Individual,
            attributes,
            screening: ScreeningFacts {
                days_past_due: submission.days_past_due,
                financial_capacity: income,
                restriction: RestrictionInput::Blacklist {
                    listed: submission.blacklisted,
                },
            },
        })
    }

    pub fn enterprise(submission: EnterpriseSubmission) -> Result<Self, InvalidInput> {
        let years_operating = non_negative("years_operating", submission.years_operating)?;
        let bureau_score = within("bureau_score", submission.bureau_score, 300.0, 1000.0)?;
        let profit_margin = within("profit_margin", submission.profit_margin, -100.0, 100.0)?;
        let debt_to_equity = non_negative("debt_to_equity", submission.debt_to_equity)?;
        let collateral_coverage =
            non_negative("collateral_coverage", submission.collateral_coverage)?;
        let attributes = BTreeMap::from([
            (AttributeKind::YearsOperating, years_operating),
            (AttributeKind::BureauScore, bureau_score),
            (AttributeKind::ProfitMargin, profit_margin),
            (AttributeKind::DebtToEquity, debt_to_equity),
            (AttributeKind::CollateralCoverage, collateral_coverage),
        ]);

        let capital = non_negative("registered_capital", submission.registered_capital)?;

        Ok(Self {
            product: ProductKind::Enterprise,
            attributes,
            screening: ScreeningFacts {
                days_past_due: submission.max_days_past_due,
                financial_capacity: capital,
                restriction: RestrictionInput::Industry {
                    category: submission.industry,
                },
            },
        })
    }

    pub fn product(&self) -> ProductKind {
        self.product
    }

    pub fn attribute(&self, kind: AttributeKind) -> Option<f64> {
        self.attributes.get(&kind).copied()
    }

    pub fn attributes(&self) -> impl Iterator<Item = (AttributeKind, f64)> + '_ {
        self.attributes.iter().map(|(kind, value)| (*kind, *value))
    }

    pub fn screening(&self) -> &ScreeningFacts {
        &self.screening
    }
}

impl TryFrom<Submission> for Application {
    type Error = InvalidInput;

    fn try_from(submission: Submission) -> Result<Self, Self::Error> {
        Self::from_submission(submission)
    }
}

/// Attribute outside its logical domain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must not be negative (found {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be within {min}..={max} (found {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl InvalidInput {
    pub fn field(&self) -> &'static str {
        match self {
            InvalidInput::NotFinite { field }
            | InvalidInput::Negative { field, .. }
            | InvalidInput::OutOfRange { field, .. } => field,
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, InvalidInput> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidInput::NotFinite { field })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, InvalidInput> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(InvalidInput::Negative { field, value });
    }
    Ok(value)
}

fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, InvalidInput> {
    let value = finite(field, value)?;
    if value < min || value > max {
        return Err(InvalidInput::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(value)
}
