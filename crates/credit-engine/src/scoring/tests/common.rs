use std::collections::BTreeSet;

use crate::scoring::{
    Application, DecisionEngine, EnterpriseSubmission, IndividualSubmission, IndustryCategory,
    PolicyConfig, ProductKind,
};

pub(super) fn individual_submission() -> IndividualSubmission {
    IndividualSubmission {
        age: 35.0,
        prior_credit_score: 650.0,
        average_balance: 2000.0,
        debt_to_income: 30.0,
        card_count: 2,
        days_past_due: 0,
        income: 8000.0,
        blacklisted: false,
    }
}

pub(super) fn enterprise_submission() -> EnterpriseSubmission {
    EnterpriseSubmission {
        years_operating: 3.0,
        bureau_score: 650.0,
        profit_margin: 10.0,
        debt_to_equity: 120.0,
        collateral_coverage: 80.0,
        max_days_past_due: 0,
        registered_capital: 5.0,
        industry: IndustryCategory::Manufacturing,
    }
}

pub(super) fn individual_application() -> Application {
    Application::individual(individual_submission()).expect("valid individual submission")
}

pub(super) fn enterprise_application() -> Application {
    Application::enterprise(enterprise_submission()).expect("valid enterprise submission")
}

pub(super) fn individual_engine() -> DecisionEngine {
    DecisionEngine::for_product(ProductKind::Individual)
}

pub(super) fn enterprise_engine() -> DecisionEngine {
    DecisionEngine::for_product(ProductKind::Enterprise)
}

pub(super) fn permissive_policy() -> PolicyConfig {
    PolicyConfig {
        max_days_past_due: u32::MAX,
        minimum_capacity: 0.0,
        restriction_enabled: false,
        auto_reject_ratings: BTreeSet::new(),
    }
}

pub(super) fn individual_policy(max_days_past_due: u32, minimum_income: f64) -> PolicyConfig {
    PolicyConfig {
        max_days_past_due,
        minimum_capacity: minimum_income,
        restriction_enabled: true,
        auto_reject_ratings: ["D", "E"].iter().map(|grade| grade.to_string()).collect(),
    }
}
