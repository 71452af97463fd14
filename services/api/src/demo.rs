use crate::infra::{parse_industry, InMemorySessionStore};
use clap::Args;
use credit_engine::error::AppError;
use credit_engine::scoring::{
    Application, ComponentKind, Decision, DecisionEngine, EnterpriseSubmission,
    IndividualSubmission, IndustryCategory, InsightTone, PolicyConfig, ProductKind, Submission,
    MAX_SCORE,
};
use credit_engine::sessions::{CreditSessionService, SessionId};
use std::sync::Arc;

/// Policy knobs shared by both `score` subcommands. Unset flags keep the product defaults.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct PolicyOverrides {
    /// Maximum tolerated days past due
    #[arg(long)]
    pub(crate) max_days_past_due: Option<u32>,
    /// Minimum income (individual) or registered capital in billions (enterprise)
    #[arg(long)]
    pub(crate) minimum_capacity: Option<f64>,
    /// Disable the blacklist / restricted-industry rule
    #[arg(long)]
    pub(crate) no_restriction: bool,
    /// Ratings that are rejected outright, comma separated (replaces the default list)
    #[arg(long, value_delimiter = ',')]
    pub(crate) auto_reject: Vec<String>,
}

impl PolicyOverrides {
    pub(crate) fn apply(&self, mut policy: PolicyConfig) -> PolicyConfig {
        if let Some(max) = self.max_days_past_due {
            policy.max_days_past_due = max;
        }
        if let Some(minimum) = self.minimum_capacity {
            policy.minimum_capacity = minimum;
        }
        if self.no_restriction {
            policy.restriction_enabled = false;
        }
        if !self.auto_reject.is_empty() {
            policy.auto_reject_ratings = self
                .auto_reject
                .iter()
                .map(|rating| rating.trim().to_string())
                .filter(|rating| !rating.is_empty())
                .collect();
        }
        policy
    }
}

#[derive(Args, Debug)]
pub(crate) struct IndividualScoreArgs {
    /// Applicant age in years
    #[arg(long)]
    pub(crate) age: f64,
    /// Prior credit score (0-1000)
    #[arg(long)]
    pub(crate) prior_credit_score: f64,
    /// Average account balance
    #[arg(long)]
    pub(crate) average_balance: f64,
    /// Debt-to-income ratio as a percentage
    #[arg(long)]
    pub(crate) debt_to_income: f64,
    /// Number of open credit cards
    #[arg(long)]
    pub(crate) card_count: u32,
    /// Current days past due
    #[arg(long, default_value_t = 0)]
    pub(crate) days_past_due: u32,
    /// Monthly income
    #[arg(long)]
    pub(crate) income: f64,
    /// Applicant appears on the credit blacklist
    #[arg(long)]
    pub(crate) blacklisted: bool,
    #[command(flatten)]
    pub(crate) policy: PolicyOverrides,
    /// Print the decision as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl IndividualScoreArgs {
    pub(crate) fn submission(&self) -> IndividualSubmission {
        IndividualSubmission {
            age: self.age,
            prior_credit_score: self.prior_credit_score,
            average_balance: self.average_balance,
            debt_to_income: self.debt_to_income,
            card_count: self.card_count,
            days_past_due: self.days_past_due,
            income: self.income,
            blacklisted: self.blacklisted,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct EnterpriseScoreArgs {
    /// Years the business has operated
    #[arg(long)]
    pub(crate) years_operating: f64,
    /// Credit bureau (CIC) score, 300-1000
    #[arg(long)]
    pub(crate) bureau_score: f64,
    /// Net profit margin as a percentage
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) profit_margin: f64,
    /// Debt/equity ratio as a percentage
    #[arg(long)]
    pub(crate) debt_to_equity: f64,
    /// Collateral value over loan amount, as a percentage
    #[arg(long)]
    pub(crate) collateral_coverage: f64,
    /// Longest current delinquency in days
    #[arg(long, default_value_t = 0)]
    pub(crate) max_days_past_due: u32,
    /// Registered capital in billions of VND
    #[arg(long)]
    pub(crate) registered_capital: f64,
    /// Line of business
    #[arg(long, value_parser = parse_industry, default_value = "manufacturing")]
    pub(crate) industry: IndustryCategory,
    #[command(flatten)]
    pub(crate) policy: PolicyOverrides,
    /// Print the decision as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl EnterpriseScoreArgs {
    pub(crate) fn submission(&self) -> EnterpriseSubmission {
        EnterpriseSubmission {
            years_operating: self.years_operating,
            bureau_score: self.bureau_score,
            profit_margin: self.profit_margin,
            debt_to_equity: self.debt_to_equity,
            collateral_coverage: self.collateral_coverage,
            max_days_past_due: self.max_days_past_due,
            registered_capital: self.registered_capital,
            industry: self.industry,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the SME portion of the demo.
    #[arg(long)]
    pub(crate) skip_enterprise: bool,
}

pub(crate) fn score_submission(
    submission: Submission,
    overrides: &PolicyOverrides,
) -> Result<Decision, AppError> {
    let engine = DecisionEngine::for_product(submission.product());
    let profile = engine.profile();
    let policy = overrides
        .apply(profile.default_policy.clone())
        .validated(&profile.rating_scale)?;
    let application = Application::from_submission(submission)?;
    Ok(engine.decide(&application, &policy)?)
}

pub(crate) fn run_score(
    submission: Submission,
    overrides: &PolicyOverrides,
    json: bool,
) -> Result<(), AppError> {
    let decision = score_submission(submission, overrides)?;

    if json {
        match serde_json::to_string_pretty(&decision) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Decision payload unavailable: {err}"),
        }
    } else {
        for line in decision_lines(&decision) {
            println!("{line}");
        }
    }
    Ok(())
}

pub(crate) fn decision_lines(decision: &Decision) -> Vec<String> {
    let mut lines = vec![
        format!("{} credit decision", title_case(decision.product.label())),
        format!("  Score: {} / {}", decision.total_score, MAX_SCORE),
        format!("  Rating: {}", decision.rating),
        format!("  Verdict: {}", decision.verdict.label()),
    ];

    if decision.reasons.is_empty() {
        lines.push("  Rejection reasons: none".to_string());
    } else {
        lines.push("  Rejection reasons:".to_string());
        lines.extend(
            decision
                .reasons
                .iter()
                .map(|reason| format!("    - {reason}")),
        );
    }

    lines.push("  Score breakdown:".to_string());
    for component in decision.breakdown.iter() {
        let marker = match component.kind {
            ComponentKind::RangeAdjustment => " (range limit)",
            ComponentKind::Base | ComponentKind::Factor(_) => "",
        };
        lines.push(format!(
            "    - {}: {:+}{}",
            component.label, component.points, marker
        ));
    }

    if !decision.insights.is_empty() {
        lines.push("  Insights:".to_string());
        for insight in &decision.insights {
            let tone = match insight.tone {
                InsightTone::Strength => "strength",
                InsightTone::Caution => "caution",
            };
            lines.push(format!("    - [{tone}] {}", insight.message));
        }
    }

    lines
}

fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { skip_enterprise } = args;

    println!("Credit decision demo");
    let service = CreditSessionService::new(
        Arc::new(InMemorySessionStore::default()),
        ProductKind::Individual,
    );

    let session = match service.open(Some(ProductKind::Individual)) {
        Ok(session) => session,
        Err(err) => {
            println!("  Session unavailable: {err}");
            return Ok(());
        }
    };
    println!("\nConsumer session {} (default policy)", session.id.0);
    print_session_decision(&service, &session.id, Submission::Individual(demo_consumer(20)));

    let mut stricter = session.policy.clone();
    stricter.max_days_past_due = 5;
    match service.save_policy(&session.id, stricter) {
        Ok(policy) => println!(
            "\nPolicy saved: max days past due {}, minimum income {}",
            policy.max_days_past_due, policy.minimum_capacity
        ),
        Err(err) => {
            println!("  Policy rejected: {err}");
            return Ok(());
        }
    }
    print_session_decision(&service, &session.id, Submission::Individual(demo_consumer(20)));

    if skip_enterprise {
        return Ok(());
    }

    let session = match service.open(Some(ProductKind::Enterprise)) {
        Ok(session) => session,
        Err(err) => {
            println!("  Session unavailable: {err}");
            return Ok(());
        }
    };
    println!("\nSME session {} (default policy)", session.id.0);
    print_session_decision(&service, &session.id, Submission::Enterprise(demo_sme()));

    match service.last_decision(&session.id) {
        Ok(Some(record)) => match serde_json::to_string_pretty(&record.view(&session.id)) {
            Ok(json) => println!("  Latest decision payload:\n{json}"),
            Err(err) => println!("  Latest decision payload unavailable: {err}"),
        },
        Ok(None) => println!("  No decision recorded"),
        Err(err) => println!("  Session store unavailable: {err}"),
    }

    Ok(())
}

fn print_session_decision(
    service: &CreditSessionService<InMemorySessionStore>,
    id: &SessionId,
    submission: Submission,
) {
    match service.evaluate(id, submission) {
        Ok(record) => {
            for line in decision_lines(&record.decision) {
                println!("{line}");
            }
        }
        Err(err) => println!("  Evaluation unavailable: {err}"),
    }
}

fn demo_consumer(days_past_due: u32) -> IndividualSubmission {
    IndividualSubmission {
        age: 35.0,
        prior_credit_score: 650.0,
        average_balance: 2000.0,
        debt_to_income: 30.0,
        card_count: 2,
        days_past_due,
        income: 8000.0,
        blacklisted: false,
    }
}

fn demo_sme() -> EnterpriseSubmission {
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
