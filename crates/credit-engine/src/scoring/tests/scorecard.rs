use super::common::*;
use crate::scoring::{
    AffineTransform, Application, AttributeKind, ClampBand, ComponentKind, ProductProfile,
    ScoreFactor, Scorecard, MAX_SCORE,
};

#[test]
fn individual_example_scores_732() {
    let profile = ProductProfile::individual();
    let (total, breakdown) = profile.scorecard.compute(&individual_application());

    assert_eq!(total, 732);
    let points: Vec<i32> = breakdown.iter().map(|component| component.points).collect();
    assert_eq!(points, vec![200, 17, 325, 20, 140, 30]);
    assert_eq!(breakdown.total(), total);
}

#[test]
fn enterprise_example_scores_624() {
    let profile = ProductProfile::enterprise();
    let (total, breakdown) = profile.scorecard.compute(&enterprise_application());

    assert_eq!(total, 624);
    assert_eq!(breakdown.components()[0].kind, ComponentKind::Base);
    assert_eq!(breakdown.components()[0].points, 300);
    assert_eq!(breakdown.points_for(AttributeKind::YearsOperating), Some(30));
    assert_eq!(breakdown.points_for(AttributeKind::BureauScore), Some(140));
    assert_eq!(breakdown.points_for(AttributeKind::ProfitMargin), Some(50));
    assert_eq!(breakdown.points_for(AttributeKind::DebtToEquity), Some(64));
    assert_eq!(breakdown.points_for(AttributeKind::CollateralCoverage), Some(40));
}

#[test]
fn breakdown_preserves_scorecard_order() {
    let profile = ProductProfile::enterprise();
    let (_, breakdown) = profile.scorecard.compute(&enterprise_application());

    let kinds: Vec<ComponentKind> = breakdown.iter().map(|component| component.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ComponentKind::Base,
            ComponentKind::Factor(AttributeKind::YearsOperating),
            ComponentKind::Factor(AttributeKind::BureauScore),
            ComponentKind::Factor(AttributeKind::ProfitMargin),
            ComponentKind::Factor(AttributeKind::DebtToEquity),
            ComponentKind::Factor(AttributeKind::CollateralCoverage),
        ]
    );
}

#[test]
fn enterprise_factor_bands_cap_and_floor_contributions() {
    let mut submission = enterprise_submission();
    submission.years_operating = 40.0;
    submission.profit_margin = -15.0;
    submission.debt_to_equity = 450.0;
    submission.collateral_coverage = 260.0;
    let application = Application::enterprise(submission).expect("valid submission");

    let (_, breakdown) = ProductProfile::enterprise().scorecard.compute(&application);

    assert_eq!(breakdown.points_for(AttributeKind::YearsOperating), Some(100));
    assert_eq!(breakdown.points_for(AttributeKind::ProfitMargin), Some(0));
    assert_eq!(breakdown.points_for(AttributeKind::DebtToEquity), Some(0));
    assert_eq!(breakdown.points_for(AttributeKind::CollateralCoverage), Some(100));
}

#[test]
fn decreasing_factors_can_go_negative_without_a_band() {
    let mut submission = individual_submission();
    submission.card_count = 9;
    submission.debt_to_income = 120.0;
    let application = Application::individual(submission).expect("valid submission");

    let (total, breakdown) = ProductProfile::individual().scorecard.compute(&application);

    assert_eq!(breakdown.points_for(AttributeKind::CardCount), Some(-40));
    assert_eq!(breakdown.points_for(AttributeKind::DebtToIncome), Some(-40));
    assert_eq!(breakdown.total(), total);
}

#[test]
fn partial_scores_floor_fractional_points() {
    let factor = ScoreFactor {
        attribute: AttributeKind::Age,
        label: "Age",
        transform: AffineTransform::scaled(0.5),
        band: ClampBand::UNBOUNDED,
    };
    assert_eq!(factor.points(35.0), 17);
    assert_eq!(factor.points(35.9), 17);

    let negative = ScoreFactor {
        attribute: AttributeKind::DebtToIncome,
        label: "Debt-to-income ratio",
        transform: AffineTransform::around(100.0, -2.0),
        band: ClampBand::UNBOUNDED,
    };
    // floor, not truncation toward zero
    assert_eq!(negative.points(100.25), -1);
}

#[test]
fn floor_tolerates_binary_representation_noise() {
    let factor = ScoreFactor {
        attribute: AttributeKind::DebtToIncome,
        label: "ratio",
        transform: AffineTransform::scaled(100.0),
        band: ClampBand::UNBOUNDED,
    };
    assert_eq!(factor.points(0.29), 29);
}

#[test]
fn total_is_clamped_with_an_explicit_adjustment() {
    let mut submission = individual_submission();
    submission.average_balance = 250_000.0;
    let application = Application::individual(submission).expect("valid submission");

    let (total, breakdown) = ProductProfile::individual().scorecard.compute(&application);

    assert_eq!(total, MAX_SCORE);
    let last = breakdown.components().last().expect("adjustment present");
    assert_eq!(last.kind, ComponentKind::RangeAdjustment);
    assert!(last.points < 0);
    assert_eq!(breakdown.total(), MAX_SCORE);
}

#[test]
fn low_totals_clamp_to_zero() {
    let scorecard = Scorecard::new(
        "Base score",
        10,
        vec![ScoreFactor {
            attribute: AttributeKind::CardCount,
            label: "Open credit cards",
            transform: AffineTransform::around(5.0, -10.0),
            band: ClampBand::UNBOUNDED,
        }],
    );
    let mut submission = individual_submission();
    submission.card_count = 20;
    let application = Application::individual(submission).expect("valid submission");

    let (total, breakdown) = scorecard.compute(&application);

    assert_eq!(total, 0);
    assert_eq!(breakdown.total(), 0);
    assert_eq!(
        breakdown.components().last().map(|component| component.points),
        Some(140)
    );
}

#[test]
fn no_adjustment_when_total_is_in_range() {
    let (_, breakdown) = ProductProfile::individual()
        .scorecard
        .compute(&individual_application());
    assert!(breakdown
        .iter()
        .all(|component| component.kind != ComponentKind::RangeAdjustment));
}
