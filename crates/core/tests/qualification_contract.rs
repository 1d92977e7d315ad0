use std::sync::Arc;
use std::thread;

use steelqual_core::qualification::regions::FEDERATIVE_UNITS;
use steelqual_core::{
    assess, check_disqualification, compute_score, get_minimum_for_region, is_product_available,
    is_region_served, meets_minimum_volume, parse_volume_kg, DeterministicQualificationEngine,
    DisqualificationRule, Kilograms, LeadAttributes, QualificationEngine, QualificationState,
};

type ContractTestResult<T = ()> = Result<T, String>;

macro_rules! require {
    ($cond:expr) => {
        if !$cond {
            return Err(format!("assertion failed: `{}`", stringify!($cond)));
        }
    };
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            return Err(format!($($arg)*));
        }
    };
}

macro_rules! require_eq {
    ($left:expr, $right:expr) => {
        if $left != $right {
            return Err(format!(
                "assertion failed: `left == right` (`{:?}` != `{:?}`)",
                $left,
                $right
            ));
        }
    };
}

#[test]
fn every_federative_unit_has_a_positive_minimum() -> ContractTestResult {
    for unit in FEDERATIVE_UNITS {
        let minimum = get_minimum_for_region(unit)
            .ok_or_else(|| format!("{unit} should have a minimum order weight"))?;
        require!(minimum > 0, "{unit} minimum should be positive, got {minimum}");
        require!(is_region_served(Some(unit)), "{unit} should be served");
    }
    require_eq!(get_minimum_for_region("XX"), None::<u32>);
    Ok(())
}

#[test]
fn volume_parsing_matches_documented_values() -> ContractTestResult {
    require_eq!(parse_volume_kg(Some("5 toneladas")), Kilograms::from_whole(5000));
    require_eq!(parse_volume_kg(Some("500kg")), Kilograms::from_whole(500));
    require_eq!(parse_volume_kg(Some("10 unidades")), Kilograms::from_whole(200));
    require_eq!(parse_volume_kg(Some("")), Kilograms::ZERO);
    require_eq!(parse_volume_kg(Some("abc")), Kilograms::ZERO);
    require_eq!(parse_volume_kg(None), Kilograms::ZERO);
    Ok(())
}

#[test]
fn score_is_bounded_and_monotonic() -> ContractTestResult {
    require_eq!(compute_score(None, None), 0);
    require_eq!(compute_score(Some("1000 toneladas"), Some("urgente")), 100);

    let mut previous = 0;
    for kilograms in (0..=9000).step_by(250) {
        let text = format!("{kilograms} kg");
        let score = compute_score(Some(&text), None);
        require!(score >= previous, "score dropped at {text}: {score} < {previous}");
        previous = score;
    }
    Ok(())
}

#[test]
fn minimum_volume_uses_region_thresholds() -> ContractTestResult {
    require!(!meets_minimum_volume(Some("200kg"), Some("CE")));
    require!(meets_minimum_volume(Some("2 toneladas"), Some("CE")));
    require!(meets_minimum_volume(Some("250 kg"), Some("CE")), "equality meets the minimum");
    require!(!meets_minimum_volume(Some("3 toneladas"), Some("SP")));
    require!(meets_minimum_volume(Some("5 toneladas"), Some("SP")));
    Ok(())
}

#[test]
fn region_check_is_case_insensitive_and_trimmed() -> ContractTestResult {
    require!(is_region_served(Some(" ce ")));
    require!(is_region_served(Some("Sp")));
    require!(!is_region_served(Some("XX")));
    require!(!is_region_served(Some("")));
    require!(!is_region_served(None));
    Ok(())
}

#[test]
fn product_matching_is_bidirectional() -> ContractTestResult {
    require!(is_product_available(Some("Vergalhão CA-50 10mm")));
    require!(is_product_available(Some("tubo")));
    require!(!is_product_available(Some("madeira")));
    require!(!is_product_available(None));
    Ok(())
}

#[test]
fn first_failing_rule_wins() -> ContractTestResult {
    let verdict = check_disqualification(Some("XX"), Some("10 kg"), Some("madeira"));
    require!(verdict.disqualified);
    require_eq!(verdict.state(), QualificationState::DisqualifiedByRegion);
    require!(
        verdict.reason.contains("XX"),
        "region reason should name the code: {}",
        verdict.reason
    );

    let verdict = check_disqualification(Some("SP"), Some("3 toneladas"), Some("madeira"));
    require_eq!(verdict.rule, Some(DisqualificationRule::Volume));

    let verdict = check_disqualification(Some("SP"), Some("5 toneladas"), Some("madeira"));
    require_eq!(verdict.rule, Some(DisqualificationRule::Product));
    Ok(())
}

#[test]
fn lead_without_attributes_is_qualified_by_omission() -> ContractTestResult {
    let verdict = check_disqualification(None, None, None);
    require!(!verdict.disqualified);
    require!(verdict.reason.is_empty());
    require!(verdict.qualified_by_omission());
    require_eq!(verdict.skipped_rules, DisqualificationRule::ORDER.to_vec());
    Ok(())
}

#[test]
fn checks_are_idempotent_across_threads() -> ContractTestResult {
    let engine = Arc::new(DeterministicQualificationEngine::default());
    let attributes = LeadAttributes {
        region: Some("BA".to_owned()),
        volume_estimate: Some("2 toneladas".to_owned()),
        urgency: Some("preciso para amanhã".to_owned()),
        product: Some("telha".to_owned()),
    };
    let expected = assess(&attributes);

    let handles = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let attributes = attributes.clone();
            thread::spawn(move || engine.assess(&attributes))
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let assessment = handle.join().map_err(|_| "worker thread panicked".to_string())?;
        require_eq!(assessment, expected);
    }
    Ok(())
}

#[test]
fn oversized_volumes_never_panic() -> ContractTestResult {
    require_eq!(parse_volume_kg(Some("79228162514264337593543950335 toneladas")), Kilograms::ZERO);
    require_eq!(compute_score(Some("9999999999999999999999999999 peças"), Some("urgente")), 30);

    let verdict = check_disqualification(Some("SP"), Some("5000000000000000000000000000 t"), None);
    require_eq!(verdict.rule, Some(DisqualificationRule::Volume));
    Ok(())
}

#[test]
fn whitespace_only_attributes_are_supplied() -> ContractTestResult {
    let verdict = check_disqualification(Some("  "), Some("5 toneladas"), Some("vergalhão"));
    require_eq!(verdict.rule, Some(DisqualificationRule::Region));

    let verdict = check_disqualification(Some("CE"), Some("   "), None);
    require_eq!(verdict.rule, Some(DisqualificationRule::Volume));

    require!(is_product_available(Some("  ")));
    require!(!is_product_available(Some("")));
    Ok(())
}
