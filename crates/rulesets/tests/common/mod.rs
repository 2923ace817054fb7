#![allow(dead_code)]

use bazaar_core::{PlayerHand, RngState, RuleCard, Scoresheet, ScoringPipeline};
use bazaar_rulesets::BuiltinRuleset;

pub fn hand(player: &str, commodities: &[(&str, u32)]) -> PlayerHand {
    let mut hand = PlayerHand::new(player);
    for (name, nb_cards) in commodities {
        hand = hand.with_commodity(*name, *nb_cards);
    }
    hand
}

/// Run the scoring pipeline for the given variant with only the named rule
/// cards active.
pub fn tally(
    variant: BuiltinRuleset,
    refs: &[&str],
    hands: &[PlayerHand],
    seed: u64,
) -> Vec<Scoresheet> {
    let ruleset = variant.ruleset().unwrap();
    let registry = variant.registry();
    let rules: Vec<RuleCard> = refs
        .iter()
        .map(|ref_name| {
            ruleset
                .rulecard(ref_name)
                .unwrap_or_else(|| panic!("unknown rule card {ref_name}"))
                .clone()
        })
        .collect();
    let rng = &mut RngState::from_seed(seed);
    ScoringPipeline::new(&registry)
        .tally_scores(hands, &rules, &ruleset.commodities, rng)
        .unwrap()
}

/// Run the scoring pipeline with every rule card of the variant active.
pub fn tally_all(variant: BuiltinRuleset, hands: &[PlayerHand], seed: u64) -> Vec<Scoresheet> {
    let ruleset = variant.ruleset().unwrap();
    let registry = variant.registry();
    let rng = &mut RngState::from_seed(seed);
    ScoringPipeline::new(&registry)
        .tally_scores(hands, &ruleset.rulecards, &ruleset.commodities, rng)
        .unwrap()
}

pub fn assert_rule_applied(
    sheet: &Scoresheet,
    ref_name: &str,
    detail: &str,
    score: Option<i32>,
    times: usize,
) {
    let matching = sheet
        .scores_from_rule()
        .iter()
        .filter(|sfr| sfr.rulecard == ref_name && sfr.detail == detail && sfr.score == score)
        .count();
    assert_eq!(
        times, matching,
        "expected {times} entries from {ref_name} with detail {detail:?} and score {score:?}, \
         actual entries: {:?}",
        sheet.scores_from_rule()
    );
}

pub fn assert_rule_not_applied(sheet: &Scoresheet, ref_name: &str) {
    assert!(
        sheet.scores_from_rule().iter().all(|sfr| sfr.rulecard != ref_name),
        "{ref_name} unexpectedly registered an entry: {:?}",
        sheet.scores_from_rule()
    );
}
