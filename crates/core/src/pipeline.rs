use crate::{Commodity, PlayerHand, RngState, RuleCard, Scoresheet};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("rule card {0} has a scoring step but no registered behavior")]
    UnknownRule(String),
    #[error("commodity {0} is not part of the active ruleset")]
    UnknownCommodity(String),
    #[error("rule card {0} global flag does not match its registered behavior")]
    GlobalFlagMismatch(String),
}

pub type LocalRuleFn =
    Box<dyn Fn(&RuleCard, &mut Scoresheet, &mut RngState) -> Result<(), ScoringError> + Send + Sync>;
pub type GlobalRuleFn = Box<
    dyn Fn(&RuleCard, &mut [Scoresheet], &mut RngState) -> Result<(), ScoringError> + Send + Sync,
>;

/// The two shapes a rule behavior can take: local rules see one scoresheet,
/// global rules see every player's scoresheet at once.
pub enum RuleBehavior {
    Local(LocalRuleFn),
    Global(GlobalRuleFn),
}

/// Explicit map from rule card ref name to its behavior, built once at
/// ruleset-load time.
#[derive(Default)]
pub struct RuleRegistry {
    behaviors: HashMap<String, RuleBehavior>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_local<F>(&mut self, ref_name: impl Into<String>, behavior: F)
    where
        F: Fn(&RuleCard, &mut Scoresheet, &mut RngState) -> Result<(), ScoringError>
            + Send
            + Sync
            + 'static,
    {
        self.behaviors
            .insert(ref_name.into(), RuleBehavior::Local(Box::new(behavior)));
    }

    pub fn register_global<F>(&mut self, ref_name: impl Into<String>, behavior: F)
    where
        F: Fn(&RuleCard, &mut [Scoresheet], &mut RngState) -> Result<(), ScoringError>
            + Send
            + Sync
            + 'static,
    {
        self.behaviors
            .insert(ref_name.into(), RuleBehavior::Global(Box::new(behavior)));
    }

    pub fn get(&self, ref_name: &str) -> Option<&RuleBehavior> {
        self.behaviors.get(ref_name)
    }
}

/// Applies the active rule cards to every player's scoresheet. Step-less
/// behavioral rules (hand-shape rules such as a card cap) run first, then the
/// stepped rules in ascending step order; each rule is invoked exactly once
/// per applicable target. Step-less cards with no behavior are descriptive
/// and skipped.
pub struct ScoringPipeline<'a> {
    registry: &'a RuleRegistry,
}

impl<'a> ScoringPipeline<'a> {
    pub fn new(registry: &'a RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn tally_scores(
        &self,
        hands: &[PlayerHand],
        rules: &[RuleCard],
        catalog: &[Commodity],
        rng: &mut RngState,
    ) -> Result<Vec<Scoresheet>, ScoringError> {
        let mut scoresheets: Vec<Scoresheet> = hands
            .iter()
            .map(|hand| Scoresheet::new(hand, catalog))
            .collect();

        for rule in rules.iter().filter(|rule| rule.step.is_none()) {
            if self.registry.get(&rule.ref_name).is_some() {
                self.apply(rule, &mut scoresheets, rng)?;
            }
        }

        let mut stepped: Vec<&RuleCard> = rules.iter().filter(|rule| rule.step.is_some()).collect();
        stepped.sort_by_key(|rule| rule.step);
        for rule in stepped {
            self.apply(rule, &mut scoresheets, rng)?;
        }

        Ok(scoresheets)
    }

    fn apply(
        &self,
        rule: &RuleCard,
        scoresheets: &mut [Scoresheet],
        rng: &mut RngState,
    ) -> Result<(), ScoringError> {
        match self.registry.get(&rule.ref_name) {
            Some(RuleBehavior::Local(behavior)) => {
                if rule.global {
                    return Err(ScoringError::GlobalFlagMismatch(rule.ref_name.clone()));
                }
                for scoresheet in scoresheets.iter_mut() {
                    behavior(rule, scoresheet, rng)?;
                }
                Ok(())
            }
            Some(RuleBehavior::Global(behavior)) => {
                if !rule.global {
                    return Err(ScoringError::GlobalFlagMismatch(rule.ref_name.clone()));
                }
                behavior(rule, scoresheets, rng)
            }
            None => Err(ScoringError::UnknownRule(rule.ref_name.clone())),
        }
    }
}

/// Leaderboard order: highest total score first.
pub fn rank_by_score(scoresheets: &[Scoresheet]) -> Vec<&Scoresheet> {
    let mut ranked: Vec<&Scoresheet> = scoresheets.iter().collect();
    ranked.sort_by_key(|scoresheet| std::cmp::Reverse(scoresheet.total_score()));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Commodity> {
        vec![Commodity {
            name: "Blue".into(),
            value: 2,
            category: None,
        }]
    }

    fn card(ref_name: &str, step: Option<u32>, global: bool) -> RuleCard {
        RuleCard {
            ref_name: ref_name.into(),
            public_name: String::new(),
            description: String::new(),
            mandatory: false,
            step,
            global,
        }
    }

    fn hands() -> Vec<PlayerHand> {
        vec![
            PlayerHand::new("p1").with_commodity("Blue", 2),
            PlayerHand::new("p2").with_commodity("Blue", 1),
        ]
    }

    #[test]
    fn local_rules_run_once_per_scoresheet_in_step_order() {
        let mut registry = RuleRegistry::new();
        registry.register_local("TST02", |rule, scoresheet, _rng| {
            scoresheet.register_score_from_rule(rule, "second", Some(1));
            Ok(())
        });
        registry.register_local("TST01", |rule, scoresheet, _rng| {
            scoresheet.register_score_from_rule(rule, "first", Some(1));
            Ok(())
        });
        let rules = vec![card("TST02", Some(20), false), card("TST01", Some(10), false)];
        let rng = &mut RngState::from_seed(7);
        let scoresheets = ScoringPipeline::new(&registry)
            .tally_scores(&hands(), &rules, &catalog(), rng)
            .unwrap();
        for scoresheet in &scoresheets {
            let entries: Vec<&str> = scoresheet
                .scores_from_rule()
                .iter()
                .map(|sfr| sfr.detail.as_str())
                .collect();
            assert_eq!(vec!["first", "second"], entries);
        }
    }

    #[test]
    fn global_rules_see_every_scoresheet_at_once() {
        let mut registry = RuleRegistry::new();
        registry.register_global("TST01", |rule, scoresheets, _rng| {
            let richest = scoresheets
                .iter()
                .map(|s| s.nb_scored_cards("Blue"))
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .max()
                .unwrap_or(0);
            for scoresheet in scoresheets.iter_mut() {
                if scoresheet.nb_scored_cards("Blue")? < richest {
                    scoresheet.register_score_from_rule(rule, "behind", Some(-1));
                }
            }
            Ok(())
        });
        let rules = vec![card("TST01", Some(10), true)];
        let rng = &mut RngState::from_seed(7);
        let scoresheets = ScoringPipeline::new(&registry)
            .tally_scores(&hands(), &rules, &catalog(), rng)
            .unwrap();
        assert!(scoresheets[0].scores_from_rule().is_empty());
        assert_eq!(1, scoresheets[1].scores_from_rule().len());
    }

    #[test]
    fn later_rule_cancels_an_earlier_rules_entry() {
        let mut registry = RuleRegistry::new();
        registry.register_local("TST01", |rule, scoresheet, _rng| {
            scoresheet.register_score_from_rule(rule, "10 points are deducted.", Some(-10));
            Ok(())
        });
        registry.register_local("TST02", |rule, scoresheet, _rng| {
            let canceled = {
                match scoresheet
                    .scores_from_rule_for_mut("TST01")
                    .find(|entry| entry.score.is_some())
                {
                    Some(entry) => {
                        let detail = entry.detail.replace(
                            "are deducted.",
                            "should have been deducted...",
                        );
                        entry.neutralize(detail);
                        true
                    }
                    None => false,
                }
            };
            if canceled {
                scoresheet.register_score_from_rule(rule, "...but the penalty is canceled.", None);
            }
            Ok(())
        });
        let rules = vec![card("TST01", Some(10), false), card("TST02", Some(20), false)];
        let rng = &mut RngState::from_seed(7);
        let scoresheets = ScoringPipeline::new(&registry)
            .tally_scores(&hands(), &rules, &catalog(), rng)
            .unwrap();
        let entries = scoresheets[0].scores_from_rule();
        assert_eq!(2, entries.len());
        assert_eq!(None, entries[0].score);
        assert_eq!("10 points should have been deducted...", entries[0].detail);
        assert_eq!("TST02", entries[1].rulecard);
        assert_eq!(4, scoresheets[0].total_score());
    }

    #[test]
    fn stepped_rule_without_behavior_fails_loudly() {
        let registry = RuleRegistry::new();
        let rules = vec![card("TST01", Some(10), false)];
        let rng = &mut RngState::from_seed(7);
        let result = ScoringPipeline::new(&registry).tally_scores(&hands(), &rules, &catalog(), rng);
        assert_eq!(Err(ScoringError::UnknownRule("TST01".into())), result);
    }

    #[test]
    fn descriptive_stepless_card_is_skipped() {
        let registry = RuleRegistry::new();
        let rules = vec![card("TST01", None, false)];
        let rng = &mut RngState::from_seed(7);
        let scoresheets = ScoringPipeline::new(&registry)
            .tally_scores(&hands(), &rules, &catalog(), rng)
            .unwrap();
        assert_eq!(4, scoresheets[0].total_score());
    }

    #[test]
    fn global_flag_must_match_the_registered_behavior() {
        let mut registry = RuleRegistry::new();
        registry.register_local("TST01", |_rule, _scoresheet, _rng| Ok(()));
        let rules = vec![card("TST01", Some(10), true)];
        let rng = &mut RngState::from_seed(7);
        let result = ScoringPipeline::new(&registry).tally_scores(&hands(), &rules, &catalog(), rng);
        assert_eq!(Err(ScoringError::GlobalFlagMismatch("TST01".into())), result);
    }

    #[test]
    fn rank_by_score_orders_descending() {
        let registry = RuleRegistry::new();
        let rng = &mut RngState::from_seed(7);
        let scoresheets = ScoringPipeline::new(&registry)
            .tally_scores(&hands(), &[], &catalog(), rng)
            .unwrap();
        let ranked = rank_by_score(&scoresheets);
        assert_eq!("p1", ranked[0].player());
        assert_eq!("p2", ranked[1].player());
    }
}
