use crate::{Commodity, RuleCard, ScoringError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A player's submitted commodity counts, the input snapshot for one scoring
/// run. Rule cards in the hand never influence the score directly, so only
/// commodities appear here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerHand {
    pub player: String,
    pub commodities: HashMap<String, u32>,
}

impl PlayerHand {
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            commodities: HashMap::new(),
        }
    }

    pub fn with_commodity(mut self, name: impl Into<String>, nb_cards: u32) -> Self {
        self.commodities.insert(name.into(), nb_cards);
        self
    }
}

/// One scoring row per (player, commodity type). The submitted count is
/// frozen at creation; rules mutate the scored count and the actual value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreFromCommodity {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub nb_submitted_cards: u32,
    pub nb_scored_cards: u32,
    pub actual_value: i32,
}

impl ScoreFromCommodity {
    pub fn score(&self) -> i32 {
        self.nb_scored_cards as i32 * self.actual_value
    }
}

/// One score adjustment registered by a rule. A None score documents an
/// effect with no direct point value (a canceled penalty, a tolerance
/// override). `is_random` marks entries produced by a randomized discard,
/// so consumers can warn that recomputing may not reproduce the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreFromRule {
    pub rulecard: String,
    pub detail: String,
    pub score: Option<i32>,
    #[serde(default)]
    pub is_random: bool,
}

impl ScoreFromRule {
    /// Void this entry: drop its score and replace the detail text so the
    /// reversal stays visible in the score explanation.
    pub fn neutralize(&mut self, detail: impl Into<String>) {
        self.score = None;
        self.detail = detail.into();
    }
}

/// Per-player scoring ledger for one run. Holds one commodity row for every
/// catalog entry (zero-filled when the hand has none, which hand-shape rules
/// rely on) and the ordered log of rule entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoresheet {
    player: String,
    scores_from_commodity: Vec<ScoreFromCommodity>,
    scores_from_rule: Vec<ScoreFromRule>,
}

impl Scoresheet {
    pub fn new(hand: &PlayerHand, catalog: &[Commodity]) -> Self {
        let scores_from_commodity = catalog
            .iter()
            .map(|commodity| {
                let nb_cards = hand.commodities.get(&commodity.name).copied().unwrap_or(0);
                ScoreFromCommodity {
                    name: commodity.name.clone(),
                    category: commodity.category.clone(),
                    nb_submitted_cards: nb_cards,
                    nb_scored_cards: nb_cards,
                    actual_value: commodity.value,
                }
            })
            .collect();
        Self {
            player: hand.player.clone(),
            scores_from_commodity,
            scores_from_rule: Vec::new(),
        }
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn scores_from_commodity(&self) -> &[ScoreFromCommodity] {
        &self.scores_from_commodity
    }

    pub fn scores_from_rule(&self) -> &[ScoreFromRule] {
        &self.scores_from_rule
    }

    pub fn score_for_commodity(&self, name: &str) -> Result<&ScoreFromCommodity, ScoringError> {
        self.scores_from_commodity
            .iter()
            .find(|sfc| sfc.name == name)
            .ok_or_else(|| ScoringError::UnknownCommodity(name.to_string()))
    }

    fn score_for_commodity_mut(
        &mut self,
        name: &str,
    ) -> Result<&mut ScoreFromCommodity, ScoringError> {
        self.scores_from_commodity
            .iter_mut()
            .find(|sfc| sfc.name == name)
            .ok_or_else(|| ScoringError::UnknownCommodity(name.to_string()))
    }

    pub fn nb_submitted_cards(&self, name: &str) -> Result<u32, ScoringError> {
        Ok(self.score_for_commodity(name)?.nb_submitted_cards)
    }

    pub fn nb_scored_cards(&self, name: &str) -> Result<u32, ScoringError> {
        Ok(self.score_for_commodity(name)?.nb_scored_cards)
    }

    pub fn set_nb_scored_cards(&mut self, name: &str, nb_cards: u32) -> Result<(), ScoringError> {
        self.score_for_commodity_mut(name)?.nb_scored_cards = nb_cards;
        Ok(())
    }

    pub fn actual_value(&self, name: &str) -> Result<i32, ScoringError> {
        Ok(self.score_for_commodity(name)?.actual_value)
    }

    pub fn set_actual_value(&mut self, name: &str, value: i32) -> Result<(), ScoringError> {
        self.score_for_commodity_mut(name)?.actual_value = value;
        Ok(())
    }

    pub fn register_score_from_rule(
        &mut self,
        rulecard: &RuleCard,
        detail: impl Into<String>,
        score: Option<i32>,
    ) {
        self.scores_from_rule.push(ScoreFromRule {
            rulecard: rulecard.ref_name.clone(),
            detail: detail.into(),
            score,
            is_random: false,
        });
    }

    pub fn register_random_score_from_rule(
        &mut self,
        rulecard: &RuleCard,
        detail: impl Into<String>,
        score: Option<i32>,
    ) {
        self.scores_from_rule.push(ScoreFromRule {
            rulecard: rulecard.ref_name.clone(),
            detail: detail.into(),
            score,
            is_random: true,
        });
    }

    /// Mutable view over the entries a given rule has registered, in
    /// registration order. This is the whole cancellation surface: a later
    /// rule finds an earlier rule's entries here and calls `neutralize`.
    pub fn scores_from_rule_for_mut(
        &mut self,
        ref_name: &str,
    ) -> impl Iterator<Item = &mut ScoreFromRule> {
        let ref_name = ref_name.to_string();
        self.scores_from_rule
            .iter_mut()
            .filter(move |sfr| sfr.rulecard == ref_name)
    }

    /// Recomputed on demand: rules keep mutating the commodity rows after
    /// entries have been registered, so caching here would go stale.
    pub fn total_score(&self) -> i32 {
        let commodities: i32 = self.scores_from_commodity.iter().map(|sfc| sfc.score()).sum();
        let rules: i32 = self
            .scores_from_rule
            .iter()
            .map(|sfr| sfr.score.unwrap_or(0))
            .sum();
        commodities + rules
    }
}
