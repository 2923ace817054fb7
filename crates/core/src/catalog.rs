use serde::{Deserialize, Serialize};

/// A distinct commodity card type, carrying its base point value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Commodity {
    pub name: String,
    pub value: i32,
    #[serde(default)]
    pub category: Option<String>,
}

/// A rule card. Cards with a `step` take part in the scoring pipeline in
/// ascending step order; step-less cards are either hand-shape rules applied
/// before all stepped rules, or purely descriptive (no registered behavior).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleCard {
    pub ref_name: String,
    #[serde(default)]
    pub public_name: String,
    pub description: String,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub step: Option<u32>,
    #[serde(default)]
    pub global: bool,
}

/// A complete card set for one game variant: the commodity catalog with base
/// values, the rule cards, and the starting hand sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ruleset {
    pub name: String,
    #[serde(default = "default_starting_rules")]
    pub starting_rules: usize,
    #[serde(default = "default_starting_commodities")]
    pub starting_commodities: usize,
    pub commodities: Vec<Commodity>,
    pub rulecards: Vec<RuleCard>,
}

fn default_starting_rules() -> usize {
    2
}

fn default_starting_commodities() -> usize {
    10
}

impl Ruleset {
    pub fn commodity(&self, name: &str) -> Option<&Commodity> {
        self.commodities.iter().find(|commodity| commodity.name == name)
    }

    pub fn rulecard(&self, ref_name: &str) -> Option<&RuleCard> {
        self.rulecards.iter().find(|card| card.ref_name == ref_name)
    }

    pub fn mandatory_rulecards(&self) -> Vec<&RuleCard> {
        self.rulecards.iter().filter(|card| card.mandatory).collect()
    }
}
