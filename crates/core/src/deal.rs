use crate::{
    Deck, PlayerHand, RngState, RuleCard, RuleRegistry, Ruleset, ScoringError, ScoringPipeline,
};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DealError {
    /// The catalog has no base cards to print a deck from. Fatal: no reshuffle
    /// can fix an empty catalog.
    #[error("cannot deal from an empty card catalog")]
    EmptyCatalog,
    /// A dealer variant could not satisfy its placement policy. Recoverable:
    /// the whole dealing session restarts with a fresh shuffle.
    #[error("no card in the deck can enter the hand without breaking the dealing policy")]
    InvalidDealing,
    /// The provisional score spread between players was too wide. Same
    /// restart path as InvalidDealing.
    #[error("score spread of {spread} between players exceeds the allowed {threshold}")]
    UnbalancedDeal { spread: i32, threshold: i32 },
    /// The retry budget ran out. Fatal: the caller must abort the operation
    /// that triggered the deal rather than commit an unfair game.
    #[error("could not produce an acceptable deal after {attempts} attempts")]
    DealingFailure { attempts: u32 },
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Pulls one card from the deck into a hand, enforcing the acceptance policy
/// of its card family.
pub trait CardDealer<T> {
    fn add_a_card_to_hand(&self, hand: &mut Vec<T>, deck: &mut Deck<T>) -> Result<(), DealError>;
}

/// Unique-per-hand variant, used for rule cards: scans the deck from the end
/// for the first card the hand does not already hold. The deck must already
/// be shuffled when the dealer runs.
pub struct RuleCardDealer;

impl<T: Clone + PartialEq> CardDealer<T> for RuleCardDealer {
    fn add_a_card_to_hand(&self, hand: &mut Vec<T>, deck: &mut Deck<T>) -> Result<(), DealError> {
        for index in (0..deck.len()).rev() {
            if !hand.contains(&deck.cards[index]) {
                hand.push(deck.cards.remove(index));
                return Ok(());
            }
        }
        Err(DealError::InvalidDealing)
    }
}

/// Duplicates-allowed variant, used for commodities: always pops the last
/// card, no validity check.
pub struct CommodityCardDealer;

impl<T: Clone> CardDealer<T> for CommodityCardDealer {
    fn add_a_card_to_hand(&self, hand: &mut Vec<T>, deck: &mut Deck<T>) -> Result<(), DealError> {
        let card = deck.pop().ok_or(DealError::InvalidDealing)?;
        hand.push(card);
        Ok(())
    }
}

/// Deal `nb_cards_per_player` cards to each player from shuffled printings of
/// the base set: `floor(k * P / m)` printings up front, then one extra
/// printing whenever the deck runs dry. Across one call every card type is
/// dealt either `copies` or `copies + 1` times, never more.
pub fn dispatch_cards<T: Clone>(
    nb_players: usize,
    nb_cards_per_player: usize,
    cards: &[T],
    dealer: &dyn CardDealer<T>,
    rng: &mut RngState,
) -> Result<Vec<Vec<T>>, DealError> {
    if cards.is_empty() {
        return Err(DealError::EmptyCatalog);
    }
    let copies = nb_cards_per_player * nb_players / cards.len();
    let mut deck = Deck::printings(cards, copies, rng);
    let mut hands = vec![Vec::with_capacity(nb_cards_per_player); nb_players];
    for _round in 0..nb_cards_per_player {
        for hand in hands.iter_mut() {
            if deck.is_empty() {
                deck.refill(cards, rng);
            }
            dealer.add_a_card_to_hand(hand, &mut deck)?;
        }
    }
    Ok(hands)
}

#[derive(Debug, Clone, Copy)]
pub struct DealingConfig {
    /// Widest acceptable gap between the best and worst provisional score.
    pub spread_threshold: i32,
    /// How many times the whole session may restart before giving up.
    pub max_attempts: u32,
}

impl Default for DealingConfig {
    fn default() -> Self {
        Self {
            spread_threshold: 25,
            max_attempts: 20,
        }
    }
}

/// The committed output of one dealing session, in player order.
#[derive(Debug, Clone)]
pub struct DealtHands {
    pub rulecards: Vec<Vec<RuleCard>>,
    pub commodities: Vec<HashMap<String, u32>>,
}

/// Orchestrates one full deal: rule cards, then commodities, then a
/// provisional scoring run over the commodity hands. An InvalidDealing from
/// a dealer or an unacceptable score spread restarts everything from scratch,
/// up to the configured attempt budget.
pub struct DealingSession<'a> {
    ruleset: &'a Ruleset,
    active_rules: &'a [RuleCard],
    registry: &'a RuleRegistry,
    config: DealingConfig,
    rule_dealer: Box<dyn CardDealer<RuleCard>>,
}

impl<'a> DealingSession<'a> {
    pub fn new(ruleset: &'a Ruleset, active_rules: &'a [RuleCard], registry: &'a RuleRegistry) -> Self {
        Self {
            ruleset,
            active_rules,
            registry,
            config: DealingConfig::default(),
            rule_dealer: Box::new(RuleCardDealer),
        }
    }

    pub fn with_config(mut self, config: DealingConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap the rule-card dealer, mainly to force dealing failures in tests.
    pub fn with_rule_dealer(mut self, dealer: Box<dyn CardDealer<RuleCard>>) -> Self {
        self.rule_dealer = dealer;
        self
    }

    pub fn deal(&self, players: &[String], rng: &mut RngState) -> Result<DealtHands, DealError> {
        let mut attempts = 0;
        while attempts < self.config.max_attempts {
            attempts += 1;
            match self.attempt(players, rng) {
                Ok(hands) => return Ok(hands),
                Err(DealError::InvalidDealing) | Err(DealError::UnbalancedDeal { .. }) => continue,
                Err(fatal) => return Err(fatal),
            }
        }
        Err(DealError::DealingFailure { attempts })
    }

    fn attempt(&self, players: &[String], rng: &mut RngState) -> Result<DealtHands, DealError> {
        let rulecards = dispatch_cards(
            players.len(),
            self.ruleset.starting_rules,
            self.active_rules,
            self.rule_dealer.as_ref(),
            rng,
        )?;
        let commodity_hands = dispatch_cards(
            players.len(),
            self.ruleset.starting_commodities,
            &self.ruleset.commodities,
            &CommodityCardDealer,
            rng,
        )?;
        let commodities: Vec<HashMap<String, u32>> = commodity_hands
            .iter()
            .map(|hand| {
                let mut counts = HashMap::new();
                for commodity in hand {
                    *counts.entry(commodity.name.clone()).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        // Rules do not affect the starting score, so the provisional run
        // looks at the dealt commodities only.
        let hands: Vec<PlayerHand> = players
            .iter()
            .zip(&commodities)
            .map(|(player, counts)| PlayerHand {
                player: player.clone(),
                commodities: counts.clone(),
            })
            .collect();
        let scoresheets = ScoringPipeline::new(self.registry).tally_scores(
            &hands,
            self.active_rules,
            &self.ruleset.commodities,
            rng,
        )?;
        let totals: Vec<i32> = scoresheets.iter().map(|sheet| sheet.total_score()).collect();
        let best = totals.iter().copied().max().unwrap_or(0);
        let worst = totals.iter().copied().min().unwrap_or(0);
        let spread = best - worst;
        if spread > self.config.spread_threshold {
            return Err(DealError::UnbalancedDeal {
                spread,
                threshold: self.config.spread_threshold,
            });
        }

        Ok(DealtHands {
            rulecards,
            commodities,
        })
    }
}
