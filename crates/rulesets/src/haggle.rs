//! Scoring behaviors for the Original Haggle variant. Colors and basic
//! values: yellow 1, blue 2, red 3, orange 4, white 5.

use bazaar_core::{RngState, RuleCard, RuleRegistry, Scoresheet, ScoringError};
use std::collections::BTreeMap;

pub(crate) fn registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    registry.register_local("HAG04", hag04);
    registry.register_local("HAG05", hag05);
    registry.register_global("HAG06", hag06);
    registry.register_local("HAG07", hag07);
    registry.register_global("HAG08", hag08);
    registry.register_local("HAG09", hag09);
    registry.register_local("HAG10", hag10);
    registry.register_local("HAG11", hag11);
    registry.register_global("HAG12", hag12);
    registry.register_local("HAG13", hag13);
    registry.register_local("HAG14", hag14);
    registry.register_local("HAG15", hag15);
    registry
}

/// More than three white cards: all white cards lose their value.
fn hag04(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let whites = sheet.nb_scored_cards("White")?;
    if whites > 3 {
        sheet.set_actual_value("White", 0)?;
        sheet.register_score_from_rule(
            card,
            format!(
                "(4) Since there are {whites} white cards (more than three), their value is set to zero."
            ),
            None,
        );
    }
    Ok(())
}

/// A player can score only as many orange cards as he has blue cards.
fn hag05(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let blues = sheet.nb_scored_cards("Blue")?;
    if sheet.nb_scored_cards("Orange")? > blues {
        sheet.set_nb_scored_cards("Orange", blues)?;
        sheet.register_score_from_rule(
            card,
            format!("(5) Since there are {blues} blue card(s), only {blues} orange card(s) score."),
            None,
        );
    }
    Ok(())
}

/// Five or more blue cards: 10 points are deducted from every other player.
fn hag06(
    card: &RuleCard,
    sheets: &mut [Scoresheet],
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let mut culprits = Vec::new();
    for sheet in sheets.iter() {
        let blues = sheet.nb_scored_cards("Blue")?;
        if blues >= 5 {
            culprits.push((sheet.player().to_string(), blues));
        }
    }
    for (culprit, blues) in &culprits {
        for sheet in sheets.iter_mut() {
            if sheet.player() != culprit {
                sheet.register_score_from_rule(
                    card,
                    format!("(6) Since {culprit} has {blues} blue cards, 10 points are deducted."),
                    Some(-10),
                );
            }
        }
    }
    Ok(())
}

/// Each set of three red cards cancels one penalty inflicted by HAG06.
fn hag07(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let nb_sets = sheet.nb_scored_cards("Red")? / 3;
    for _ in 0..nb_sets {
        let canceled = match sheet
            .scores_from_rule_for_mut("HAG06")
            .find(|entry| entry.score.is_some())
        {
            Some(entry) => {
                let detail = entry
                    .detail
                    .replace("are deducted.", "should have been deducted...");
                entry.neutralize(detail);
                true
            }
            None => false,
        };
        if !canceled {
            break;
        }
        sheet.register_score_from_rule(
            card,
            "(7) ...but a set of three red cards cancels that penalty.",
            None,
        );
    }
    Ok(())
}

/// The single player with the most yellow cards gets that number squared as a
/// bonus. On a tie the bonus goes to the next highest untied count instead.
fn hag08(
    card: &RuleCard,
    sheets: &mut [Scoresheet],
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let mut yellows = Vec::new();
    for sheet in sheets.iter() {
        yellows.push(sheet.nb_scored_cards("Yellow")?);
    }
    let most = yellows.iter().copied().max().unwrap_or(0);
    for winning in (2..=most).rev() {
        if yellows.iter().filter(|&&count| count == winning).count() == 1 {
            if let Some(index) = yellows.iter().position(|&count| count == winning) {
                sheets[index].register_score_from_rule(
                    card,
                    format!(
                        "(8) Having the most yellow cards ({winning} cards) gives a bonus of {winning}x{winning} points."
                    ),
                    Some((winning * winning) as i32),
                );
            }
            break;
        }
    }
    Ok(())
}

/// Seven or more cards of one color handed in: 10 points off per such color.
fn hag09(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let offenders: Vec<(String, u32)> = sheet
        .scores_from_commodity()
        .iter()
        .filter(|sfc| sfc.nb_submitted_cards >= 7)
        .map(|sfc| (sfc.name.to_lowercase(), sfc.nb_submitted_cards))
        .collect();
    for (color, nb_cards) in offenders {
        sheet.register_score_from_rule(
            card,
            format!(
                "(9) Since {nb_cards} {color} cards where submitted (seven or more), 10 points are deducted."
            ),
            Some(-10),
        );
    }
    Ok(())
}

/// Each set of five different colors gives a bonus of 10 points.
fn hag10(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    if sheet.scores_from_commodity().len() < 5 {
        return Ok(());
    }
    let nb_sets = sheet
        .scores_from_commodity()
        .iter()
        .map(|sfc| sfc.nb_scored_cards)
        .min()
        .unwrap_or(0);
    for _ in 0..nb_sets {
        sheet.register_score_from_rule(
            card,
            "(10) A set of five different colors gives a bonus of 10 points.",
            Some(10),
        );
    }
    Ok(())
}

/// A pyramid (4 + 3 + 2 + 1 cards of four different colors) handed in with no
/// other cards doubles the value of the hand.
fn hag11(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let mut layers: Vec<(String, u32)> = sheet
        .scores_from_commodity()
        .iter()
        .map(|sfc| (sfc.name.to_lowercase(), sfc.nb_submitted_cards))
        .collect();
    let mut counts: Vec<u32> = layers.iter().map(|(_, nb_cards)| *nb_cards).collect();
    counts.sort_unstable();
    if counts != [0, 1, 2, 3, 4] {
        return Ok(());
    }
    layers.sort_by(|a, b| b.1.cmp(&a.1));
    let listing = layers
        .iter()
        .filter(|(_, nb_cards)| *nb_cards > 0)
        .map(|(color, nb_cards)| {
            format!("{nb_cards} {color} card{}", if *nb_cards > 1 { "s" } else { "" })
        })
        .collect::<Vec<_>>()
        .join(", ");
    let doubled = sheet.total_score();
    sheet.register_score_from_rule(
        card,
        format!("(11) A pyramid of {listing} and no other card doubles the score."),
        Some(doubled),
    );
    Ok(())
}

/// The single player with the most red cards doubles their value.
fn hag12(
    card: &RuleCard,
    sheets: &mut [Scoresheet],
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let mut reds = Vec::new();
    for sheet in sheets.iter() {
        reds.push(sheet.nb_scored_cards("Red")?);
    }
    let most = reds.iter().copied().max().unwrap_or(0);
    if most > 0 && reds.iter().filter(|&&count| count == most).count() == 1 {
        if let Some(index) = reds.iter().position(|&count| count == most) {
            let bonus = most as i32 * sheets[index].actual_value("Red")?;
            sheets[index].register_score_from_rule(
                card,
                format!("(12) Having the most red cards ({most} cards) doubles their value."),
                Some(bonus),
            );
        }
    }
    Ok(())
}

/// Each pair of yellow cards doubles the value of one white card.
fn hag13(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let nb_pairs = sheet.nb_scored_cards("Yellow")? / 2;
    let nb_bonuses = nb_pairs.min(sheet.nb_scored_cards("White")?);
    let white_value = sheet.actual_value("White")?;
    for _ in 0..nb_bonuses {
        sheet.register_score_from_rule(
            card,
            "(13) A pair of yellow cards doubles the value of one white card.",
            Some(white_value),
        );
    }
    Ok(())
}

/// Each set of three blue cards quadruples the value of one orange card.
fn hag14(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let nb_sets = sheet.nb_scored_cards("Blue")? / 3;
    let nb_bonuses = nb_sets.min(sheet.nb_scored_cards("Orange")?);
    let orange_value = sheet.actual_value("Orange")?;
    for _ in 0..nb_bonuses {
        sheet.register_score_from_rule(
            card,
            "(14) A set of three blue cards quadruples the value of one orange card.",
            Some(3 * orange_value),
        );
    }
    Ok(())
}

/// Hand-shape rule, applied before all stepped rules: at most thirteen cards
/// can be scored, the excess is discarded at random.
fn hag15(card: &RuleCard, sheet: &mut Scoresheet, rng: &mut RngState) -> Result<(), ScoringError> {
    let total: u32 = sheet
        .scores_from_commodity()
        .iter()
        .map(|sfc| sfc.nb_scored_cards)
        .sum();
    if total <= 13 {
        return Ok(());
    }
    let mut discarded: BTreeMap<String, u32> = BTreeMap::new();
    let mut remaining = total;
    while remaining > 13 {
        let eligible: Vec<String> = sheet
            .scores_from_commodity()
            .iter()
            .filter(|sfc| sfc.nb_scored_cards > 0)
            .map(|sfc| sfc.name.clone())
            .collect();
        let index = match rng.pick_index(eligible.len()) {
            Some(index) => index,
            None => break,
        };
        let color = &eligible[index];
        let scored = sheet.nb_scored_cards(color)?;
        sheet.set_nb_scored_cards(color, scored - 1)?;
        *discarded.entry(color.to_lowercase()).or_insert(0) += 1;
        remaining -= 1;
    }
    let listing = discarded
        .iter()
        .map(|(color, nb_cards)| {
            format!("{nb_cards} {color} card{}", if *nb_cards > 1 { "s" } else { "" })
        })
        .collect::<Vec<_>>()
        .join(", ");
    sheet.register_random_score_from_rule(
        card,
        format!(
            "(15) Since {total} cards had to be scored, {} have been discarded: {listing}.",
            total - 13
        ),
        None,
    );
    Ok(())
}
