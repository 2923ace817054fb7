//! Scoring behaviors for the Remixed Haggle variant. Colors and basic
//! values: blue 1, white 2, pink 3, yellow 4, green 5.

use bazaar_core::{RngState, RuleCard, RuleRegistry, Scoresheet, ScoringError};
use std::collections::BTreeMap;

pub(crate) fn registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    registry.register_local("RMX04", rmx04);
    registry.register_local("RMX05", rmx05);
    registry.register_global("RMX06", rmx06);
    registry.register_local("RMX07", rmx07);
    registry.register_local("RMX08", rmx08);
    registry.register_global("RMX09", rmx09);
    registry.register_local("RMX10", rmx10);
    registry.register_local("RMX11", rmx11);
    registry.register_global("RMX12", rmx12);
    registry.register_local("RMX13", rmx13);
    registry.register_local("RMX14", rmx14);
    registry.register_local("RMX15", rmx15);
    registry
}

/// More than five yellow and green cards combined: green cards lose their
/// value.
fn rmx04(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let yellows = sheet.nb_scored_cards("Yellow")?;
    let greens = sheet.nb_scored_cards("Green")?;
    let combined = yellows + greens;
    if combined > 5 {
        sheet.set_actual_value("Green", 0)?;
        sheet.register_score_from_rule(
            card,
            format!(
                "Since the combined number of yellow cards ({yellows}) and green cards ({greens}) is {combined} (higher than five), the value of green cards is set to zero."
            ),
            None,
        );
    }
    Ok(())
}

/// A player can score only as many yellow cards as he has pink cards.
fn rmx05(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let pinks = sheet.nb_scored_cards("Pink")?;
    if sheet.nb_scored_cards("Yellow")? > pinks {
        sheet.set_nb_scored_cards("Yellow", pinks)?;
        sheet.register_score_from_rule(
            card,
            format!("Since there are {pinks} pink card(s), only {pinks} yellow card(s) score."),
            None,
        );
    }
    Ok(())
}

/// Five or more blue cards: 10 points are deducted from every other player.
fn rmx06(
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
                    format!("Since {culprit} has {blues} blue cards, 10 points are deducted."),
                    Some(-10),
                );
            }
        }
    }
    Ok(())
}

/// Each set of three yellow cards cancels one penalty inflicted by RMX06.
/// Runs before RMX05 so the protection counts the yellow cards as handed in.
fn rmx07(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let nb_sets = sheet.nb_scored_cards("Yellow")? / 3;
    for _ in 0..nb_sets {
        let canceled = match sheet
            .scores_from_rule_for_mut("RMX06")
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
            "...but a set of three yellow cards cancels that penalty.",
            None,
        );
    }
    Ok(())
}

/// Each set of five different colors gives a bonus of 8 points.
fn rmx08(
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
            "A set of five different colors gives a bonus of 8 points.",
            Some(8),
        );
    }
    Ok(())
}

/// The single player with the most white cards triples their value.
fn rmx09(
    card: &RuleCard,
    sheets: &mut [Scoresheet],
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let mut whites = Vec::new();
    for sheet in sheets.iter() {
        whites.push(sheet.nb_scored_cards("White")?);
    }
    let most = whites.iter().copied().max().unwrap_or(0);
    if most > 0 && whites.iter().filter(|&&count| count == most).count() == 1 {
        if let Some(index) = whites.iter().position(|&count| count == most) {
            let bonus = 2 * most as i32 * sheets[index].actual_value("White")?;
            sheets[index].register_score_from_rule(
                card,
                format!("Having the most white cards ({most} cards) triples their value."),
                Some(bonus),
            );
        }
    }
    Ok(())
}

/// Hand-shape rule, applied before all stepped rules: if the basic values of
/// the handed-in cards total more than 35 points, cards are discarded at
/// random until the total fits.
fn rmx10(card: &RuleCard, sheet: &mut Scoresheet, rng: &mut RngState) -> Result<(), ScoringError> {
    let initial: i32 = sheet
        .scores_from_commodity()
        .iter()
        .map(|sfc| sfc.score())
        .sum();
    if initial <= 35 {
        return Ok(());
    }
    let mut discarded: BTreeMap<String, u32> = BTreeMap::new();
    let mut nb_discarded = 0;
    let mut total = initial;
    while total > 35 {
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
        total -= sheet.actual_value(color)?;
        *discarded.entry(color.to_lowercase()).or_insert(0) += 1;
        nb_discarded += 1;
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
            "Since the total of the basic values of your cards was {initial} points (more than 35), {nb_discarded} have been discarded: {listing}."
        ),
        None,
    );
    Ok(())
}

/// Seven or more cards of one color handed in: 10 points off per such color.
fn rmx11(
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
                "Since {nb_cards} {color} cards where submitted (seven or more), 10 points are deducted."
            ),
            Some(-10),
        );
    }
    Ok(())
}

/// The single player with the most blue cards doubles the value of his pink
/// cards.
fn rmx12(
    card: &RuleCard,
    sheets: &mut [Scoresheet],
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let mut blues = Vec::new();
    for sheet in sheets.iter() {
        blues.push(sheet.nb_scored_cards("Blue")?);
    }
    let most = blues.iter().copied().max().unwrap_or(0);
    if most > 0 && blues.iter().filter(|&&count| count == most).count() == 1 {
        if let Some(index) = blues.iter().position(|&count| count == most) {
            let bonus = sheets[index].nb_scored_cards("Pink")? as i32
                * sheets[index].actual_value("Pink")?;
            sheets[index].register_score_from_rule(
                card,
                format!("Having the most blue cards ({most} cards) doubles the value of pink cards."),
                Some(bonus),
            );
        }
    }
    Ok(())
}

/// Four colors handed in with the same number of cards each and none of the
/// fifth color: the value of the hand is doubled.
fn rmx13(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let mut colors: Vec<(String, u32)> = sheet
        .scores_from_commodity()
        .iter()
        .filter(|sfc| sfc.nb_submitted_cards > 0)
        .map(|sfc| (sfc.name.to_lowercase(), sfc.nb_submitted_cards))
        .collect();
    if colors.len() != 4 {
        return Ok(());
    }
    let reference = colors[0].1;
    if colors.iter().any(|(_, nb_cards)| *nb_cards != reference) {
        return Ok(());
    }
    colors.sort();
    let listing = colors
        .iter()
        .map(|(color, _)| color.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let doubled = sheet.total_score();
    sheet.register_score_from_rule(
        card,
        format!(
            "A set of the same number of cards for 4 colors ({listing}) and no other cards doubles the score."
        ),
        Some(doubled),
    );
    Ok(())
}

/// Each pair of pink cards doubles the value of one yellow card.
fn rmx14(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let nb_pairs = sheet.nb_scored_cards("Pink")? / 2;
    let nb_bonuses = nb_pairs.min(sheet.nb_scored_cards("Yellow")?);
    let yellow_value = sheet.actual_value("Yellow")?;
    for _ in 0..nb_bonuses {
        sheet.register_score_from_rule(
            card,
            "A pair of pink cards doubles the value of one yellow card.",
            Some(yellow_value),
        );
    }
    Ok(())
}

/// Each set of three white cards triples the value of one green card.
fn rmx15(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let nb_sets = sheet.nb_scored_cards("White")? / 3;
    let nb_bonuses = nb_sets.min(sheet.nb_scored_cards("Green")?);
    let green_value = sheet.actual_value("Green")?;
    for _ in 0..nb_bonuses {
        sheet.register_score_from_rule(
            card,
            "A set of three white cards triples the value of one green card.",
            Some(2 * green_value),
        );
    }
    Ok(())
}
