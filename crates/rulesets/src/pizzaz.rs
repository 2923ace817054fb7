//! Scoring behaviors for the Pizzaz! variant, where toppings carry a
//! category (Cheese, Meat, Fish & Seafood, Vegetable or Fruit).

use bazaar_core::{RngState, RuleCard, RuleRegistry, Scoresheet, ScoringError};
use std::collections::BTreeMap;

pub(crate) fn registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    registry.register_local("PIZ04", piz04);
    registry.register_local("PIZ06", piz06);
    registry.register_local("PIZ07", piz07);
    registry.register_local("PIZ08", piz08);
    registry.register_local("PIZ09", piz09);
    registry.register_local("PIZ10", piz10);
    registry.register_local("PIZ11", piz11);
    registry.register_global("PIZ12", piz12);
    registry
}

fn in_category(sheet: &Scoresheet, category: &str) -> u32 {
    sheet
        .scores_from_commodity()
        .iter()
        .filter(|sfc| {
            sfc.category
                .as_deref()
                .is_some_and(|value| value.eq_ignore_ascii_case(category))
        })
        .map(|sfc| sfc.nb_scored_cards)
        .sum()
}

/// A pizza with no cheese topping earns a bonus of 6 points.
fn piz04(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let nb_cheeses = sheet
        .scores_from_commodity()
        .iter()
        .filter(|sfc| sfc.nb_submitted_cards > 0)
        .filter(|sfc| {
            sfc.category
                .as_deref()
                .is_some_and(|value| value.eq_ignore_ascii_case("cheese"))
        })
        .count();
    if nb_cheeses == 0 {
        sheet.register_score_from_rule(
            card,
            "A pizza with no cheese gives you a bonus of 6 points.",
            Some(6),
        );
    }
    Ok(())
}

/// More than 10 toppings: each extra one removes 5 points.
fn piz06(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let total: u32 = sheet
        .scores_from_commodity()
        .iter()
        .map(|sfc| sfc.nb_scored_cards)
        .sum();
    if total > 10 {
        let removed = (total - 10) as i32 * 5;
        sheet.register_score_from_rule(
            card,
            format!("Since your pizza had {total} toppings (more than 10), you lose {removed} points."),
            Some(-removed),
        );
    }
    Ok(())
}

/// More Vegetable cards than Meat, Fish & Seafood and Cheese combined earns
/// a bonus of 12 points.
fn piz07(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let vegetables = in_category(sheet, "vegetable");
    let proteins = in_category(sheet, "meat")
        + in_category(sheet, "fish & seafood")
        + in_category(sheet, "cheese");
    if vegetables > proteins {
        sheet.register_score_from_rule(
            card,
            "There is more Vegetable cards in your pizza than Meat, Fish & Seafood and Cheese cards combined. You earn a bonus of 12 points.",
            Some(12),
        );
    }
    Ok(())
}

const DISLIKED_TOPPINGS: [&str; 3] = ["Peppers", "Pineapple", "Ham"];

/// Peppers, pineapple and ham never score.
fn piz08(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let mut nb_disliked = 0;
    for topping in DISLIKED_TOPPINGS {
        nb_disliked += sheet.nb_scored_cards(topping)?;
    }
    if nb_disliked > 0 {
        sheet.register_score_from_rule(
            card,
            "Don Peppino absolutely dislikes ham, pineapple and peppers. Those cards give you no points.",
            None,
        );
    }
    for topping in DISLIKED_TOPPINGS {
        sheet.set_nb_scored_cards(topping, 0)?;
    }
    Ok(())
}

/// Exactly one garlic card lifts the PIZ08 exclusion.
fn piz09(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    if sheet.nb_scored_cards("Garlic")? != 1 {
        return Ok(());
    }
    let mut tolerated = false;
    if let Some(entry) = sheet.scores_from_rule_for_mut("PIZ08").next() {
        entry.detail = entry
            .detail
            .replace("give you no points.", "should give you no points...");
        tolerated = true;
    }
    if tolerated {
        sheet.register_score_from_rule(
            card,
            "...but since your pizza contains one garlic, he tolerates them. Phew!",
            None,
        );
        for topping in DISLIKED_TOPPINGS {
            let submitted = sheet.nb_submitted_cards(topping)?;
            sheet.set_nb_scored_cards(topping, submitted)?;
        }
    }
    Ok(())
}

/// Each topping with a double ration (two cards or more) is worth 4 points
/// more.
fn piz10(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let doubled: Vec<String> = sheet
        .scores_from_commodity()
        .iter()
        .filter(|sfc| sfc.nb_scored_cards > 1)
        .map(|sfc| sfc.name.clone())
        .collect();
    for topping in doubled {
        sheet.register_score_from_rule(
            card,
            format!("A double ration of {topping} gives you a bonus of 4 points."),
            Some(4),
        );
    }
    Ok(())
}

/// At least three different toppings starting with the same letter earn 8
/// points, once per such letter.
fn piz11(
    card: &RuleCard,
    sheet: &mut Scoresheet,
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let mut letters: BTreeMap<char, Vec<String>> = BTreeMap::new();
    for sfc in sheet.scores_from_commodity() {
        if sfc.nb_submitted_cards == 0 {
            continue;
        }
        if let Some(capital) = sfc.name.chars().next() {
            letters
                .entry(capital.to_ascii_uppercase())
                .or_default()
                .push(sfc.name.clone());
        }
    }
    for (capital, mut toppings) in letters {
        if toppings.len() >= 3 {
            toppings.sort();
            sheet.register_score_from_rule(
                card,
                format!(
                    "{} different toppings starting by the letter {capital} ({}) give you a bonus of 8 points.",
                    toppings.len(),
                    toppings.join(", ")
                ),
                Some(8),
            );
        }
    }
    Ok(())
}

/// The cook with the smallest number of different toppings earns 12 points,
/// every tied cook included. Counted on submitted cards so that toppings
/// excluded by other rules do not help win here.
fn piz12(
    card: &RuleCard,
    sheets: &mut [Scoresheet],
    _rng: &mut RngState,
) -> Result<(), ScoringError> {
    let toppings_count: Vec<usize> = sheets
        .iter()
        .map(|sheet| {
            sheet
                .scores_from_commodity()
                .iter()
                .filter(|sfc| sfc.nb_submitted_cards > 0)
                .count()
        })
        .collect();
    let smallest = match toppings_count.iter().copied().min() {
        Some(smallest) => smallest,
        None => return Ok(()),
    };
    for (sheet, nb_toppings) in sheets.iter_mut().zip(toppings_count) {
        if nb_toppings == smallest {
            sheet.register_score_from_rule(
                card,
                format!(
                    "You have the smallest number of different toppings ({smallest} toppings) of all the players. You earn a bonus of 12 points."
                ),
                Some(12),
            );
        }
    }
    Ok(())
}
