mod common;

use bazaar_rulesets::BuiltinRuleset::Pizzaz;
use common::{assert_rule_applied, assert_rule_not_applied, hand, tally};

#[test]
fn piz04_a_pizza_with_no_cheese_earns_six_points() {
    // Ham 3 pts, Mushrooms 2 pts, Parmesan 3 pts.
    let sheets = tally(
        Pizzaz,
        &["PIZ04"],
        &[hand("p1", &[("Ham", 1), ("Mushrooms", 3), ("Parmesan", 1)])],
        1,
    );
    assert_eq!(12, sheets[0].total_score());
    assert_rule_not_applied(&sheets[0], "PIZ04");

    let sheets = tally(
        Pizzaz,
        &["PIZ04"],
        &[hand("p1", &[("Ham", 1), ("Mushrooms", 3)])],
        1,
    );
    assert_eq!(15, sheets[0].total_score());
    assert_rule_applied(
        &sheets[0],
        "PIZ04",
        "A pizza with no cheese gives you a bonus of 6 points.",
        Some(6),
        1,
    );
}

#[test]
fn piz06_each_topping_past_ten_removes_five_points() {
    let sheets = tally(
        Pizzaz,
        &["PIZ06"],
        &[hand("p1", &[("Mushrooms", 5), ("Olives", 5)])],
        1,
    );
    assert_eq!(20, sheets[0].total_score());
    assert_rule_not_applied(&sheets[0], "PIZ06");

    let sheets = tally(
        Pizzaz,
        &["PIZ06"],
        &[hand("p1", &[("Mushrooms", 6), ("Olives", 6)])],
        1,
    );
    assert_eq!(24 - 10, sheets[0].total_score());
    assert_rule_applied(
        &sheets[0],
        "PIZ06",
        "Since your pizza had 12 toppings (more than 10), you lose 10 points.",
        Some(-10),
        1,
    );
}

#[test]
fn piz07_a_mostly_vegetable_pizza_earns_twelve_points() {
    let sheets = tally(
        Pizzaz,
        &["PIZ07"],
        &[hand("p1", &[("Ham", 2), ("Mushrooms", 1)])],
        1,
    );
    assert_eq!(8, sheets[0].total_score());
    assert_rule_not_applied(&sheets[0], "PIZ07");

    let sheets = tally(
        Pizzaz,
        &["PIZ07"],
        &[hand("p1", &[("Mushrooms", 2), ("Olives", 1), ("Ham", 1)])],
        1,
    );
    assert_eq!(9 + 12, sheets[0].total_score());
    assert_rule_applied(
        &sheets[0],
        "PIZ07",
        "There is more Vegetable cards in your pizza than Meat, Fish & Seafood and Cheese cards combined. You earn a bonus of 12 points.",
        Some(12),
        1,
    );
}

#[test]
fn piz08_disliked_toppings_never_score() {
    let sheets = tally(Pizzaz, &["PIZ08"], &[hand("p1", &[("Mushrooms", 2)])], 1);
    assert_eq!(4, sheets[0].total_score());
    assert_rule_not_applied(&sheets[0], "PIZ08");

    let sheets = tally(
        Pizzaz,
        &["PIZ08"],
        &[hand("p1", &[("Ham", 1), ("Peppers", 1), ("Mushrooms", 1)])],
        1,
    );
    assert_eq!(2, sheets[0].total_score());
    assert_rule_applied(
        &sheets[0],
        "PIZ08",
        "Don Peppino absolutely dislikes ham, pineapple and peppers. Those cards give you no points.",
        None,
        1,
    );
}

#[test]
fn piz09_one_garlic_lifts_the_exclusion() {
    let sheets = tally(
        Pizzaz,
        &["PIZ08", "PIZ09"],
        &[hand(
            "p1",
            &[("Ham", 1), ("Peppers", 1), ("Garlic", 1), ("Mushrooms", 1)],
        )],
        1,
    );
    assert_eq!(3 + 2 + 1 + 2, sheets[0].total_score());
    assert_rule_applied(
        &sheets[0],
        "PIZ08",
        "Don Peppino absolutely dislikes ham, pineapple and peppers. Those cards should give you no points...",
        None,
        1,
    );
    assert_rule_applied(
        &sheets[0],
        "PIZ09",
        "...but since your pizza contains one garlic, he tolerates them. Phew!",
        None,
        1,
    );
}

#[test]
fn piz09_two_garlics_revert_to_the_usual_distastes() {
    let sheets = tally(
        Pizzaz,
        &["PIZ08", "PIZ09"],
        &[hand("p1", &[("Ham", 1), ("Garlic", 2)])],
        1,
    );
    assert_eq!(2, sheets[0].total_score());
    assert_rule_applied(
        &sheets[0],
        "PIZ08",
        "Don Peppino absolutely dislikes ham, pineapple and peppers. Those cards give you no points.",
        None,
        1,
    );
    assert_rule_not_applied(&sheets[0], "PIZ09");
}

#[test]
fn piz10_a_double_ration_is_worth_four_points_more() {
    let sheets = tally(
        Pizzaz,
        &["PIZ10"],
        &[hand("p1", &[("Mushrooms", 2), ("Ham", 1)])],
        1,
    );
    assert_eq!(4 + 3 + 4, sheets[0].total_score());
    assert_rule_applied(
        &sheets[0],
        "PIZ10",
        "A double ration of Mushrooms gives you a bonus of 4 points.",
        Some(4),
        1,
    );
}

#[test]
fn piz11_three_toppings_with_the_same_initial_earn_eight_points() {
    let sheets = tally(
        Pizzaz,
        &["PIZ11"],
        &[hand("p1", &[("Parmesan", 1), ("Pepperoni", 1), ("Peppers", 1)])],
        1,
    );
    assert_eq!(3 + 4 + 2 + 8, sheets[0].total_score());
    assert_rule_applied(
        &sheets[0],
        "PIZ11",
        "3 different toppings starting by the letter P (Parmesan, Pepperoni, Peppers) give you a bonus of 8 points.",
        Some(8),
        1,
    );

    let sheets = tally(
        Pizzaz,
        &["PIZ11"],
        &[hand("p1", &[("Parmesan", 2), ("Pepperoni", 1), ("Mushrooms", 1)])],
        1,
    );
    assert_eq!(12, sheets[0].total_score());
    assert_rule_not_applied(&sheets[0], "PIZ11");
}

#[test]
fn piz12_the_plainest_pizza_earns_twelve_points() {
    let sheets = tally(
        Pizzaz,
        &["PIZ12"],
        &[
            hand("p1", &[("Ham", 3)]),
            hand("p2", &[("Mushrooms", 1), ("Olives", 1)]),
        ],
        1,
    );
    assert_eq!(9 + 12, sheets[0].total_score());
    assert_rule_applied(
        &sheets[0],
        "PIZ12",
        "You have the smallest number of different toppings (1 toppings) of all the players. You earn a bonus of 12 points.",
        Some(12),
        1,
    );
    assert_eq!(4, sheets[1].total_score());
    assert_rule_not_applied(&sheets[1], "PIZ12");
}

#[test]
fn piz12_every_tied_cook_earns_the_bonus() {
    let sheets = tally(
        Pizzaz,
        &["PIZ12"],
        &[
            hand("p1", &[("Ham", 3)]),
            hand("p2", &[("Mushrooms", 4)]),
        ],
        1,
    );
    assert_rule_applied(
        &sheets[0],
        "PIZ12",
        "You have the smallest number of different toppings (1 toppings) of all the players. You earn a bonus of 12 points.",
        Some(12),
        1,
    );
    assert_rule_applied(
        &sheets[1],
        "PIZ12",
        "You have the smallest number of different toppings (1 toppings) of all the players. You earn a bonus of 12 points.",
        Some(12),
        1,
    );
}
