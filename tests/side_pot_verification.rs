//! Side pot calculation tests, fixture-based and property-based.
//!
//! These verify that side pot layering and distribution work in all
//! scenarios: multiple all-ins at different amounts, folded players who
//! contributed but cannot win, and remainder chips going to the
//! first-listed winner.

use holdem_engine::entities::{Chips, PlayerId};
use holdem_engine::pot::Pot;
use proptest::prelude::*;

fn id(name: &str) -> PlayerId {
    PlayerId::from(name)
}

#[test]
fn test_simple_side_pot_three_players() {
    // Player a: all-in 50. Players b and c: 100 each.
    // Main pot: 150 (50 from each, all three eligible).
    // Side pot: 100 (50 from b and c, a not eligible).
    let mut pot = Pot::new();
    pot.add(&id("a"), 50, true).unwrap();
    pot.add(&id("b"), 100, false).unwrap();
    pot.add(&id("c"), 100, false).unwrap();

    assert_eq!(pot.total(), 250);
    assert_eq!(pot.subpots().len(), 2);
    assert_eq!(pot.subpots()[0].total(), 150);
    assert_eq!(pot.subpots()[1].total(), 100);

    // a has the best hand but only wins the main pot; the side pot falls
    // to the next tier.
    pot.finalize(&vec![vec![id("a")], vec![id("b")], vec![id("c")]]);
    let winnings = pot.winnings().unwrap();
    assert_eq!(winnings.get(&id("a")), Some(&150));
    assert_eq!(winnings.get(&id("b")), Some(&100));
    assert_eq!(winnings.get(&id("c")), None);
}

#[test]
fn test_multiple_side_pots_four_players() {
    // All-ins at 25, 75, and 150, plus a 150 call.
    // Main pot: 100. Side pot 1: 150. Side pot 2: 150.
    let mut pot = Pot::new();
    pot.add(&id("a"), 25, true).unwrap();
    pot.add(&id("b"), 75, true).unwrap();
    pot.add(&id("c"), 150, true).unwrap();
    pot.add(&id("d"), 150, false).unwrap();

    assert_eq!(pot.total(), 400);
    let layer_totals: Vec<Chips> = pot.subpots().iter().map(|s| s.total()).collect();
    assert_eq!(layer_totals, vec![100, 150, 150, 0]);

    // Shortest stack has the best hand; each layer goes to the best
    // contributor remaining in it.
    pot.finalize(&vec![vec![id("a")], vec![id("b")], vec![id("c")], vec![id("d")]]);
    let winnings = pot.winnings().unwrap();
    assert_eq!(winnings.get(&id("a")), Some(&100));
    assert_eq!(winnings.get(&id("b")), Some(&150));
    assert_eq!(winnings.get(&id("c")), Some(&150));
    assert_eq!(winnings.get(&id("d")), None);
}

#[test]
fn test_all_ins_in_descending_order() {
    // a: all-in 20, then b: all-in 10, then c calls 20. b's cap lands
    // inside a's existing layer, which must re-split at 10.
    // Main pot: 30 (10 each). Side pot: 20 (10 from a and c).
    let mut pot = Pot::new();
    pot.add(&id("a"), 20, true).unwrap();
    pot.add(&id("b"), 10, true).unwrap();
    pot.add(&id("c"), 20, false).unwrap();

    assert_eq!(pot.total(), 50);
    let layer_totals: Vec<Chips> = pot.subpots().iter().map(|s| s.total()).collect();
    assert_eq!(layer_totals, vec![30, 20, 0]);

    // b wins only what their chips covered; a takes the layer above.
    pot.finalize(&vec![vec![id("b")], vec![id("a")], vec![id("c")]]);
    let winnings = pot.winnings().unwrap();
    assert_eq!(winnings.get(&id("b")), Some(&30));
    assert_eq!(winnings.get(&id("a")), Some(&20));
    assert_eq!(winnings.get(&id("c")), None);
}

#[test]
fn test_folded_contributor_cannot_win() {
    // b contributed the most but folded, so b appears in no tier.
    let mut pot = Pot::new();
    pot.add(&id("a"), 60, false).unwrap();
    pot.add(&id("b"), 90, false).unwrap();
    pot.finalize(&vec![vec![id("a")]]);

    let winnings = pot.winnings().unwrap();
    assert_eq!(winnings.get(&id("a")), Some(&150));
    assert_eq!(winnings.get(&id("b")), None);
}

#[test]
fn test_fixture_bets_and_totals() {
    let mut pot = Pot::new();
    pot.add(&id("a"), 25, false).unwrap();
    pot.add(&id("b"), 30, false).unwrap();
    pot.add(&id("a"), 32, true).unwrap();
    pot.add(&id("b"), 100, false).unwrap();

    assert_eq!(pot.total(), 187);
    assert_eq!(pot.player_total(&id("a")), 57);
    assert_eq!(pot.player_total(&id("b")), 130);
}

#[test]
fn test_fixture_split_gives_odd_chip_to_first_winner() {
    let mut pot = Pot::new();
    pot.add(&id("a"), 25, false).unwrap();
    pot.add(&id("b"), 30, false).unwrap();
    pot.add(&id("a"), 32, true).unwrap();
    pot.add(&id("b"), 100, false).unwrap();
    pot.finalize(&vec![vec![id("a"), id("b")]]);

    let winnings = pot.winnings().unwrap();
    assert_eq!(winnings.get(&id("a")), Some(&94));
    assert_eq!(winnings.get(&id("b")), Some(&93));
}

#[derive(Clone, Debug)]
struct Contribution {
    player: usize,
    amount: Chips,
    all_in: bool,
}

fn contribution_strategy() -> impl Strategy<Value = Contribution> {
    (0usize..5, 1u32..200, any::<bool>()).prop_map(|(player, amount, all_in)| Contribution {
        player,
        amount,
        all_in,
    })
}

fn player_name(index: usize) -> PlayerId {
    PlayerId::from(["a", "b", "c", "d", "e"][index])
}

proptest! {
    #[test]
    fn test_no_chips_created_or_destroyed(
        contributions in prop::collection::vec(contribution_strategy(), 1..20),
    ) {
        let mut pot = Pot::new();
        let mut expected: Chips = 0;
        for c in &contributions {
            pot.add(&player_name(c.player), c.amount, c.all_in).unwrap();
            expected += c.amount;
        }
        prop_assert_eq!(pot.total(), expected);

        // Per-player attribution also adds up.
        let attributed: Chips = (0..5).map(|i| pot.player_total(&player_name(i))).sum();
        prop_assert_eq!(attributed, expected);
    }

    #[test]
    fn test_full_payout_when_everyone_contends(
        contributions in prop::collection::vec(contribution_strategy(), 1..20),
    ) {
        let mut pot = Pot::new();
        for c in &contributions {
            pot.add(&player_name(c.player), c.amount, c.all_in).unwrap();
        }
        let total = pot.total();

        // A single tier containing every player claims every subpot.
        pot.finalize(&vec![(0..5).map(player_name).collect()]);
        let paid: Chips = pot.winnings().unwrap().values().sum();
        prop_assert_eq!(paid, total);
    }

    #[test]
    fn test_payout_never_exceeds_pot(
        contributions in prop::collection::vec(contribution_strategy(), 1..20),
        winners in prop::collection::btree_set(0usize..5, 1..=2),
    ) {
        let mut pot = Pot::new();
        for c in &contributions {
            pot.add(&player_name(c.player), c.amount, c.all_in).unwrap();
        }
        let total = pot.total();

        // A partial tier may leave layers unclaimed but never over-pays.
        pot.finalize(&vec![winners.into_iter().map(player_name).collect()]);
        let paid: Chips = pot.winnings().unwrap().values().sum();
        prop_assert!(paid <= total);
    }
}
