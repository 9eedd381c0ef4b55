use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use holdem_engine::entities::{Card, PlayerId, Suit};
use holdem_engine::eval::{PlayerHand, best_combo, rank_hands};
use holdem_engine::pot::Pot;

/// A 7-card input that walks every detector before matching: no flush, no
/// straight, just a pair buried in kickers.
fn worst_case_cards() -> Vec<Card> {
    vec![
        Card(14, Suit::Spade),
        Card(9, Suit::Heart),
        Card(9, Suit::Club),
        Card(6, Suit::Diamond),
        Card(4, Suit::Spade),
        Card(3, Suit::Heart),
        Card(2, Suit::Club),
    ]
}

fn royal_flush_cards() -> Vec<Card> {
    vec![
        Card(14, Suit::Spade),
        Card(13, Suit::Spade),
        Card(12, Suit::Spade),
        Card(11, Suit::Spade),
        Card(10, Suit::Spade),
        Card(2, Suit::Heart),
        Card(3, Suit::Diamond),
    ]
}

fn bench_best_combo(c: &mut Criterion) {
    c.bench_function("best_combo_royal_flush", |b| {
        let cards = royal_flush_cards();
        b.iter(|| best_combo(&cards).unwrap());
    });

    c.bench_function("best_combo_pair_worst_case", |b| {
        let cards = worst_case_cards();
        b.iter(|| best_combo(&cards).unwrap());
    });
}

fn bench_rank_hands(c: &mut Criterion) {
    let board = vec![
        Card(13, Suit::Club),
        Card(9, Suit::Spade),
        Card(7, Suit::Diamond),
        Card(4, Suit::Heart),
        Card(2, Suit::Club),
    ];
    for n_players in [2, 6, 9] {
        let entries: Vec<PlayerHand> = (0..n_players)
            .map(|i| {
                let suit = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade][i % 4];
                let mut cards = vec![Card(14 - (i as u8), suit), Card(3 + (i as u8), suit)];
                cards.extend_from_slice(&board);
                PlayerHand {
                    player: PlayerId::from(format!("player{i}").as_str()),
                    cards,
                }
            })
            .collect();
        c.bench_with_input(
            BenchmarkId::new("rank_hands", n_players),
            &entries,
            |b, entries| {
                b.iter(|| rank_hands(entries).unwrap());
            },
        );
    }
}

fn bench_pot_settlement(c: &mut Criterion) {
    c.bench_function("pot_add_and_finalize_all_in_ladder", |b| {
        let players: Vec<PlayerId> = (0..6).map(|i| PlayerId::from(format!("p{i}").as_str())).collect();
        b.iter(|| {
            let mut pot = Pot::new();
            for (i, player) in players.iter().enumerate() {
                let amount = 50 * (i as u32 + 1);
                pot.add(player, amount, i < 3).unwrap();
            }
            pot.finalize(&vec![players.clone()]);
            pot.winnings().unwrap().len()
        });
    });
}

criterion_group!(
    benches,
    bench_best_combo,
    bench_rank_hands,
    bench_pot_settlement
);
criterion_main!(benches);
