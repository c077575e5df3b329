use crate::{Card, Role, Snapshot, Table};

/// Renders the table as attack/defense pairs, one pair per line.
///
/// ```text
///  0: 7♥ ← 9♥
///  1: 7♣
/// ```
pub fn visualize_table(table: &Table) -> String {
    let mut result = String::new();
    for (idx, table_card) in table.iter().enumerate() {
        if !table_card.is_attack() {
            continue;
        }
        result += &format!("{:>2}: {}", idx, table_card.card);
        let cover = table.iter().find(|tc| tc.covers == Some(idx));
        if let Some(cover) = cover {
            result += &format!(" ← {}", cover.card);
        }
        result += "\n";
    }
    result
}

pub fn visualize_cards(cards: &[Card]) -> String {
    let strs: Vec<String> = cards.iter().map(|card| card.to_string()).collect();
    strs.join(" ")
}

/// Renders the whole game, with every hand face up.
pub fn visualize_snapshot(snapshot: &Snapshot) -> String {
    let mut result = format!(
        "Round {} | trump {}{} | deck {} | discarded {}\n",
        snapshot.round,
        snapshot.trump,
        if snapshot.trump_in_deck { "" } else { " (drawn)" },
        snapshot.deck_len,
        snapshot.discarded,
    );
    for (seat, (hand, role)) in snapshot.hands.iter().zip(&snapshot.roles).enumerate() {
        let marker = match role {
            Role::Attacker => "⚔",
            Role::Defender => "🛡",
            Role::Bystander => " ",
            Role::Out => "✓",
        };
        result += &format!("{} seat {}: {}\n", marker, seat, visualize_cards(hand));
    }
    if snapshot.table.is_empty() {
        result += "(empty table)\n";
    } else {
        result += &visualize_table(&snapshot.table);
    }
    result
}
