//! Soft/sharp record matching
//!
//! Joins a soft book's record to the sharp board by exact lookup on the
//! normalized (match, outcome) key. No fuzzy matching: a wrong pairing would
//! alert on garbage EV numbers, so a name variant that normalization does not
//! reconcile is simply skipped.

use crate::normalize::normalize;
use crate::types::{match_key, OddsRecord, SharpBoard};
use rust_decimal::Decimal;

/// Look up the sharp price for a soft record, if the board has one.
pub fn find_sharp_price(record: &OddsRecord, board: &SharpBoard) -> Option<Decimal> {
    let key = match_key(&record.home, &record.away);
    board.get(&key, &normalize(&record.outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(home: &str, away: &str, outcome: &str) -> OddsRecord {
        OddsRecord {
            book: "gamdom".to_string(),
            home: home.to_string(),
            away: away.to_string(),
            market: "Match Winner".to_string(),
            outcome: outcome.to_string(),
            price: dec!(2.50),
        }
    }

    #[test]
    fn test_exact_match() {
        let mut board = SharpBoard::new();
        board.insert("Alpha", "Beta", "Alpha", dec!(2.40));

        let r = record("Alpha", "Beta", "Alpha");
        assert_eq!(find_sharp_price(&r, &board), Some(dec!(2.40)));
    }

    #[test]
    fn test_diacritic_variant_matches() {
        let mut board = SharpBoard::new();
        board.insert("Bayern Munchen", "Borussia Dortmund", "Bayern Munchen", dec!(1.65));

        let r = record("Bayern München", "Borussia  Dortmund", "Bayern München");
        assert_eq!(find_sharp_price(&r, &board), Some(dec!(1.65)));
    }

    #[test]
    fn test_draw_outcome() {
        let mut board = SharpBoard::new();
        board.insert("Alpha", "Beta", "Draw", dec!(3.40));

        let r = record("Alpha", "Beta", "Draw");
        assert_eq!(find_sharp_price(&r, &board), Some(dec!(3.40)));
    }

    #[test]
    fn test_unmatched_record_skipped() {
        let mut board = SharpBoard::new();
        board.insert("Alpha", "Beta", "Alpha", dec!(2.40));

        // Wrong outcome
        assert_eq!(find_sharp_price(&record("Alpha", "Beta", "Beta"), &board), None);
        // Unknown match
        assert_eq!(find_sharp_price(&record("Gamma", "Delta", "Gamma"), &board), None);
        // Swapped home/away does not reconcile
        assert_eq!(find_sharp_price(&record("Beta", "Alpha", "Alpha"), &board), None);
    }
}
