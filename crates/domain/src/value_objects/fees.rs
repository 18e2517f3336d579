//! Fee-split arithmetic for every money movement.
//!
//! Shares paid out of the gross round DOWN; the platform fee charged on
//! livestream tickets rounds UP. Splits therefore do not always sum back to
//! the gross amount; the remainder is implicit platform margin. These exact
//! semantics are load-bearing for financial parity with the ledger backend
//! and must not be "fixed".

/// Creator share of subscriptions and post unlocks, percent.
pub const CREATOR_SHARE_PCT: i64 = 90;
/// Recipient share of tips and gifts, percent.
pub const TIP_SHARE_PCT: i64 = 95;
/// Platform fee on livestream tickets, percent, charged payer-side.
pub const TICKET_FEE_PCT: i64 = 10;

/// floor(gross * 90%): what the creator receives for a subscription or
/// post unlock.
pub fn creator_share(gross: i64) -> i64 {
    gross * CREATOR_SHARE_PCT / 100
}

/// floor(gross * 95%): what the recipient receives for a tip or gift.
pub fn tip_share(gross: i64) -> i64 {
    gross * TIP_SHARE_PCT / 100
}

/// ceil(price * 10%): the platform fee retained from a ticket sale.
pub fn ticket_fee(price: i64) -> i64 {
    (price * TICKET_FEE_PCT + 99) / 100
}

/// price - ceil(price * 10%): what the creator receives for a ticket.
pub fn ticket_net(price: i64) -> i64 {
    price - ticket_fee(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creator_share_rounds_down() {
        assert_eq!(creator_share(100), 90);
        assert_eq!(creator_share(99), 89);
        assert_eq!(creator_share(1), 0);
        assert_eq!(creator_share(0), 0);
    }

    #[test]
    fn tip_share_rounds_down() {
        assert_eq!(tip_share(30), 28);
        assert_eq!(tip_share(100), 95);
        assert_eq!(tip_share(1), 0);
    }

    #[test]
    fn ticket_fee_rounds_up() {
        assert_eq!(ticket_fee(99), 10);
        assert_eq!(ticket_fee(100), 10);
        assert_eq!(ticket_fee(101), 11);
        assert_eq!(ticket_fee(1), 1);
        assert_eq!(ticket_fee(0), 0);
    }

    #[test]
    fn ticket_split_matches_ledger() {
        // price 99 -> fee 10, net 89
        assert_eq!(ticket_fee(99), 10);
        assert_eq!(ticket_net(99), 89);
        assert_eq!(ticket_fee(99) + ticket_net(99), 99);
    }

    #[test]
    fn floor_rounding_leaves_platform_margin() {
        assert_eq!(creator_share(33), 29);
        assert_eq!(tip_share(33), 31);
    }
}
