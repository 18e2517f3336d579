use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Which payment rail the caller selected: the in-app token ledger or the
/// external Stars invoice provider.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentRail {
    #[default]
    Tokens,
    Stars,
}

impl Display for PaymentRail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rail = match self {
            PaymentRail::Tokens => "tokens",
            PaymentRail::Stars => "stars",
        };
        write!(f, "{}", rail)
    }
}
