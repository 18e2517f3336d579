use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ContentVisibility {
    #[default]
    Public,
    Followers,
    Subscribers,
}

impl Display for ContentVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visibility = match self {
            ContentVisibility::Public => "public",
            ContentVisibility::Followers => "followers",
            ContentVisibility::Subscribers => "subscribers",
        };
        write!(f, "{}", visibility)
    }
}
