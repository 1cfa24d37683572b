use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::models::{Championship, ParseError};

/// Composition a dressed roster must have in one championship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRules {
    pub min_skaters: u32,
    pub max_skaters: u32,
    pub goalies: u32,
}

impl RosterRules {
    pub const fn new(min_skaters: u32, max_skaters: u32, goalies: u32) -> Self {
        RosterRules {
            min_skaters,
            max_skaters,
            goalies,
        }
    }
}

/// Built-in rules for a championship.
pub fn default_rules(championship: Championship) -> RosterRules {
    match championship {
        Championship::ErsteLeague => RosterRules::new(15, 19, 2),
        Championship::RomanianChampionship
        | Championship::RomanianCup
        | Championship::RomanianSupercup => RosterRules::new(15, 20, 2),
    }
}

/// Rules per championship: the built-in table with configured overrides on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRulesTable {
    rules: HashMap<Championship, RosterRules>,
}

impl Default for RosterRulesTable {
    fn default() -> Self {
        RosterRulesTable {
            rules: Championship::ALL
                .into_iter()
                .map(|c| (c, default_rules(c)))
                .collect(),
        }
    }
}

impl RosterRulesTable {
    /// Applies overrides keyed by championship display name.
    ///
    /// An unknown name is an error so a typo in the config file does not go
    /// unnoticed.
    pub fn with_overrides(overrides: &BTreeMap<String, RosterRules>) -> Result<Self, ParseError> {
        let mut table = RosterRulesTable::default();
        for (name, rules) in overrides {
            let championship: Championship = name.parse()?;
            table.rules.insert(championship, *rules);
        }
        Ok(table)
    }

    pub fn rules_for(&self, championship: Championship) -> RosterRules {
        self.rules
            .get(&championship)
            .copied()
            .unwrap_or_else(|| default_rules(championship))
    }
}
