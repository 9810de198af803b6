//! Static rule table

use crate::models::types::RuleId;

/// Static metadata of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSpec {
    pub id: RuleId,
    pub name: &'static str,
    pub description: &'static str,
}

pub const RULES: [RuleSpec; 3] = [
    RuleSpec {
        id: RuleId::CheckTwitterTokens,
        name: "Twitter token history",
        description: "Tokens previously launched by the bound Twitter account",
    },
    RuleSpec {
        id: RuleId::CheckTwitterModifications,
        name: "Twitter modification history",
        description: "Suspicious profile edits of the bound Twitter account",
    },
    RuleSpec {
        id: RuleId::CheckCreatorTokens,
        name: "Creator token history",
        description: "Tokens previously launched by the contract creator",
    },
];

pub fn rule(id: RuleId) -> &'static RuleSpec {
    match id {
        RuleId::CheckTwitterTokens => &RULES[0],
        RuleId::CheckTwitterModifications => &RULES[1],
        RuleId::CheckCreatorTokens => &RULES[2],
    }
}

// Result messages
pub const MSG_TWITTER_TOKENS_DONE: &str = "Twitter token history check completed";
pub const MSG_TWITTER_MODIFICATIONS_DONE: &str = "Twitter modification check completed";
pub const MSG_CREATOR_TOKENS_DONE: &str = "Creator token history check completed";
pub const MSG_NO_TWITTER: &str = "This token has no bound Twitter account";
pub const MSG_RULE_FAILED: &str = "Rule execution failed";
pub const MSG_EVALUATION_FAILED: &str = "Rule evaluation failed";

pub fn completion_message(id: RuleId) -> &'static str {
    match id {
        RuleId::CheckTwitterTokens => MSG_TWITTER_TOKENS_DONE,
        RuleId::CheckTwitterModifications => MSG_TWITTER_MODIFICATIONS_DONE,
        RuleId::CheckCreatorTokens => MSG_CREATOR_TOKENS_DONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table_matches_ids() {
        for id in RuleId::ALL {
            assert_eq!(rule(id).id, id);
        }
    }
}
