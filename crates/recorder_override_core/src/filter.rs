use crate::accounts::ReferenceAccountList;

pub const EXCLUDE_ACCOUNTS: &str = "EXCLUDEACCOUNTS";
pub const INCLUDE_ACCOUNTS: &str = "INCLUDEACCOUNTS";

// Spellings shipped by earlier deployment templates.
const LEGACY_EXCLUDE_ACCOUNTS: &str = "EXLUDEACCOUNTS";
const LEGACY_INCLUDE_ACCOUNTS: &str = "INCLUDEACCOUTNS";

/// Whether membership in the reference list grants or denies eligibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountFilterPolicy {
    ExcludeListed,
    IncludeListed,
    Unrecognized(String),
}

impl AccountFilterPolicy {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            EXCLUDE_ACCOUNTS | LEGACY_EXCLUDE_ACCOUNTS => Self::ExcludeListed,
            INCLUDE_ACCOUNTS | LEGACY_INCLUDE_ACCOUNTS => Self::IncludeListed,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::ExcludeListed => EXCLUDE_ACCOUNTS,
            Self::IncludeListed => INCLUDE_ACCOUNTS,
            Self::Unrecognized(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Eligible,
    Excluded,
    /// The policy itself is misconfigured; nothing is eligible.
    UnsupportedPolicy,
}

pub fn evaluate(
    account: &str,
    reference: &ReferenceAccountList,
    policy: &AccountFilterPolicy,
) -> FilterDecision {
    let listed = reference.contains(account);
    match policy {
        AccountFilterPolicy::ExcludeListed if !listed => FilterDecision::Eligible,
        AccountFilterPolicy::IncludeListed if listed => FilterDecision::Eligible,
        AccountFilterPolicy::ExcludeListed | AccountFilterPolicy::IncludeListed => {
            FilterDecision::Excluded
        }
        AccountFilterPolicy::Unrecognized(_) => FilterDecision::UnsupportedPolicy,
    }
}

pub fn is_eligible(
    account: &str,
    reference: &ReferenceAccountList,
    policy: &AccountFilterPolicy,
) -> bool {
    evaluate(account, reference, policy) == FilterDecision::Eligible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ReferenceAccountList {
        ReferenceAccountList::new(["111111111111", "222222222222"])
    }

    #[test]
    fn exclude_policy_rejects_listed_accounts() {
        let policy = AccountFilterPolicy::ExcludeListed;
        assert!(!is_eligible("111111111111", &reference(), &policy));
        assert!(is_eligible("333333333333", &reference(), &policy));
    }

    #[test]
    fn include_policy_admits_only_listed_accounts() {
        let policy = AccountFilterPolicy::IncludeListed;
        assert!(is_eligible("222222222222", &reference(), &policy));
        assert!(!is_eligible("333333333333", &reference(), &policy));
    }

    #[test]
    fn policies_are_complementary_for_every_account() {
        for account in ["111111111111", "222222222222", "333333333333", ""] {
            let listed = reference().contains(account);
            assert_eq!(
                is_eligible(account, &reference(), &AccountFilterPolicy::ExcludeListed),
                !listed
            );
            assert_eq!(
                is_eligible(account, &reference(), &AccountFilterPolicy::IncludeListed),
                listed
            );
        }
    }

    #[test]
    fn unrecognized_policy_denies_everything() {
        let policy = AccountFilterPolicy::parse("ALLACCOUNTS");
        assert_eq!(policy, AccountFilterPolicy::Unrecognized("ALLACCOUNTS".to_string()));

        for account in ["111111111111", "333333333333"] {
            assert_eq!(
                evaluate(account, &reference(), &policy),
                FilterDecision::UnsupportedPolicy
            );
            assert!(!is_eligible(account, &reference(), &policy));
        }
    }

    #[test]
    fn parses_canonical_and_legacy_spellings() {
        assert_eq!(
            AccountFilterPolicy::parse("EXCLUDEACCOUNTS"),
            AccountFilterPolicy::ExcludeListed
        );
        assert_eq!(
            AccountFilterPolicy::parse("EXLUDEACCOUNTS"),
            AccountFilterPolicy::ExcludeListed
        );
        assert_eq!(
            AccountFilterPolicy::parse(" INCLUDEACCOUNTS "),
            AccountFilterPolicy::IncludeListed
        );
        assert_eq!(
            AccountFilterPolicy::parse("INCLUDEACCOUTNS"),
            AccountFilterPolicy::IncludeListed
        );
        assert_eq!(
            AccountFilterPolicy::parse("includeaccounts"),
            AccountFilterPolicy::Unrecognized("includeaccounts".to_string())
        );
    }
}
