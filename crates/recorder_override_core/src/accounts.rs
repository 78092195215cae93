//! Reference account list carried in the `ACCOUNTS_LIST` setting.
//!
//! Deployments write the list as a bracketed literal (`['111', '222']` or
//! `["111","222"]`); a bare comma separated form is also accepted.

use crate::error::ProducerError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceAccountList {
    accounts: Vec<String>,
}

impl ReferenceAccountList {
    pub fn new<I, S>(accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accounts: accounts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn parse(text: &str) -> Result<Self, ProducerError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let inner = match (trimmed.strip_prefix('['), trimmed.ends_with(']')) {
            (Some(rest), true) => &rest[..rest.len() - 1],
            (None, false) => trimmed,
            _ => {
                return Err(ProducerError::Config(format!(
                    "account list has unbalanced brackets: {trimmed}"
                )));
            }
        };

        let mut accounts = Vec::new();
        for raw in inner.split(',') {
            let item = raw.trim();
            if item.is_empty() {
                continue;
            }
            accounts.push(unquote(item)?.to_string());
        }

        Ok(Self { accounts })
    }

    pub fn contains(&self, account: &str) -> bool {
        self.accounts.iter().any(|candidate| candidate == account)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.accounts.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Copy of the list with `account` removed.
    pub fn without(&self, account: &str) -> Self {
        Self {
            accounts: self
                .accounts
                .iter()
                .filter(|candidate| candidate.as_str() != account)
                .cloned()
                .collect(),
        }
    }
}

impl std::fmt::Display for ReferenceAccountList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.accounts.join(", "))
    }
}

fn unquote(item: &str) -> Result<&str, ProducerError> {
    for quote in ['\'', '"'] {
        if let Some(rest) = item.strip_prefix(quote) {
            return rest.strip_suffix(quote).ok_or_else(|| {
                ProducerError::Config(format!("account list item has unterminated quote: {item}"))
            });
        }
    }

    if item.ends_with('\'') || item.ends_with('"') {
        return Err(ProducerError::Config(format!(
            "account list item has unterminated quote: {item}"
        )));
    }

    Ok(item)
}
