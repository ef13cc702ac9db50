use anyhow::Context;
use storeinit_core::password::hash_password;
use storeinit_core::{TestAccount, TEST_ACCOUNTS};
use storeinit_db::{AccountWrite, StoreRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccountAction {
    Created,
    Updated,
}

impl std::fmt::Display for AccountAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountAction::Created => write!(f, "created"),
            AccountAction::Updated => write!(f, "updated"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AccountOutcome {
    pub account: TestAccount,
    pub action: AccountAction,
}

/// Create or overwrite every test account.
///
/// Existing accounts have their password reset and flags forced to the
/// canonical values on every run, even when they already match.
pub(crate) async fn provision_accounts<S>(
    store: &S,
    bcrypt_cost: u32,
) -> anyhow::Result<Vec<AccountOutcome>>
where
    S: StoreRepository + ?Sized,
{
    let mut outcomes = Vec::with_capacity(TEST_ACCOUNTS.len());
    for account in TEST_ACCOUNTS {
        outcomes.push(provision_account(store, account, bcrypt_cost).await?);
    }
    Ok(outcomes)
}

async fn provision_account<S>(
    store: &S,
    account: TestAccount,
    bcrypt_cost: u32,
) -> anyhow::Result<AccountOutcome>
where
    S: StoreRepository + ?Sized,
{
    let password_hash = hash_password(account.password, bcrypt_cost)
        .with_context(|| format!("failed to hash password for {}", account.email))?;
    let write = AccountWrite {
        email: account.email,
        password_hash: &password_hash,
        is_active: account.is_active,
        is_staff: account.is_staff,
        is_superuser: account.is_superuser,
        first_name: account.first_name,
        last_name: account.last_name,
    };

    let action = match store.find_user_by_email(account.email).await? {
        Some(user) => {
            store.update_user(user.id, &write).await?;
            AccountAction::Updated
        }
        None => {
            store.insert_user(&write).await?;
            AccountAction::Created
        }
    };

    tracing::info!(role = %account.role, email = account.email, %action, "test account provisioned");
    println!(
        "{} account {action}: {} / {}",
        account.role, account.email, account.password
    );
    Ok(AccountOutcome { account, action })
}
