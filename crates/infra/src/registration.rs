//! Sign-up workflow: account plus linked member.

use chrono::{DateTime, Utc};
use tracing::instrument;

use bierklub_auth::registration::DUPLICATE_EMAIL;
use bierklub_auth::{
    CredentialError, NewAccount, PasswordHash, PersonName, RegistrationForm, hash_password,
};
use bierklub_club::{Member, NewMember};
use bierklub_core::FormErrors;

use crate::error::ServiceError;
use crate::form::FormRejection;
use crate::store::{ClubStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered(Member),
    Rejected(FormRejection<RegistrationForm>),
}

fn rejected(errors: FormErrors, form: &RegistrationForm) -> RegistrationOutcome {
    RegistrationOutcome::Rejected(FormRejection::new(errors, form.redacted()))
}

/// Validate a sign-up, then create the account and its member together.
///
/// All field problems are reported at once, along with the password
/// mismatch and duplicate email checks. A uniqueness conflict raised by the
/// store (a concurrent sign-up, or an address already held by an RSVP-only
/// member) is reported as the duplicate email rejection.
#[instrument(skip(store, form), err)]
pub async fn register_member(
    store: &dyn ClubStore,
    form: RegistrationForm,
    now: DateTime<Utc>,
) -> Result<RegistrationOutcome, ServiceError> {
    let valid = match form.validate() {
        Ok(valid) => valid,
        Err((mut errors, email)) => {
            if let Some(email) = email {
                if store.find_account_by_email(&email).await?.is_some() {
                    errors.add_non_field(DUPLICATE_EMAIL);
                }
            }
            return Ok(rejected(errors, &form));
        }
    };

    if store.find_account_by_email(&valid.email).await?.is_some() {
        let mut errors = FormErrors::new();
        errors.add_non_field(DUPLICATE_EMAIL);
        return Ok(rejected(errors, &form));
    }

    let password_hash = hash_off_executor(valid.password).await?;

    let account = NewAccount {
        email: valid.email.clone(),
        name: PersonName::split(&valid.full_name),
        password_hash,
    };
    let member = NewMember {
        name: valid.full_name,
        email: valid.email,
        join_date: now.date_naive(),
    };

    match store.register_member(account, member, now).await {
        Ok((account, member)) => {
            tracing::info!(account_id = %account.id, member_id = %member.id, "member registered");
            Ok(RegistrationOutcome::Registered(member))
        }
        Err(StoreError::Conflict(detail)) => {
            tracing::info!(%detail, "registration lost a uniqueness race");
            let mut errors = FormErrors::new();
            errors.add_non_field(DUPLICATE_EMAIL);
            Ok(rejected(errors, &form))
        }
        Err(e) => Err(e.into()),
    }
}

async fn hash_off_executor(password: String) -> Result<PasswordHash, ServiceError> {
    let hashed = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| CredentialError::Hashing(format!("hashing task failed: {e}")))??;
    Ok(hashed)
}
