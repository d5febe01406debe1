//! Catalog operations that talk to the hosted services.
//!
//! Writes follow the write-then-reload policy: after a successful insert,
//! replace or remove, the whole collection is fetched again and replaces the
//! mirror. There is no local patching, so the mirror cannot drift from the
//! store. Each function borrows the state only between awaits.

use crate::backend::{CatalogStore, IdentityProvider, Subscription};
use crate::catalog::RefreshOutcome;
use crate::dialog::DialogEffect;
use crate::error::{ActionError, CatalogError};
use crate::state::StateCell;
use crate::types::{Identity, ProgramFields};

/// Replace the mirror with a fresh fetch.
pub async fn refresh<C, S>(cell: &C, store: &S) -> Result<RefreshOutcome, CatalogError>
where
    C: StateCell,
    S: CatalogStore + ?Sized,
{
    let ticket = cell.update(|s| s.catalog.begin_refresh());
    let result = store.list_all().await;
    cell.update(|s| s.catalog.apply_refresh(ticket, result))
}

pub async fn create<C, S>(cell: &C, store: &S, fields: &ProgramFields) -> Result<(), CatalogError>
where
    C: StateCell,
    S: CatalogStore + ?Sized,
{
    let id = store.insert(fields).await.map_err(|e| {
        tracing::error!("Failed to create program: {}", e);
        CatalogError::Write(e)
    })?;
    tracing::info!("Created program {}", id);
    refresh(cell, store).await.map(|_| ())
}

pub async fn update<C, S>(
    cell: &C,
    store: &S,
    id: &str,
    fields: &ProgramFields,
) -> Result<(), CatalogError>
where
    C: StateCell,
    S: CatalogStore + ?Sized,
{
    store.replace(id, fields).await.map_err(|e| {
        tracing::error!("Failed to update program {}: {}", id, e);
        CatalogError::Write(e)
    })?;
    tracing::info!("Updated program {}", id);
    refresh(cell, store).await.map(|_| ())
}

pub async fn delete<C, S>(cell: &C, store: &S, id: &str) -> Result<(), CatalogError>
where
    C: StateCell,
    S: CatalogStore + ?Sized,
{
    store.remove(id).await.map_err(|e| {
        tracing::error!("Failed to delete program {}: {}", id, e);
        CatalogError::Delete(e)
    })?;
    tracing::info!("Deleted program {}", id);
    refresh(cell, store).await.map(|_| ())
}

/// Submit the admin form: update when editing, otherwise create.
///
/// Validation and the double-submit guard run before any remote call.
pub async fn submit_program_form<C, S>(cell: &C, store: &S) -> Result<(), ActionError>
where
    C: StateCell,
    S: CatalogStore + ?Sized,
{
    let plan = cell.update(|s| s.session.begin_submit())?;
    let outcome = match plan.target.as_deref() {
        Some(id) => update(cell, store, id, &plan.fields).await,
        None => create(cell, store, &plan.fields).await,
    };
    cell.update(|s| s.session.finish_submit(&outcome));
    Ok(outcome?)
}

/// Delete a catalog record. Confirmation is the caller's job.
pub async fn delete_program<C, S>(cell: &C, store: &S, id: &str) -> Result<(), ActionError>
where
    C: StateCell,
    S: CatalogStore + ?Sized,
{
    cell.update(|s| s.session.begin_delete(id))?;
    let outcome = delete(cell, store, id).await;
    cell.update(|s| s.session.finish_delete(id, &outcome));
    Ok(outcome?)
}

pub async fn sign_in<C, P>(cell: &C, provider: &P) -> Result<Identity, ActionError>
where
    C: StateCell,
    P: IdentityProvider + ?Sized,
{
    let (email, password) = cell.update(|s| s.session.begin_sign_in())?;
    let outcome = provider.sign_in(&email, &password).await;
    if let Err(e) = &outcome {
        tracing::error!("Sign-in failed for {}: {}", email, e);
    }
    cell.update(|s| s.session.finish_sign_in(&outcome));
    Ok(outcome?)
}

pub async fn sign_out<C, P>(cell: &C, provider: &P) -> Result<(), ActionError>
where
    C: StateCell,
    P: IdentityProvider + ?Sized,
{
    provider.sign_out().await.map_err(|e| {
        tracing::error!("Sign-out failed: {}", e);
        e
    })?;
    cell.update(|s| s.apply_identity(None));
    Ok(())
}

/// Feed identity notifications into the state for as long as the subscription lives.
pub fn watch_identity<C, P>(cell: C, provider: &P) -> Subscription
where
    C: StateCell + 'static,
    P: IdentityProvider + ?Sized,
{
    provider.on_identity_change(Box::new(move |identity| {
        cell.update(|s| s.apply_identity(identity));
    }))
}

/// Initial load, then open the detail dialog for a deep-linked program id.
///
/// A failed load leaves an empty catalog; the page stays usable.
pub async fn bootstrap<C, S>(cell: &C, store: &S, linked_program: Option<&str>) -> Vec<DialogEffect>
where
    C: StateCell,
    S: CatalogStore + ?Sized,
{
    if let Err(e) = refresh(cell, store).await {
        tracing::warn!("Starting with an empty catalog: {}", e);
    }
    cell.update(|s| {
        s.dialog
            .restore_from_link(linked_program, &s.catalog)
            .unwrap_or_else(|e| {
                tracing::warn!("Could not open linked program: {}", e);
                Vec::new()
            })
    })
}
