//! Ownership checks for sub-resources scoped to the caller.
//!
//! Before a handler mutates a sub-resource (a cart line, say) it asks the
//! [`OwnershipGuard`] to confirm that the sub-resource's parent is the
//! caller's own parent resource. A missing sub-resource, a caller without a
//! parent and a parent mismatch all answer 404, so another principal's
//! records are indistinguishable from records that do not exist.

use thiserror::Error;
use tracing::instrument;

use shopfront_auth::PrincipalId;
use shopfront_core::AppError;

use crate::stores::{
    ParentResource, ParentResourceStore, StoreError, SubResource, SubResourceStore,
};

#[derive(Debug, Error)]
pub enum OwnershipError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl OwnershipError {
    pub fn into_app_error(self) -> AppError {
        match self {
            OwnershipError::NotFound(resource) => {
                AppError::not_found(anyhow::anyhow!("{resource} not found"))
            }
            OwnershipError::Store(e) => AppError::internal(e),
        }
    }
}

pub struct OwnershipGuard<'a, C: ?Sized, P: ?Sized> {
    children: &'a C,
    parents: &'a P,
    resource: &'static str,
}

impl<'a, C, P> OwnershipGuard<'a, C, P>
where
    C: SubResourceStore + ?Sized,
    P: ParentResourceStore + ?Sized,
    P::Resource: ParentResource<Key = <C::Resource as SubResource>::ParentKey>,
{
    /// `resource` names the sub-resource in the 404 message.
    pub fn new(children: &'a C, parents: &'a P, resource: &'static str) -> Self {
        Self {
            children,
            parents,
            resource,
        }
    }

    /// Loads sub-resource `id` and returns it if it belongs to the parent
    /// resource owned by `principal_id`.
    #[instrument(skip(self))]
    pub async fn check(
        &self,
        principal_id: PrincipalId,
        id: i64,
    ) -> Result<C::Resource, OwnershipError> {
        let Some(child) = self.children.get_by_id(id).await? else {
            return Err(OwnershipError::NotFound(self.resource));
        };

        let Some(parent) = self.parents.get_by_principal(principal_id).await? else {
            tracing::debug!("caller has no parent resource");
            return Err(OwnershipError::NotFound(self.resource));
        };

        if child.parent_key() != parent.key() {
            tracing::warn!("ownership mismatch");
            return Err(OwnershipError::NotFound(self.resource));
        }

        Ok(child)
    }
}
