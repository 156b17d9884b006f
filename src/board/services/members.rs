//! Directory profiles and role-guarded membership changes.

use super::{
    Actor, BoardServiceError, BoardServiceResult,
    access::require_manager,
};
use crate::board::{
    domain::{EmailAddress, Membership, Profile, ProjectId, ProjectRole, UserId, normalize_email},
    ports::BoardStore,
};
use crate::config::MemberSearchSettings;
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

const MANAGE_MEMBERS_DENIED: &str = "only project owners or admins can manage members";

/// Membership and user directory service.
#[derive(Clone)]
pub struct MembershipService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    search: MemberSearchSettings,
}

impl<S, C> MembershipService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    /// Creates a new membership service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>, search: MemberSearchSettings) -> Self {
        Self {
            store,
            clock,
            search,
        }
    }

    /// Creates or refreshes the caller's directory profile.
    ///
    /// The display name is the supplied name, else the stored name, else the
    /// email local part, else `User`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the caller is anonymous, the email
    /// is invalid, or storage fails.
    pub async fn ensure_profile(
        &self,
        actor: Actor,
        email: &str,
        name: Option<&str>,
        avatar_url: Option<String>,
    ) -> BoardServiceResult<Profile> {
        let user_id = actor.user_id()?;
        let address = EmailAddress::new(email)?;
        let existing = self.store.find_profile(user_id).await?;

        let supplied = name.map(str::trim).filter(|value| !value.is_empty());
        let stored = existing.as_ref().map(Profile::name);
        let profile = Profile::new(user_id, address, supplied.or(stored), avatar_url);
        self.store.upsert_profile(&profile).await?;
        Ok(profile)
    }

    /// Adds the user registered under `email` to the project.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Forbidden`] unless the caller is an owner
    /// or admin (admins cannot invite owners),
    /// [`BoardServiceError::ProfileNotFound`] when nobody is registered under
    /// the email, and [`BoardServiceError::AlreadyMember`] when the user
    /// already belongs to the project.
    pub async fn invite_member(
        &self,
        actor: Actor,
        project_id: ProjectId,
        email: &str,
        role: ProjectRole,
    ) -> BoardServiceResult<Membership> {
        let requester_id = actor.user_id()?;
        let requester =
            require_manager(&*self.store, project_id, requester_id, MANAGE_MEMBERS_DENIED).await?;
        if requester.role() == ProjectRole::Admin && role == ProjectRole::Owner {
            return Err(BoardServiceError::forbidden("admins cannot invite owners"));
        }

        let address = EmailAddress::new(email)
            .map_err(|_| BoardServiceError::ProfileNotFound(normalize_email(email)))?;
        let profile = self
            .store
            .find_profile_by_email(&address)
            .await?
            .ok_or_else(|| BoardServiceError::ProfileNotFound(address.to_string()))?;
        if self
            .store
            .find_membership(project_id, profile.user_id())
            .await?
            .is_some()
        {
            return Err(BoardServiceError::AlreadyMember);
        }

        let membership = Membership::new(
            project_id,
            profile.user_id(),
            role,
            requester_id,
            &*self.clock,
        );
        self.store.insert_membership(&membership).await?;
        info!(project_id = %project_id, user_id = %profile.user_id(), role = %role, "member invited");
        Ok(membership)
    }

    /// Changes a member's role.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::MemberNotFound`] for unknown targets,
    /// [`BoardServiceError::Forbidden`] when the caller may not make the
    /// change, and [`BoardServiceError::LastOwner`] when it would demote the
    /// only owner.
    pub async fn update_member_role(
        &self,
        actor: Actor,
        project_id: ProjectId,
        target_id: UserId,
        role: ProjectRole,
    ) -> BoardServiceResult<Membership> {
        let requester_id = actor.user_id()?;
        let requester =
            require_manager(&*self.store, project_id, requester_id, MANAGE_MEMBERS_DENIED).await?;
        let mut target = self.require_member(project_id, target_id).await?;

        if requester.role() == ProjectRole::Admin {
            if target.role() == ProjectRole::Owner {
                return Err(BoardServiceError::forbidden("admins cannot modify owners"));
            }
            if role == ProjectRole::Owner {
                return Err(BoardServiceError::forbidden(
                    "admins cannot promote members to owner",
                ));
            }
        }
        if target.role() == ProjectRole::Owner
            && role != ProjectRole::Owner
            && self.owner_count(project_id).await? <= 1
        {
            return Err(BoardServiceError::LastOwner("demoted"));
        }

        target.set_role(role);
        self.store.update_membership(&target).await?;
        Ok(target)
    }

    /// Removes a member from the project.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::MemberNotFound`] for unknown targets,
    /// [`BoardServiceError::Forbidden`] when an admin targets an owner, and
    /// [`BoardServiceError::LastOwner`] when removing the only owner.
    pub async fn remove_member(
        &self,
        actor: Actor,
        project_id: ProjectId,
        target_id: UserId,
    ) -> BoardServiceResult<()> {
        let requester_id = actor.user_id()?;
        let requester =
            require_manager(&*self.store, project_id, requester_id, MANAGE_MEMBERS_DENIED).await?;
        let target = self.require_member(project_id, target_id).await?;

        if requester.role() == ProjectRole::Admin && target.role() == ProjectRole::Owner {
            return Err(BoardServiceError::forbidden("admins cannot remove owners"));
        }
        if target.role() == ProjectRole::Owner && self.owner_count(project_id).await? <= 1 {
            return Err(BoardServiceError::LastOwner("removed"));
        }

        self.store.delete_membership(project_id, target_id).await?;
        info!(project_id = %project_id, user_id = %target_id, "member removed");
        Ok(())
    }

    /// Finds registered users to invite by email prefix.
    ///
    /// Queries shorter than the configured minimum return nothing. Current
    /// members and the caller are excluded from the configured number of
    /// candidates.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Forbidden`] unless the caller is an owner
    /// or admin.
    pub async fn search_by_email(
        &self,
        actor: Actor,
        project_id: ProjectId,
        query: &str,
    ) -> BoardServiceResult<Vec<Profile>> {
        let requester_id = actor.user_id()?;
        require_manager(
            &*self.store,
            project_id,
            requester_id,
            "only project owners or admins can invite members",
        )
        .await?;

        let prefix = normalize_email(query);
        if prefix.chars().count() < self.search.min_query_chars {
            return Ok(Vec::new());
        }

        let members = self.store.list_project_memberships(project_id).await?;
        let candidates = self
            .store
            .search_profiles_by_email_prefix(&prefix, self.search.limit)
            .await?;
        Ok(candidates
            .into_iter()
            .filter(|profile| {
                profile.user_id() != requester_id
                    && !members
                        .iter()
                        .any(|member| member.user_id() == profile.user_id())
            })
            .collect())
    }

    async fn require_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> BoardServiceResult<Membership> {
        self.store
            .find_membership(project_id, user_id)
            .await?
            .ok_or(BoardServiceError::MemberNotFound)
    }

    async fn owner_count(&self, project_id: ProjectId) -> BoardServiceResult<usize> {
        Ok(self
            .store
            .list_project_memberships(project_id)
            .await?
            .iter()
            .filter(|member| member.role() == ProjectRole::Owner)
            .count())
    }
}
