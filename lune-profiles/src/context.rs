//! Request-scoped actor context
//!
//! Every core operation receives the authenticated actor explicitly through a
//! [`RequestContext`] instead of reading ambient session state. The identity
//! provider is trusted: nothing here re-verifies the user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::Role;

/// The authenticated actor behind a request, tagged by role.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use lune_profiles::{Actor, Role};
///
/// let actor = Actor::from_role(Uuid::now_v7(), Role::Admin);
/// assert!(actor.is_admin());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Actor {
    /// A member account
    Member {
        /// User ID
        user_id: Uuid,
    },

    /// A cast account
    Cast {
        /// User ID
        user_id: Uuid,
    },

    /// An admin account
    Admin {
        /// User ID
        user_id: Uuid,
    },
}

impl Actor {
    /// Build the actor variant for a user ID and role.
    pub fn from_role(user_id: Uuid, role: Role) -> Self {
        match role {
            Role::Member => Actor::Member { user_id },
            Role::Cast => Actor::Cast { user_id },
            Role::Admin => Actor::Admin { user_id },
        }
    }

    /// The acting user's ID.
    pub fn user_id(&self) -> Uuid {
        match self {
            Actor::Member { user_id } | Actor::Cast { user_id } | Actor::Admin { user_id } => {
                *user_id
            }
        }
    }

    /// The acting user's role.
    pub fn role(&self) -> Role {
        match self {
            Actor::Member { .. } => Role::Member,
            Actor::Cast { .. } => Role::Cast,
            Actor::Admin { .. } => Role::Admin,
        }
    }

    /// Check if the actor is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Actor::Admin { .. })
    }
}

/// Context for a single request.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use lune_profiles::{RequestContext, Role};
///
/// let user_id = Uuid::now_v7();
/// let ctx = RequestContext::new(user_id, Role::Member).with_correlation_id("req-42");
/// assert_eq!(ctx.user_id(), user_id);
/// assert_eq!(ctx.correlation_id.as_deref(), Some("req-42"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Authenticated actor
    pub actor: Actor,

    /// Session the request belongs to, when known
    pub session_id: Option<String>,

    /// Request correlation ID for tracing
    pub correlation_id: Option<String>,

    /// When the request was received
    pub received_at: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for an authenticated user.
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self::for_actor(Actor::from_role(user_id, role))
    }

    /// Creates a context for an existing actor.
    pub fn for_actor(actor: Actor) -> Self {
        Self {
            actor,
            session_id: None,
            correlation_id: None,
            received_at: Utc::now(),
        }
    }

    /// Set the session ID.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Set the correlation ID.
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// The acting user's ID.
    pub fn user_id(&self) -> Uuid {
        self.actor.user_id()
    }

    /// The acting user's role.
    pub fn role(&self) -> Role {
        self.actor.role()
    }
}
