//! # Capabilities
//!
//! Operations an actor may perform, and the default capability set of each
//! role. The booking core checks the role gate here before applying the tier
//! policy.

use lune_profiles::Role;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An operation exposed by the platform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// List cast profiles.
    BrowseCasts,

    /// Open a cast detail page.
    ViewCast,

    /// Add or remove a bookmark.
    ToggleBookmark,

    /// Ask the admins to arrange a meeting with a cast.
    RequestMeeting,

    /// See one's own meeting requests.
    ViewOwnRequests,

    /// Edit one's own cast profile.
    EditOwnCastProfile,

    /// Confirm, cancel or complete meeting requests.
    CoordinateMeetings,

    /// Approve, reject, activate or deactivate accounts.
    ManageUsers,

    /// Change member tiers, cast classifications, featured and paid flags.
    ManageTiers,
}

impl Capability {
    /// Get the string representation of the capability.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::BrowseCasts => "casts:browse",
            Capability::ViewCast => "casts:view",
            Capability::ToggleBookmark => "bookmarks:toggle",
            Capability::RequestMeeting => "meetings:request",
            Capability::ViewOwnRequests => "meetings:view_own",
            Capability::EditOwnCastProfile => "casts:edit_own",
            Capability::CoordinateMeetings => "meetings:coordinate",
            Capability::ManageUsers => "users:manage",
            Capability::ManageTiers => "tiers:manage",
        }
    }

    /// Parse capability from string representation.
    ///
    /// # Example
    ///
    /// ```
    /// use lune_access::Capability;
    ///
    /// assert_eq!(Capability::parse("meetings:coordinate"), Some(Capability::CoordinateMeetings));
    /// assert_eq!(Capability::parse("meetings:delete"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.as_str() == s)
    }

    /// Get all capabilities.
    pub fn all() -> Vec<Self> {
        vec![
            Capability::BrowseCasts,
            Capability::ViewCast,
            Capability::ToggleBookmark,
            Capability::RequestMeeting,
            Capability::ViewOwnRequests,
            Capability::EditOwnCastProfile,
            Capability::CoordinateMeetings,
            Capability::ManageUsers,
            Capability::ManageTiers,
        ]
    }

    /// Check if this capability only reads data.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Capability::BrowseCasts | Capability::ViewCast | Capability::ViewOwnRequests
        )
    }

    /// Check if this capability is reserved for admins.
    pub fn is_admin_only(&self) -> bool {
        matches!(
            self,
            Capability::CoordinateMeetings | Capability::ManageUsers | Capability::ManageTiers
        )
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of capabilities granted to an actor.
///
/// # Example
///
/// ```
/// use lune_access::{Capability, CapabilitySet};
/// use lune_profiles::Role;
///
/// let member = CapabilitySet::for_role(Role::Member);
/// assert!(member.has(Capability::RequestMeeting));
/// assert!(!member.has(Capability::CoordinateMeetings));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilitySet {
    capabilities: HashSet<Capability>,
}

impl CapabilitySet {
    /// Create a new empty set.
    pub fn new() -> Self {
        Self {
            capabilities: HashSet::new(),
        }
    }

    /// Default capabilities of a role.
    ///
    /// Casts cannot browse other casts; admins can browse and view every
    /// cast but do not bookmark or request meetings themselves.
    pub fn for_role(role: Role) -> Self {
        let mut set = Self::new();
        match role {
            Role::Member => set.add_all([
                Capability::BrowseCasts,
                Capability::ViewCast,
                Capability::ToggleBookmark,
                Capability::RequestMeeting,
                Capability::ViewOwnRequests,
            ]),
            Role::Cast => set.add_all([Capability::EditOwnCastProfile]),
            Role::Admin => set.add_all([
                Capability::BrowseCasts,
                Capability::ViewCast,
                Capability::CoordinateMeetings,
                Capability::ManageUsers,
                Capability::ManageTiers,
            ]),
        }
        set
    }

    /// Add a capability.
    pub fn add(&mut self, capability: Capability) {
        self.capabilities.insert(capability);
    }

    /// Add multiple capabilities.
    pub fn add_all<I>(&mut self, capabilities: I)
    where
        I: IntoIterator<Item = Capability>,
    {
        self.capabilities.extend(capabilities);
    }

    /// Remove a capability. Returns `true` if it was present.
    pub fn remove(&mut self, capability: Capability) -> bool {
        self.capabilities.remove(&capability)
    }

    /// Check if the set contains a capability.
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Get the count of capabilities.
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}
