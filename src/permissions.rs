//! Role-based access control.
//!
//! Every decision here is a pure function of the user's role and the target
//! page or resource, recomputed on each check. A missing user, a missing
//! role, or a role the client does not recognize denies everything.
//!
//! Update and delete permission are always identical to create permission
//! for a given (user, resource) pair; the model does not distinguish them.

use crate::models::{Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Items,
    Inventory,
    Sales,
    Reports,
    Categories,
    Brands,
    Users,
    Roles,
}

#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub path: &'static str,
    pub title: &'static str,
}

/// Candidate navigation entries, in display order. The visible menu is this
/// list filtered through [`can_view_page`].
pub const NAV_PAGES: [Page; 8] = [
    Page { path: "/", title: "Dashboard" },
    Page { path: "/inventory", title: "Inventory" },
    Page { path: "/sales", title: "Sales" },
    Page { path: "/reports", title: "Reports" },
    Page { path: "/categories", title: "Categories" },
    Page { path: "/brands", title: "Brands" },
    Page { path: "/users", title: "Users" },
    Page { path: "/roles", title: "Roles" },
];

fn role_of(user: Option<&User>) -> Option<Role> {
    user.and_then(|user| user.role)
}

pub fn can_view_page(user: Option<&User>, path: &str) -> bool {
    match role_of(user) {
        Some(Role::SuperUser | Role::Admin) => true,
        Some(Role::Seller) => matches!(path, "/" | "/sales" | "/inventory" | "/reports"),
        Some(Role::Viewer) => matches!(path, "/" | "/sales" | "/reports"),
        Some(Role::Unknown) | None => false,
    }
}

pub fn can_create(user: Option<&User>, resource: Resource) -> bool {
    match role_of(user) {
        Some(Role::SuperUser) => true,
        Some(Role::Admin) => !matches!(resource, Resource::Roles | Resource::Users),
        Some(Role::Seller | Role::Viewer | Role::Unknown) | None => false,
    }
}

// Same permission as create.
pub fn can_update(user: Option<&User>, resource: Resource) -> bool {
    can_create(user, resource)
}

// Same permission as create.
pub fn can_delete(user: Option<&User>, resource: Resource) -> bool {
    can_create(user, resource)
}

pub fn visible_pages(user: Option<&User>) -> Vec<Page> {
    NAV_PAGES
        .into_iter()
        .filter(|page| can_view_page(user, page.path))
        .collect()
}

/// Outcome of a navigation attempt. Authentication is checked before
/// authorization: an anonymous request for a forbidden page still goes to
/// the login screen, not home.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
    RedirectHome,
}

pub fn authorize(user: Option<&User>, path: &str) -> RouteDecision {
    if user.is_none() {
        return RouteDecision::RedirectToLogin;
    }
    if can_view_page(user, path) {
        RouteDecision::Allow
    } else {
        RouteDecision::RedirectHome
    }
}
