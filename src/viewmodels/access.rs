// ============================================================================
// ACCESS - Guardas de ruta por sesión y rol
// ============================================================================

use crate::models::{Role, Session};
use crate::utils::constants::{DASHBOARD_ROUTE, FORBIDDEN_ROUTE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Session still being restored; show a placeholder, decide later.
    Pending,
    RedirectToLogin,
    Denied { redirect_to: String },
    Granted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    roles: Vec<Role>,
    require_all: bool,
    denied_redirect: String,
}

impl AccessPolicy {
    /// Any logged-in user with a profile.
    pub fn authenticated() -> Self {
        Self {
            roles: Vec::new(),
            require_all: false,
            denied_redirect: FORBIDDEN_ROUTE.to_string(),
        }
    }

    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
            ..Self::authenticated()
        }
    }

    /// Admin pages send everyone else back to the dashboard.
    pub fn admin_only() -> Self {
        Self::roles([Role::Admin]).redirect_to(DASHBOARD_ROUTE)
    }

    pub fn require_all(mut self) -> Self {
        self.require_all = true;
        self
    }

    pub fn redirect_to(mut self, route: &str) -> Self {
        self.denied_redirect = route.to_string();
        self
    }

    fn allows(&self, role: Option<&Role>) -> bool {
        let Some(role) = role else {
            return false;
        };
        if self.roles.is_empty() {
            return true;
        }
        if self.require_all {
            self.roles.iter().all(|required| required == role)
        } else {
            self.roles.iter().any(|required| required == role)
        }
    }
}

pub fn check_access(session: &Session, policy: &AccessPolicy) -> Access {
    if session.is_loading {
        return Access::Pending;
    }
    let Some(user) = session.user.as_ref().filter(|_| session.token.is_some()) else {
        return Access::RedirectToLogin;
    };
    if !policy.allows(user.role.as_ref()) {
        return Access::Denied {
            redirect_to: policy.denied_redirect.clone(),
        };
    }
    Access::Granted
}

/// Where the login page should send an already-authenticated visitor.
pub fn login_redirect(session: &Session) -> Option<&'static str> {
    if !session.is_loading && session.has_profile() {
        Some(DASHBOARD_ROUTE)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Profile;

    fn session_with(role: Option<Role>) -> Session {
        Session {
            token: Some("t".into()),
            user: Some(Profile {
                id: 1,
                role,
                ..Profile::default()
            }),
            is_loading: false,
        }
    }

    #[test]
    fn restoring_session_is_pending() {
        assert_eq!(check_access(&Session::restoring(), &AccessPolicy::authenticated()), Access::Pending);
        assert_eq!(login_redirect(&Session::restoring()), None);
    }

    #[test]
    fn anonymous_goes_to_login() {
        assert_eq!(check_access(&Session::default(), &AccessPolicy::authenticated()), Access::RedirectToLogin);
    }

    #[test]
    fn role_gate_decisions() {
        let nurse = session_with(Some(Role::Infirmier));
        let clinicians = AccessPolicy::roles([Role::Medecin, Role::Infirmier]);
        assert_eq!(check_access(&nurse, &clinicians), Access::Granted);
        assert_eq!(
            check_access(&nurse, &AccessPolicy::roles([Role::Medecin])),
            Access::Denied { redirect_to: "/403".into() }
        );
        assert_eq!(
            check_access(&nurse, &AccessPolicy::admin_only()),
            Access::Denied { redirect_to: "/dashboard".into() }
        );
        assert_eq!(
            check_access(&nurse, &clinicians.require_all()),
            Access::Denied { redirect_to: "/403".into() }
        );
    }

    #[test]
    fn user_without_role_is_denied_even_for_open_pages() {
        let session = session_with(None);
        assert!(matches!(
            check_access(&session, &AccessPolicy::authenticated()),
            Access::Denied { .. }
        ));
        assert_eq!(login_redirect(&session), Some("/dashboard"));
    }
}
