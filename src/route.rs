use serde::{Deserialize, Serialize};

/// The fixed set of routes the shell knows about. The preview surface and
/// the navigation layer both draw from this enum, so an out-of-set path is
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppRoute {
    Landing,
    Workspace,
    SignIn,
    SignUp,
    ForgotPassword,
    Pricing,
}

impl AppRoute {
    pub const ALL: [AppRoute; 6] = [
        AppRoute::Landing,
        AppRoute::Workspace,
        AppRoute::SignIn,
        AppRoute::SignUp,
        AppRoute::ForgotPassword,
        AppRoute::Pricing,
    ];

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(AppRoute::Landing),
            "/workspace" => Some(AppRoute::Workspace),
            "/auth/signin" => Some(AppRoute::SignIn),
            "/auth/signup" => Some(AppRoute::SignUp),
            "/auth/forgot-password" => Some(AppRoute::ForgotPassword),
            "/pricing" => Some(AppRoute::Pricing),
            _ => None,
        }
    }

    pub fn as_path(self) -> &'static str {
        match self {
            AppRoute::Landing => "/",
            AppRoute::Workspace => "/workspace",
            AppRoute::SignIn => "/auth/signin",
            AppRoute::SignUp => "/auth/signup",
            AppRoute::ForgotPassword => "/auth/forgot-password",
            AppRoute::Pricing => "/pricing",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AppRoute::Landing => "Home",
            AppRoute::Workspace => "Workspace",
            AppRoute::SignIn => "Sign in",
            AppRoute::SignUp => "Sign up",
            AppRoute::ForgotPassword => "Forgot password",
            AppRoute::Pricing => "Pricing",
        }
    }

    pub fn requires_auth(self) -> bool {
        matches!(self, AppRoute::Workspace)
    }

    /// Where to land when a guarded route is requested without a session.
    pub fn auth_failure_redirect() -> Self {
        AppRoute::SignIn
    }

    /// Where to land after the identity gate reports a session.
    pub fn auth_success_redirect() -> Self {
        AppRoute::Workspace
    }
}

#[cfg(test)]
mod tests {
    use super::AppRoute;

    #[test]
    fn every_route_round_trips_through_its_path() {
        for route in AppRoute::ALL {
            assert_eq!(AppRoute::from_path(route.as_path()), Some(route));
        }
    }

    #[test]
    fn unknown_paths_do_not_parse() {
        assert_eq!(AppRoute::from_path("/admin"), None);
        assert_eq!(AppRoute::from_path(""), None);
        assert_eq!(AppRoute::from_path("/workspace/"), None);
    }

    #[test]
    fn only_the_workspace_is_guarded() {
        for route in AppRoute::ALL {
            assert_eq!(route.requires_auth(), route == AppRoute::Workspace);
        }
    }

    #[test]
    fn auth_redirect_targets() {
        assert_eq!(AppRoute::auth_failure_redirect(), AppRoute::SignIn);
        assert_eq!(AppRoute::auth_success_redirect(), AppRoute::Workspace);
    }
}
