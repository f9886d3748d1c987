//! Route authorization policy.
//!
//! Every request (except `/health`) is classified by path and by whether a
//! valid session is attached, then run through an ordered rule table. The
//! first matching rule wins. Paths that are neither auth pages nor dashboard
//! paths are never enumerated; they fall through to the last rule.
//!
//! One trailing slash is ignored, so `/login/` is the sign-in page. The
//! dashboard area is `/`, `/dashboard` and anything below `/dashboard/`.

/// Path prefix of the dashboard area. The bare root `/` also counts.
pub const DASHBOARD_PREFIX: &str = "/dashboard";
pub const DASHBOARD_ROOT: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    Dashboard,
    Login,
    Register,
    Other,
}

impl PathClass {
    #[must_use]
    pub fn classify(path: &str) -> Self {
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };
        match path {
            LOGIN_PATH => Self::Login,
            REGISTER_PATH => Self::Register,
            DASHBOARD_ROOT => Self::Dashboard,
            _ if is_dashboard_path(path) => Self::Dashboard,
            _ => Self::Other,
        }
    }

    const fn is_auth_page(self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

fn is_dashboard_path(path: &str) -> bool {
    path.strip_prefix(DASHBOARD_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Outcome of the policy for one request.
///
/// `Deny` is a block, not a redirect: the HTTP layer answers it with
/// `401 Unauthorized` and never infers a target for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectTo(&'static str),
    Deny,
}

struct Rule {
    name: &'static str,
    applies: fn(bool, PathClass) -> bool,
    decision: fn(bool) -> Decision,
}

const RULES: [Rule; 4] = [
    Rule {
        name: "anonymous-auth-page",
        applies: |authenticated, class| !authenticated && class.is_auth_page(),
        decision: |_| Decision::Allow,
    },
    Rule {
        name: "signed-in-auth-page",
        applies: |authenticated, class| authenticated && class.is_auth_page(),
        decision: |_| Decision::RedirectTo(DASHBOARD_ROOT),
    },
    Rule {
        name: "anonymous-dashboard",
        applies: |authenticated, class| !authenticated && class == PathClass::Dashboard,
        decision: |_| Decision::RedirectTo(LOGIN_PATH),
    },
    Rule {
        name: "fallthrough",
        applies: |_, _| true,
        decision: |authenticated| {
            if authenticated {
                Decision::Allow
            } else {
                Decision::Deny
            }
        },
    },
];

/// Decide what happens to a request for `path`.
#[must_use]
pub fn decide(is_authenticated: bool, path: &str) -> Decision {
    let class = PathClass::classify(path);
    for rule in &RULES {
        if (rule.applies)(is_authenticated, class) {
            let decision = (rule.decision)(is_authenticated);
            tracing::trace!(rule = rule.name, ?class, ?decision, "authorization rule matched");
            return decision;
        }
    }
    // The fallthrough rule always applies.
    Decision::Deny
}
