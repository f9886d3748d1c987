//! Minimal server-rendered pages.

use axum::response::Html;

/// Escape text for HTML element content and attribute values.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n</head>\n<body>\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
    ))
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum AuthForm {
    SignIn,
    SignUp,
}

impl AuthForm {
    const fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::SignUp => "Sign Up",
        }
    }

    const fn action(self) -> &'static str {
        match self {
            Self::SignIn => "/login",
            Self::SignUp => "/register",
        }
    }

    const fn alternative(self) -> (&'static str, &'static str) {
        match self {
            Self::SignIn => ("/register", "Don't have an account? Sign up"),
            Self::SignUp => ("/login", "Already have an account? Sign in"),
        }
    }
}

/// Sign-in or sign-up form, optionally with a status message and the
/// previously entered email.
pub(crate) fn auth_form(form: AuthForm, message: Option<&str>, email: &str) -> Html<String> {
    let title = form.title();
    let (alt_href, alt_text) = form.alternative();
    let message = message.map_or_else(String::new, |m| {
        format!("<p role=\"alert\">{}</p>\n", escape(m))
    });
    let body = format!(
        "<h3>{title}</h3>\n{message}\
         <form method=\"post\" action=\"{action}\">\n\
         <label for=\"email\">Email Address</label>\n\
         <input id=\"email\" name=\"email\" type=\"email\" autocomplete=\"email\" required value=\"{email}\">\n\
         <label for=\"password\">Password</label>\n\
         <input id=\"password\" name=\"password\" type=\"password\" required>\n\
         <button type=\"submit\">{title}</button>\n\
         </form>\n\
         <p><a href=\"{alt_href}\">{alt_text}</a></p>",
        action = form.action(),
        email = escape(email),
    );
    layout(title, &body)
}

pub(crate) fn dashboard(email: &str) -> Html<String> {
    let body = format!(
        "<h3>Signed In</h3>\n\
         <p>You are logged in as {email}</p>\n\
         <form method=\"post\" action=\"/logout\">\n\
         <button type=\"submit\">Sign out</button>\n\
         </form>",
        email = escape(email),
    );
    layout("Dashboard", &body)
}
