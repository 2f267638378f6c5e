use std::fmt::Write;

use meetai_models::user::User;

pub fn render_account(user: Option<&User>) -> String {
    let mut out = String::new();

    let Some(user) = user else {
        let _ = writeln!(out, "Not signed in");
        let _ = writeln!(
            out,
            "  Run `meetai sign-in` to connect Google Calendar and Gmail"
        );
        return out;
    };

    let _ = writeln!(out, "Welcome, {}", user.first_name());
    let _ = writeln!(out, "  {}", user.name);
    let _ = writeln!(out, "  {}", user.email);
    let _ = writeln!(out);
    let _ = writeln!(out, "Connected Services");
    let _ = writeln!(out, "  • Google Calendar");
    let _ = writeln!(out, "  • Gmail");

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_in_greets_by_first_name() {
        let user = User {
            id: "42".to_owned(),
            email: "ada@example.com".to_owned(),
            name: "Ada Lovelace".to_owned(),
            picture: String::new(),
        };

        let rendered = render_account(Some(&user));

        assert!(rendered.starts_with("Welcome, Ada\n"));
        assert!(rendered.contains("ada@example.com"));
        assert!(rendered.contains("Google Calendar"));
    }

    #[test]
    fn signed_out_shows_hint() {
        let rendered = render_account(None);

        assert!(rendered.contains("Not signed in"));
        assert!(rendered.contains("meetai sign-in"));
    }
}
