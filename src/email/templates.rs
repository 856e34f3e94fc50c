//! Invite email content.

use crate::role::Role;

/// Rendered subject/text/html for an invite email.
pub struct InviteEmailContent {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl InviteEmailContent {
    /// Renders the invite email for a role and redemption URL.
    pub fn new(role: Role, invite_url: &str) -> Self {
        Self {
            subject: "You've been invited to join a team".to_string(),
            text: Self::text_template(role, invite_url),
            html: Self::html_template(role, invite_url),
        }
    }

    fn text_template(role: Role, invite_url: &str) -> String {
        format!(
            r#"You've been invited to join a team with the {} role.

Accept the invitation here: {}

If you weren't expecting this invitation, you can ignore this email.
The invitation only works for the email address it was sent to."#,
            role, invite_url
        )
    }

    fn html_template(role: Role, invite_url: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; background: #f5f5f5; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 40px 20px; }}
        .card {{ background: white; border-radius: 8px; padding: 40px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }}
        h1 {{ color: #1a1a1a; margin-top: 0; font-size: 24px; }}
        .role {{ font-weight: bold; }}
        .button {{ display: inline-block; padding: 12px 24px; background: #2563eb; color: #fff; border-radius: 6px; text-decoration: none; margin: 24px 0; }}
        .footer {{ margin-top: 32px; padding-top: 20px; border-top: 1px solid #eee; color: #888; font-size: 12px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="card">
            <h1>You've been invited</h1>
            <p>You've been invited to join a team with the <span class="role">{}</span> role.</p>
            <p><a class="button" href="{}">Accept invitation</a></p>
            <div class="footer">
                <p>If you weren't expecting this invitation, you can ignore this email.</p>
                <p>The invitation only works for the email address it was sent to.</p>
            </div>
        </div>
    </div>
</body>
</html>"#,
            role, invite_url
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_contains_url_and_role() {
        let url = "https://app.example.com/invite/accept?token=tok123";
        let content = InviteEmailContent::new(Role::Edit, url);

        assert!(content.text.contains(url));
        assert!(content.text.contains("edit"));
        assert!(content.html.contains(url));
        assert!(content.html.contains("edit"));
    }

    #[test]
    fn test_subject() {
        let content = InviteEmailContent::new(Role::View, "https://x");
        assert_eq!(content.subject, "You've been invited to join a team");
    }

    #[test]
    fn test_html_is_a_document() {
        let content = InviteEmailContent::new(Role::Admin, "https://x");
        assert!(content.html.contains("<!DOCTYPE html>"));
    }
}
