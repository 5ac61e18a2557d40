use revisit_domain::ReviewUrl;

pub const REVIEW_EMAIL_SUBJECT: &str = "[Revisit] Your review list for today has arrived";
pub const DEVICE_AUTH_EMAIL_SUBJECT: &str = "[Revisit] Please complete device authentication";

/// The body of the daily digest email, one link per due url
pub fn render_review_email(urls: &[ReviewUrl]) -> String {
    let items = urls
        .iter()
        .map(|url| format!("<li><a href=\"{}\">{}</a></li>", url, url))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<h2>Time to review!</h2>
<p>These are the pages you planned to revisit today:</p>
<ul>
{}
</ul>"#,
        items
    )
}

/// The body of the device activation email. The link expires a few
/// minutes after the device was registered.
pub fn render_device_auth_email(auth_url: &str) -> String {
    format!(
        r#"<h2>Confirm this device</h2>
<p>A new device was registered for your account. Follow the link below to activate it:</p>
<p><a href="{}">{}</a></p>
<p>If you did not register this device you can ignore this email.</p>"#,
        auth_url, auth_url
    )
}
