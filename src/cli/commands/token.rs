use serde_json::json;
use uuid::Uuid;

use crate::auth::JwtSessionAuthenticator;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn handle(
    config: &AppConfig,
    user: Uuid,
    email: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let authenticator = JwtSessionAuthenticator::from_config(&config.security);
    let token = authenticator.issue_token(user, email)?;

    match output_format {
        OutputFormat::Text => println!("{}", token),
        OutputFormat::Json => println!(
            "{}",
            json!({
                "token": token,
                "user_id": user,
                "cookie": authenticator.cookie_name(),
                "expires_in_hours": config.security.jwt_expiry_hours,
            })
        ),
    }

    Ok(())
}
