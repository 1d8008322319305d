//! Session commands: login, logout, whoami

use clap::Args;
use datasync_admin::{ApiClient, ApiResult};

#[derive(Args)]
pub struct LoginArgs {
    /// Username (e-mail) to authenticate as
    pub username: String,
    /// Password; prompted when omitted
    #[arg(long)]
    pub password: Option<String>,
}

pub async fn login(client: &ApiClient, args: LoginArgs) -> ApiResult<()> {
    let password = match args.password {
        Some(password) => password,
        None => super::prompt_password("Password")?,
    };

    client.login(&args.username, &password).await?;

    match client.current_session().and_then(|s| s.claims) {
        Some(claims) => println!("Logged in as {} ({})", claims.username, claims.role),
        None => println!("Logged in."),
    }
    Ok(())
}

pub fn logout(client: &ApiClient) -> ApiResult<()> {
    client.logout()?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(client: &ApiClient) -> ApiResult<()> {
    match client.current_session() {
        None => println!("Not logged in."),
        Some(session) => match session.claims {
            Some(claims) => {
                println!("Logged in as {} ({})", claims.username, claims.role);
                if let Some(expires_at) = claims.expires_at() {
                    println!("Session expires at {}", expires_at.format("%Y-%m-%d %H:%M:%S UTC"));
                }
            }
            None => println!("Logged in with an opaque session token."),
        },
    }
    Ok(())
}
