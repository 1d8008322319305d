//! User management commands

use clap::Subcommand;
use datasync_admin::models::{NewUser, UserRole, UserUpdate};
use datasync_admin::{ApiClient, ApiResult};

#[derive(Subcommand)]
pub enum UsersCmd {
    /// List registered users
    List,
    /// Register a new user
    Create {
        username: String,
        /// Password; prompted when omitted
        #[arg(long)]
        password: Option<String>,
        #[arg(long, default_value = "user")]
        role: UserRole,
    },
    /// Update an existing user; omitted fields stay unchanged
    Update {
        id: i64,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        role: Option<UserRole>,
    },
    /// Delete a user
    Delete { id: i64 },
}

pub async fn run(client: &ApiClient, cmd: UsersCmd) -> ApiResult<()> {
    match cmd {
        UsersCmd::List => list(client).await,
        UsersCmd::Create {
            username,
            password,
            role,
        } => {
            let password = match password {
                Some(password) => password,
                None => super::prompt_password("Password for new user")?,
            };
            client
                .create_user(&NewUser {
                    username: username.clone(),
                    password,
                    role,
                })
                .await?;
            println!("User '{}' created.", username);
            Ok(())
        }
        UsersCmd::Update {
            id,
            username,
            password,
            role,
        } => {
            client
                .update_user(
                    id,
                    UserUpdate {
                        username,
                        password,
                        role,
                    },
                )
                .await?;
            println!("User #{} updated.", id);
            Ok(())
        }
        UsersCmd::Delete { id } => {
            client.delete_user(id).await?;
            println!("User #{} deleted.", id);
            Ok(())
        }
    }
}

async fn list(client: &ApiClient) -> ApiResult<()> {
    let users = client.list_users().await?;
    if users.is_empty() {
        println!("No users registered.");
        return Ok(());
    }

    println!("{:<5} {:<28} ROLE", "ID", "USERNAME");
    for user in &users {
        println!("{:<5} {:<28} {}", user.id, user.username, user.role);
    }
    Ok(())
}
