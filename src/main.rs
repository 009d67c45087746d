use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bluelog::bootstrap;
use bluelog::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Cli::parse();
    let profile = args.profile.as_deref();

    match args.command {
        None | Some(Command::Serve) => {
            let app = bootstrap::create_app(profile).await?;
            bootstrap::serve(app).await
        }
        Some(Command::Forge {
            category,
            post,
            comment,
        }) => {
            let app = bootstrap::create_app(profile).await?;
            cli::forge(
                &app.state.pool,
                cli::ForgeOptions {
                    categories: category,
                    posts: post,
                    comments: comment,
                },
            )
            .await
        }
        Some(Command::Init { username, password }) => {
            let username = match username {
                Some(username) => username,
                None => prompt("Username: ")?,
            };
            let password = match password {
                Some(password) => password,
                None => prompt_password()?,
            };

            let app = bootstrap::create_app(profile).await?;
            cli::init(&app.state.pool, &username, &password).await
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    use std::io::Write;

    print!("{}", label);
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line.trim().to_string())
}

/// Masked password prompt with confirmation.
fn prompt_password() -> Result<String> {
    let password =
        rpassword::prompt_password("Password: ").context("Failed to read password")?;
    let confirmation =
        rpassword::prompt_password("Confirm password: ").context("Failed to read password")?;

    if password != confirmation {
        bail!("The passwords do not match");
    }
    Ok(password)
}
