//! `pizzeria account`

use std::io;

use clap::{Args, Subcommand};

use crate::{
    auth::{Credentials, Registration},
    cli::{CliError, require_user},
    context::AppContext,
};

#[derive(Debug, Args)]
pub struct AccountCommand {
    #[command(subcommand)]
    pub command: AccountSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum AccountSubcommand {
    /// Sign in
    Login {
        /// Email address
        #[arg(long)]
        email: String,

        /// Password
        #[arg(long, env = "PIZZERIA_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        /// Display name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Password
        #[arg(long, env = "PIZZERIA_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,
}

pub(super) async fn run(
    command: AccountSubcommand,
    ctx: &AppContext,
    out: &mut (impl io::Write + Send),
) -> Result<(), CliError> {
    match command {
        AccountSubcommand::Login { email, password } => {
            let user = ctx.auth.login(Credentials::new(email, password)).await?;

            writeln!(out, "Signed in as {} <{}>", user.name, user.email)?;
        }
        AccountSubcommand::Register {
            name,
            email,
            password,
        } => {
            let user = ctx
                .auth
                .register(Registration::new(name, email, password))
                .await?;

            writeln!(out, "Welcome, {}! You are signed in.", user.name)?;
        }
        AccountSubcommand::Logout => {
            ctx.auth.logout().await?;

            writeln!(out, "Signed out")?;
        }
        AccountSubcommand::Whoami => {
            let user = require_user(ctx)?;
            let role = if user.is_admin { "admin" } else { "customer" };

            writeln!(out, "{} <{}> ({role})", user.name, user.email)?;
        }
    }

    Ok(())
}
