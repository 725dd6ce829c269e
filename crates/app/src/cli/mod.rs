//! Command-line front end.

use std::io;

use clap::{Parser, Subcommand};
use pizzeria::{money::AmountError, orders::OrderUuid, users::User};
use thiserror::Error;

use crate::{
    auth::AuthError,
    checkout::CheckoutServiceError,
    config::AppConfig,
    context::{AppContext, AppInitError},
    orders::OrdersError,
    storage::StorageError,
};

mod account;
mod cart;
mod checkout;
mod menu;
mod orders;
mod render;

pub use account::{AccountCommand, AccountSubcommand};
pub use cart::{AddArgs, CartCommand, CartSubcommand, LineArgs, SetArgs};
pub use checkout::CheckoutArgs;
pub use menu::MenuArgs;
pub use orders::{ListArgs, OrdersCommand, OrdersSubcommand};

/// Pizzeria storefront
#[derive(Debug, Parser)]
#[command(name = "pizzeria", about = "Pizzeria storefront", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: AppConfig,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse the menu
    Menu(MenuArgs),

    /// Manage the cart
    Cart(CartCommand),

    /// Place an order for everything in the cart
    Checkout(CheckoutArgs),

    /// Order history and administration
    Orders(OrdersCommand),

    /// Sign in, register or sign out
    Account(AccountCommand),
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to start")]
    Init(#[from] AppInitError),

    #[error("no pizza with id {0} on the menu")]
    UnknownProduct(String),

    #[error("sign in first: pizzeria account login --email ... --password ...")]
    NotSignedIn,

    #[error("this command needs an admin account")]
    Forbidden,

    #[error("order {0} not found")]
    OrderNotFound(OrderUuid),

    #[error(transparent)]
    Checkout(#[from] CheckoutServiceError),

    #[error(transparent)]
    Orders(#[from] OrdersError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("failed to save cart")]
    Storage(#[from] StorageError),

    #[error("amount error")]
    Amount(#[from] AmountError),

    #[error("failed to write output")]
    Output(#[from] io::Error),
}

/// Builds the context described by `cli.config` and runs the command.
///
/// # Errors
///
/// Returns an error when start-up or the command fails.
pub async fn execute(cli: Cli, out: &mut (impl io::Write + Send)) -> Result<(), CliError> {
    let mut ctx = AppContext::from_config(&cli.config)?;

    run(cli.command, &mut ctx, out).await
}

/// Runs one command against `ctx`, writing human-readable output to `out`.
///
/// # Errors
///
/// Returns an error when the command fails.
pub async fn run(
    command: Commands,
    ctx: &mut AppContext,
    out: &mut (impl io::Write + Send),
) -> Result<(), CliError> {
    match command {
        Commands::Menu(args) => menu::run(&args, ctx, out),
        Commands::Cart(CartCommand { command }) => cart::run(command, ctx, out),
        Commands::Checkout(args) => checkout::run(args, ctx, out),
        Commands::Orders(OrdersCommand { command }) => orders::run(command, ctx, out),
        Commands::Account(AccountCommand { command }) => account::run(command, ctx, out).await,
    }
}

fn require_user(ctx: &AppContext) -> Result<User, CliError> {
    ctx.current_user().ok_or(CliError::NotSignedIn)
}

fn require_admin(ctx: &AppContext) -> Result<User, CliError> {
    let user = require_user(ctx)?;

    if !user.is_admin {
        return Err(CliError::Forbidden);
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(std::iter::once("pizzeria").chain(args.iter().copied()))
            .expect("arguments should parse")
            .command
    }

    async fn exec(ctx: &mut AppContext, args: &[&str]) -> Result<String, CliError> {
        let mut out = Vec::new();

        run(parse(args), ctx, &mut out).await?;

        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    fn first_order_id(ctx: &AppContext) -> Result<String, &'static str> {
        ctx.orders
            .list()
            .first()
            .map(|order| order.id.to_string())
            .ok_or("no orders")
    }

    #[tokio::test]
    async fn menu_filters_by_category_and_search() -> TestResult {
        let mut ctx = TestContext::new();

        let vegetarian = exec(&mut ctx.app, &["menu", "--category", "vegetarian"]).await?;

        assert!(vegetarian.contains("vegetarian"));
        assert!(!vegetarian.contains("Pepperoni"));

        let nothing = exec(&mut ctx.app, &["menu", "--search", "pineapple-anchovy"]).await?;

        assert!(nothing.contains("No pizzas match"));

        Ok(())
    }

    #[tokio::test]
    async fn cart_changes_survive_a_new_invocation() -> TestResult {
        let mut ctx = TestContext::new();

        exec(&mut ctx.app, &["cart", "add", "1", "--size", "large", "--quantity", "2"]).await?;
        exec(&mut ctx.app, &["cart", "add", "3"]).await?;

        let mut reopened = ctx.reopen();

        assert_eq!(reopened.cart.total_items(), 3);

        let shown = exec(&mut reopened, &["cart", "show"]).await?;

        assert!(shown.contains("3 items"));
        assert!(shown.contains("Total:"));

        exec(&mut reopened, &["cart", "set", "1", "--size", "large", "-1"]).await?;

        assert_eq!(reopened.cart.total_items(), 1);

        exec(&mut reopened, &["cart", "clear"]).await?;

        assert!(ctx.reopen().cart.cart().is_empty());

        Ok(())
    }

    #[test]
    fn zero_quantity_is_rejected_at_parse_time() {
        let result = Cli::try_parse_from(["pizzeria", "cart", "add", "1", "--quantity", "0"]);

        assert!(result.is_err(), "expected parse error, got {result:?}");
    }

    #[tokio::test]
    async fn adding_unknown_product_fails() {
        let mut ctx = TestContext::new();

        let result = exec(&mut ctx.app, &["cart", "add", "99"]).await;

        assert!(
            matches!(result, Err(CliError::UnknownProduct(ref id)) if id == "99"),
            "expected UnknownProduct, got {result:?}"
        );
    }

    #[tokio::test]
    async fn checkout_requires_sign_in() -> TestResult {
        let mut ctx = TestContext::new();

        exec(&mut ctx.app, &["cart", "add", "2"]).await?;

        let result = exec(
            &mut ctx.app,
            &[
                "checkout",
                "--first-name",
                "A",
                "--last-name",
                "B",
                "--phone",
                "1",
                "--delivery",
                "pickup",
            ],
        )
        .await;

        assert!(
            matches!(result, Err(CliError::Checkout(CheckoutServiceError::NotSignedIn))),
            "expected NotSignedIn, got {result:?}"
        );
        assert_eq!(ctx.app.cart.total_items(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn customer_checkout_then_admin_advances() -> TestResult {
        let mut ctx = TestContext::customer().await;

        exec(&mut ctx.app, &["cart", "add", "2", "--size", "small"]).await?;

        let receipt = exec(
            &mut ctx.app,
            &[
                "checkout",
                "--first-name",
                "Test",
                "--last-name",
                "User",
                "--phone",
                "555-0100",
                "--address",
                "1 Main St",
                "--city",
                "Springfield",
                "--zip-code",
                "49007",
                "--instructions",
                "Ring twice",
            ],
        )
        .await?;

        assert!(receipt.contains("Ring twice"));
        assert!(receipt.contains("[>] processing  [ ] preparing"));
        assert!(ctx.app.cart.cart().is_empty());

        let mine = exec(&mut ctx.app, &["orders", "mine"]).await?;
        let id = first_order_id(&ctx.app)?;

        assert!(mine.contains(&id));

        let forbidden = exec(&mut ctx.app, &["orders", "advance", id.as_str()]).await;

        assert!(
            matches!(forbidden, Err(CliError::Forbidden)),
            "expected Forbidden, got {forbidden:?}"
        );

        exec(&mut ctx.app, &["account", "logout"]).await?;
        exec(
            &mut ctx.app,
            &["account", "login", "--email", "admin@pizza.com", "--password", "admin123"],
        )
        .await?;

        let advanced = exec(&mut ctx.app, &["orders", "advance", id.as_str()]).await?;

        assert!(advanced.contains("preparing"));

        let shown = exec(&mut ctx.app, &["orders", "show", id.as_str()]).await?;

        assert!(shown.contains("[x] processing  [>] preparing  [ ] ready"));

        let listed = exec(&mut ctx.app, &["orders", "list", "--status", "preparing"]).await?;

        assert!(listed.contains("1 of 1 orders"));

        exec(&mut ctx.app, &["orders", "status", id.as_str(), "completed"]).await?;

        let result = exec(&mut ctx.app, &["orders", "advance", id.as_str()]).await;

        assert!(
            matches!(result, Err(CliError::Orders(OrdersError::AlreadyCompleted(_)))),
            "expected AlreadyCompleted, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn customers_cannot_see_each_others_orders() -> TestResult {
        let mut ctx = TestContext::admin().await;

        exec(&mut ctx.app, &["cart", "add", "5"]).await?;
        exec(
            &mut ctx.app,
            &[
                "checkout",
                "--first-name",
                "A",
                "--last-name",
                "B",
                "--phone",
                "1",
                "--delivery",
                "pickup",
            ],
        )
        .await?;

        let id = first_order_id(&ctx.app)?;

        exec(&mut ctx.app, &["account", "logout"]).await?;
        exec(
            &mut ctx.app,
            &["account", "login", "--email", "user@pizza.com", "--password", "user123"],
        )
        .await?;

        let result = exec(&mut ctx.app, &["orders", "show", id.as_str()]).await;

        assert!(
            matches!(result, Err(CliError::OrderNotFound(_))),
            "expected OrderNotFound, got {result:?}"
        );

        let mine = exec(&mut ctx.app, &["orders", "mine"]).await?;

        assert!(mine.contains("no orders yet"));

        Ok(())
    }

    #[tokio::test]
    async fn whoami_reports_role() -> TestResult {
        let mut ctx = TestContext::admin().await;

        let out = exec(&mut ctx.app, &["account", "whoami"]).await?;

        assert!(out.contains("admin@pizza.com"));
        assert!(out.contains("(admin)"));

        Ok(())
    }

    #[tokio::test]
    async fn registered_account_signs_in_on_a_later_invocation() -> TestResult {
        let mut ctx = TestContext::new();

        exec(
            &mut ctx.app,
            &[
                "account", "register", "--name", "Pat", "--email", "pat@x.io", "--password",
                "pw123",
            ],
        )
        .await?;
        exec(&mut ctx.app, &["account", "logout"]).await?;

        let mut reopened = ctx.reopen();

        let out = exec(
            &mut reopened,
            &["account", "login", "--email", "pat@x.io", "--password", "pw123"],
        )
        .await?;

        assert!(out.contains("Signed in as Pat"));

        let result = exec(
            &mut ctx.reopen(),
            &[
                "account", "register", "--name", "Pat 2", "--email", "pat@x.io", "--password",
                "other",
            ],
        )
        .await;

        assert!(
            matches!(result, Err(CliError::Auth(AuthError::EmailTaken(_)))),
            "expected EmailTaken, got {result:?}"
        );

        Ok(())
    }
}
