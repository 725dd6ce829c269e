//! Pizzeria storefront CLI

use std::{error::Error, io, process};

use pizzeria_app::{
    cli::{self, Cli},
    observability,
};

#[tokio::main]
pub async fn main() {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => error.exit(),
    };

    if let Err(error) = observability::init_subscriber(&cli.config.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(error) = cli::execute(cli, &mut io::stdout()).await {
        report(&error);
        process::exit(1);
    }
}

fn report(error: &dyn Error) {
    eprintln!("error: {error}");

    let mut source = error.source();

    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
