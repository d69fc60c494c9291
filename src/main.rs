//! Cartstore CLI

use std::{process::ExitCode, sync::Arc};

use rusty_money::{Money, iso::Currency};
use tabled::{builder::Builder, settings::Style};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cartstore::{
    cart::{CartStore, CartSummary, Outcome},
    config::{Command, Config},
    inventory::{HttpInventoryService, InventoryService},
    notifications::TracingNotifier,
    products::ProductId,
    storage::FileStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(parse_error) => {
            // clap renders help and version requests as errors too
            let _printed = parse_error.print();

            return ExitCode::from(u8::try_from(parse_error.exit_code()).unwrap_or(1));
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(config).await {
        Ok(code) => code,
        Err(message) => {
            error!("{message}");

            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<ExitCode, String> {
    let currency = config.currency().map_err(|error| error.to_string())?;

    let inventory: Arc<dyn InventoryService> = Arc::new(
        HttpInventoryService::new(&config.api_url, config.timeout())
            .map_err(|error| format!("failed to build inventory client: {error}"))?,
    );

    let storage = FileStore::new(&config.storage_path);

    info!(
        "using inventory at {} and cart file {}",
        config.api_url,
        storage.path().display()
    );

    let store = CartStore::open(
        Arc::clone(&inventory),
        Arc::new(storage),
        Arc::new(TracingNotifier),
    )
    .map_err(|error| format!("failed to open cart: {error}"))?;

    if let Some(product) = config.command.product() {
        let held = store.cart().get(product).map_or(0, |item| item.amount);

        info!("cart holds {held} of product {product}");
    }

    let outcome = match config.command {
        Command::Show => None,
        Command::Catalog => {
            return show_catalog(&store, inventory.as_ref(), currency).await;
        }
        Command::Add { product } => Some(store.add_item(ProductId::new(product)).await),
        Command::Remove { product } => Some(store.remove_item(ProductId::new(product))),
        Command::Update { product, amount } => {
            Some(store.update_amount(ProductId::new(product), amount).await)
        }
    };

    let summary = CartSummary::from_cart(&store.cart(), currency)
        .map_err(|error| format!("failed to price cart: {error}"))?;

    print(&summary.render());

    Ok(match outcome {
        Some(Outcome::Rejected(_)) => ExitCode::FAILURE,
        Some(Outcome::Updated | Outcome::Unchanged) | None => ExitCode::SUCCESS,
    })
}

async fn show_catalog(
    store: &CartStore,
    inventory: &dyn InventoryService,
    currency: &'static Currency,
) -> Result<ExitCode, String> {
    let products = inventory
        .list_products()
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    let amounts = store.cart().amounts();
    let mut builder = Builder::default();

    builder.push_record(["ID", "Product", "Price", "In cart"]);

    for product in products {
        let price = Money::from_decimal(product.price, currency);
        let in_cart = amounts.get(&product.id).copied().unwrap_or_default();

        builder.push_record([
            product.id.to_string(),
            product.title,
            price.to_string(),
            in_cart.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::rounded());

    print(&table.to_string());

    Ok(ExitCode::SUCCESS)
}

#[expect(clippy::print_stdout, reason = "CLI output goes to stdout")]
fn print(output: &str) {
    println!("{output}");
}
