//! # Cart Shell
//!
//! Drives a file-backed cart from the command line, for poking at the
//! persisted entries during development.
//!
//! ## Usage
//! ```bash
//! # Show the cart
//! cargo run -p peercafe-store --bin peercafe-cart -- show
//!
//! # Add one Margherita from restaurant 100
//! cargo run -p peercafe-store --bin peercafe-cart -- add 1 "Margherita Pizza" 12.99 100 "Luigi's"
//!
//! # Start over with an item from another restaurant
//! cargo run -p peercafe-store --bin peercafe-cart -- replace 3 "Pad Thai" 15.99 200 "Thai Basil"
//!
//! # Change / remove / clear
//! cargo run -p peercafe-store --bin peercafe-cart -- set 1 3
//! cargo run -p peercafe-store --bin peercafe-cart -- remove 1
//! cargo run -p peercafe-store --bin peercafe-cart -- clear
//!
//! # Describe an order status as the tracking page shows it
//! cargo run -p peercafe-store --bin peercafe-cart -- status preparing
//! ```
//!
//! ## Exit Codes
//! - 0: success
//! - 1: item rejected (cart belongs to another restaurant)
//! - 2: bad arguments

use std::env;
use std::process::ExitCode;

use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use peercafe_core::{AddOutcome, CartItemInput, Money, OrderStatus};
use peercafe_store::{CartStore, FileStorage, StoreConfig};

const USAGE: &str = "\
Usage: peercafe-cart <COMMAND>

Commands:
  show                                                  Print the cart
  add <itemId> <name> <price> <restaurantId> <restaurantName>
                                                        Add one unit
  replace <itemId> <name> <price> <restaurantId> <restaurantName>
                                                        Discard the cart, start with this item
  remove <itemId>                                       Remove a line
  set <itemId> <quantity>                               Set a quantity (<= 0 removes)
  clear                                                 Empty the cart
  status <status>                                       Describe an order status (pending, en_route, ...)

Environment:
  PEERCAFE_DATA_DIR    Storage directory
  PEERCAFE_POLL_INTERVAL_SECS
                       Order tracking refetch interval
  RUST_LOG             Log filter (default: info,peercafe=debug)";

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(code) => code,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!();
            eprintln!("{}", USAGE);
            ExitCode::from(2)
        }
    }
}

fn run(args: &[String]) -> Result<ExitCode, String> {
    let command = args.first().map(String::as_str).unwrap_or("show");
    let rest = args.get(1..).unwrap_or_default();

    if matches!(command, "-h" | "--help" | "help") {
        println!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    }

    let config = StoreConfig::from_env();

    if command == "status" {
        let raw = parse_arg::<String>(rest, 0, "status")?;
        let status = raw.parse::<OrderStatus>().map_err(|e| e.to_string())?;
        print_status(status, &config);
        return Ok(ExitCode::SUCCESS);
    }

    let storage = FileStorage::new(&config.data_dir);
    info!(data_dir = %storage.dir().display(), "Opening cart storage");
    let mut store = CartStore::load_with_keys(storage, config.storage_keys());

    match command {
        "show" => {}
        "add" => {
            let item = parse_item(rest)?;
            if let AddOutcome::RestaurantConflict { current, requested } = store.add_to_cart(&item)
            {
                println!(
                    "Your cart has items from {} (#{}). Use `replace` to start a new cart from {} (#{}).",
                    current.name, current.id, requested.name, requested.id
                );
                return Ok(ExitCode::from(1));
            }
        }
        "replace" => {
            let item = parse_item(rest)?;
            store.clear_cart_and_add_item(&item);
        }
        "remove" => {
            let item_id = parse_arg::<i64>(rest, 0, "itemId")?;
            store.remove_from_cart(item_id);
        }
        "set" => {
            let item_id = parse_arg::<i64>(rest, 0, "itemId")?;
            let quantity = parse_arg::<i64>(rest, 1, "quantity")?;
            store.update_quantity(item_id, quantity);
        }
        "clear" => store.clear_cart(),
        other => return Err(format!("unknown command '{}'", other)),
    }

    print_cart(&store, &config);
    Ok(ExitCode::SUCCESS)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: INFO, DEBUG for peercafe crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,peercafe=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_item(args: &[String]) -> Result<CartItemInput, String> {
    if args.len() < 5 {
        return Err("expected <itemId> <name> <price> <restaurantId> <restaurantName>".to_string());
    }

    let price = parse_arg::<f64>(args, 2, "price")?;
    let unit_price = Money::from_decimal(price)
        .filter(|m| !m.is_negative())
        .ok_or_else(|| format!("invalid price '{}'", args[2]))?;

    Ok(CartItemInput {
        item_id: parse_arg(args, 0, "itemId")?,
        name: args[1].clone(),
        unit_price,
        image_ref: None,
        restaurant_id: parse_arg(args, 3, "restaurantId")?,
        restaurant_name: args[4].clone(),
    })
}

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, name: &str) -> Result<T, String> {
    let raw = args
        .get(index)
        .ok_or_else(|| format!("missing <{}>", name))?;
    raw.parse()
        .map_err(|_| format!("invalid <{}>: '{}'", name, raw))
}

fn print_status(status: OrderStatus, config: &StoreConfig) {
    match status.progress_step() {
        Some(step) => println!(
            "Order is {} (step {} of {}, {:.0}% complete)",
            status,
            step + 1,
            OrderStatus::PROGRESS.len(),
            status.progress_fraction() * 100.0
        ),
        None => println!("Order is {}", status),
    }

    match status.ensure_cancellable() {
        Ok(()) => println!("  Can still be cancelled"),
        Err(e) => println!("  {}", e),
    }

    let now = Utc::now();
    let mut poller = config.status_poller();
    poller.record(status, now);
    match poller.next_poll_at() {
        Some(at) => println!("  Next refresh in {}s", (at - now).num_seconds()),
        None => println!("  Tracking finished"),
    }
}

fn print_cart(store: &CartStore<FileStorage>, config: &StoreConfig) {
    if store.is_empty() {
        println!("Cart is empty");
        return;
    }

    if let Some(restaurant) = store.restaurant() {
        println!("Cart from {} (#{})", restaurant.name, restaurant.id);
    }
    for line in store.items() {
        println!(
            "  {:>3} × {:<30} {:>10}  [#{}]",
            line.quantity,
            line.name,
            config.format_currency(line.line_total().cents()),
            line.item_id
        );
    }
    println!(
        "  {} items, total {}",
        store.total_items(),
        config.format_currency(store.total_price().cents())
    );
}
