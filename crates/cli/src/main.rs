//! Urban Store CLI - catalog and cart tools working on the storefront's data.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! us-cli products list --category Tops --sort price-asc
//! us-cli products show 3
//! us-cli categories
//!
//! # Manage the persisted cart
//! us-cli cart add 2 --size M --quantity 2
//! us-cli cart update 2-M 3
//! us-cli cart remove 2-M
//! us-cli cart show
//! us-cli cart clear
//!
//! # Place a mock order for the current cart
//! us-cli checkout -n "Jordan Fox" -e jordan@example.com -p "555 010 0199" -a "12 Market Street"
//!
//! # Send a message to the store team
//! us-cli contact -n "Jordan Fox" -e jordan@example.com -m "Do you offer styling sessions?"
//! ```
//!
//! The CLI reads the same environment variables as the storefront
//! (`STOREFRONT_DATA_DIR`, `CART_STORAGE_KEY`, `CATALOG_PATH`), so it sees and
//! edits the cart the storefront serves.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use urban_store_core::ProductId;
use urban_store_storefront::checkout::PaymentMethod;

mod commands;

#[derive(Parser)]
#[command(name = "us-cli")]
#[command(version, about = "Urban Store CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// List category names
    Categories,
    /// Manage the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Validate checkout details and confirm a mock order
    Checkout {
        /// Full name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Email address
        #[arg(short, long, default_value = "")]
        email: String,

        /// Phone number
        #[arg(short, long, default_value = "")]
        phone: String,

        /// Shipping address
        #[arg(short, long, default_value = "")]
        address: String,

        /// Payment method
        #[arg(long, value_enum, default_value_t = Payment::Card)]
        payment: Payment,
    },
    /// Send a message to the store team
    Contact {
        /// Your name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Email address
        #[arg(short, long, default_value = "")]
        email: String,

        /// Message (at least 10 characters)
        #[arg(short, long, default_value = "")]
        message: String,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List one page of products
    List {
        /// Zero-based page number
        #[arg(long, default_value_t = 0)]
        page: usize,

        /// Products per page
        #[arg(long, default_value_t = urban_store_storefront::catalog::DEFAULT_PAGE_SIZE)]
        per_page: usize,

        /// Only show this category ("All" for every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Lowest price shown
        #[arg(long)]
        min_price: Option<Decimal>,

        /// Highest price shown
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Sort order (`featured`, `price-asc`, `price-desc`)
        #[arg(short, long, default_value = "featured")]
        sort: String,
    },
    /// Show one product and related products
    Show {
        /// Product ID
        id: ProductId,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        product_id: ProductId,

        /// Size to add
        #[arg(short, long)]
        size: Option<String>,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a cart row
    Update {
        /// Row identifier, e.g. `2-M`
        uid: String,

        /// New quantity (values below 1 become 1)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a cart row
    Remove {
        /// Row identifier, e.g. `2-M`
        uid: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
enum Payment {
    Cash,
    Card,
}

impl From<Payment> for PaymentMethod {
    fn from(payment: Payment) -> Self {
        match payment {
            Payment::Cash => Self::Cash,
            Payment::Card => Self::Card,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let state = commands::open_state()?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List {
                page,
                per_page,
                category,
                min_price,
                max_price,
                sort,
            } => {
                let filter = commands::catalog::listing_filter(category, min_price, max_price, &sort)?;
                commands::catalog::list(&state, page, per_page, &filter).await;
            }
            ProductAction::Show { id } => commands::catalog::show(&state, id).await?,
        },
        Commands::Categories => commands::catalog::categories(&state),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add {
                product_id,
                size,
                quantity,
            } => commands::cart::add(&state, product_id, size.as_deref(), quantity).await?,
            CartAction::Update { uid, quantity } => {
                commands::cart::update(&state, &uid, quantity)?;
            }
            CartAction::Remove { uid } => commands::cart::remove(&state, &uid)?,
            CartAction::Clear => commands::cart::clear(&state),
        },
        Commands::Checkout {
            name,
            email,
            phone,
            address,
            payment,
        } => commands::checkout::submit(
            &state,
            urban_store_storefront::checkout::CheckoutForm {
                full_name: name,
                email,
                phone,
                address,
                payment_method: payment.into(),
            },
        )?,
        Commands::Contact {
            name,
            email,
            message,
        } => commands::contact::submit(urban_store_storefront::contact::ContactForm {
            name,
            email,
            message,
        })?,
    }
    Ok(())
}
