use pestquote::pricebook::{
    builtin_catalog, load_catalog_from_file, load_pricebook_from_file, PriceBook,
};
use pestquote::{api, config::Config, db::init_db, Repository};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Load and validate the price book before serving anything
    let book = match &config.price_book_path {
        Some(path) => match load_pricebook_from_file(path) {
            Ok(book) => book,
            Err(e) => {
                eprintln!("Price book error: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            let book = PriceBook::builtin();
            if let Err(e) = book.validate() {
                eprintln!("Builtin price book error: {}", e);
                std::process::exit(1);
            }
            book
        }
    };

    let packages = match &config.package_catalog_path {
        Some(path) => match load_catalog_from_file(path) {
            Ok(packages) => packages,
            Err(e) => {
                eprintln!("Package catalog error: {}", e);
                std::process::exit(1);
            }
        },
        None => builtin_catalog(),
    };

    tracing::info!(
        "Loaded {} pest rates and {} packages",
        book.pest_rates.len(),
        packages.len()
    );

    // Initialize database and dependencies
    let pool = match init_db(&config.database_path).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let repo = Arc::new(Repository::new(pool));

    // Create router
    let app = api::create_router(api::AppState::new(repo, book, packages));

    // Bind to address
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
