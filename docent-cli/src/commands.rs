//! CLI command implementations

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use docent_core::{BaseUrl, Catalog, DocentConfig, DocentError, catalog_links, resolve};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
        /// Public origin printed into QR links
        #[arg(long)]
        public_url: Option<String>,
        /// JSON catalog to serve instead of the built-in exhibits
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// Show what a viewer route resolves to
    Resolve {
        /// Route identifier, e.g. `exhibit01-fr`
        route: String,
        /// JSON catalog to resolve against
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// List catalog exhibits
    Catalog {
        /// JSON catalog to list
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// Print the QR link for every catalog exhibit as JSON
    Links {
        /// Public origin of the guide
        #[arg(long)]
        base_url: String,
        /// JSON catalog to export
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns the failure of the command that ran
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve {
            host,
            port,
            public_url,
            catalog,
        } => serve(host, port, public_url, catalog).await,
        Commands::Resolve { route, catalog } => show_resolution(&route, catalog.as_deref()),
        Commands::Catalog { catalog } => list_catalog(catalog.as_deref()),
        Commands::Links { base_url, catalog } => print_links(&base_url, catalog.as_deref()),
    }
}

/// Start the web server. Flags override `DOCENT_*` environment settings.
///
/// # Errors
/// - Catalog unreadable, base URL invalid, or address not bindable
pub async fn serve(
    host: Option<String>,
    port: Option<u16>,
    public_url: Option<String>,
    catalog: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = DocentConfig::from_env();
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(public_url) = public_url {
        config.server.public_base_url = public_url;
    }
    if catalog.is_some() {
        config.catalog_path = catalog;
    }

    tracing::info!(
        bind = %config.server.bind_address(),
        public_url = %config.server.public_base_url,
        catalog = ?config.catalog_path,
        "Starting Docent museum guide"
    );

    docent_web::run_server(config).await?;
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path)
            .map_err(DocentError::from)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => Ok(Catalog::builtin()),
    }
}

/// Print the exhibit, language and media a route plays.
///
/// # Errors
/// - Catalog unreadable, or route does not resolve
pub fn show_resolution(route: &str, catalog: Option<&Path>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog)?;
    let resolution = resolve(route, &catalog).map_err(DocentError::from)?;

    println!("Route: {route}");
    println!("  Exhibit: {} ({})", resolution.exhibit_id, resolution.title());
    match resolution.language_tag {
        Some(tag) => println!("  Language: {tag}"),
        None => println!("  Language: default"),
    }
    println!("  Media: {}", resolution.media_ref);
    if resolution.needs_language_selection() {
        println!("  Visitors see the language selection screen first");
    }

    Ok(())
}

/// List catalog exhibits with the languages that have dedicated media.
///
/// # Errors
/// - Catalog unreadable
pub fn list_catalog(catalog: Option<&Path>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog)?;

    if catalog.is_empty() {
        println!("Catalog is empty");
        return Ok(());
    }

    println!("{} exhibits:", catalog.len());
    for (id, descriptor) in catalog.iter() {
        let languages: Vec<_> = descriptor.by_language.keys().map(|tag| tag.code()).collect();
        println!(
            "  {:<16} {:<32} [{}]",
            id.as_str(),
            descriptor.title.as_deref().unwrap_or("-"),
            languages.join(", ")
        );
    }

    Ok(())
}

/// Print catalog QR links as JSON.
///
/// # Errors
/// - Base URL invalid or catalog unreadable
pub fn print_links(base_url: &str, catalog: Option<&Path>) -> anyhow::Result<()> {
    let base_url = BaseUrl::parse(base_url).map_err(DocentError::from)?;
    let catalog = load_catalog(catalog)?;

    let links = catalog_links(&catalog, &base_url);
    println!("{}", serde_json::to_string_pretty(&links)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_catalog_keeps_docent_error() {
        let err = load_catalog(Some(Path::new("/nonexistent/docent-catalog.json"))).unwrap_err();

        let docent = err.downcast_ref::<DocentError>().unwrap();
        assert!(matches!(docent, DocentError::Catalog(_)));
        assert_eq!(
            docent.user_message(),
            "The exhibit catalog could not be loaded"
        );
        assert!(format!("{err:#}").contains("Failed to load catalog"));
    }

    #[test]
    fn test_builtin_catalog_without_path() {
        assert_eq!(load_catalog(None).unwrap().len(), Catalog::builtin().len());
    }
}
