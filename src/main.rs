#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use clap::Parser;
    use kml_route_meta::catalog::{build_catalog, write_catalog};
    use kml_route_meta::{CatalogOptions, Result};

    /// Build a JSON catalog of the KML/KMZ routes below a directory.
    #[derive(Parser)]
    #[command(name = "route-catalog", version)]
    struct Cli {
        /// Directory whose sub-directories are catalog sections
        routes_dir: Option<PathBuf>,

        /// Catalog file to write (default: <ROUTES_DIR>/index.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON file with catalog options; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Copy document descriptions into catalog entries
        #[arg(long)]
        include_descriptions: bool,

        /// Process files one at a time
        #[arg(long)]
        sequential: bool,
    }

    impl Cli {
        fn options(self) -> Result<CatalogOptions> {
            let mut opts = match &self.config {
                Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
                None => CatalogOptions::default(),
            };
            if let Some(dir) = self.routes_dir {
                opts.routes_dir = dir;
            }
            if self.output.is_some() {
                opts.output = self.output;
            }
            opts.include_descriptions |= self.include_descriptions;
            opts.parallel &= !self.sequential;
            Ok(opts)
        }
    }

    pub fn run() -> Result<()> {
        let opts = Cli::parse().options()?;
        let catalog = build_catalog(&opts)?;
        let output = opts.output_path();
        write_catalog(&catalog, &output)?;
        log::info!(
            "wrote {} ({} sections, {} routes)",
            output.display(),
            catalog.sections.len(),
            catalog.route_count()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = cli::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
