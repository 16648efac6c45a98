//! Command-line front end.
//!
//! ```text
//! cleave hierarchical data.csv --threshold 2.0
//! cleave kmeans data.csv 3 --seed 1
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use cleave::render::{dendrogram_xml, kmeans_report};
use cleave::{Agglomerative, Dataset, Kmeans, Linkage, RandomIndices};
use env_logger::Env;

#[derive(Parser)]
#[command(version, about = "Hierarchical and k-means clustering of delimited records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a dendrogram and optionally cut it at a height.
    Hierarchical {
        /// Input file; first row is the restriction mask.
        file: PathBuf,
        /// Cut height; each resulting cluster is printed as its own tree.
        #[arg(short, long)]
        threshold: Option<f64>,
        /// Linkage method: single, complete or average.
        #[arg(short, long, default_value = "complete")]
        linkage: Linkage,
    },
    /// Partition records into k clusters.
    Kmeans {
        /// Input file; first row is the restriction mask.
        file: PathBuf,
        /// Number of clusters.
        k: usize,
        /// Seed for choosing the initial centroids.
        #[arg(short, long, default_value_t = 1)]
        seed: u64,
        /// Cap on assignment passes.
        #[arg(long, default_value_t = cleave::cluster::DEFAULT_MAX_ITER)]
        max_iter: usize,
    },
}

fn load(file: &Path) -> anyhow::Result<Dataset> {
    Dataset::from_path(file).with_context(|| format!("failed to load {}", file.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(Env::default().filter_or("RUST_LOG", "warn"));
    let cli = Cli::parse();

    match cli.command {
        Command::Hierarchical {
            file,
            threshold,
            linkage,
        } => {
            let data = load(&file)?;
            let tree = Agglomerative::new().with_linkage(linkage).fit(data.points())?;
            let Some(root) = tree.root() else {
                println!("no records");
                return Ok(());
            };
            print!("{}", dendrogram_xml(&tree, root));
            if let Some(t) = threshold {
                for id in tree.cut(t) {
                    println!();
                    println!();
                    print!("{}", dendrogram_xml(&tree, id));
                }
            }
        }
        Command::Kmeans {
            file,
            k,
            seed,
            max_iter,
        } => {
            let data = load(&file)?;
            let fit = Kmeans::new(k)
                .with_max_iter(max_iter)
                .fit(data.points(), RandomIndices::seeded(seed))?;
            print!("{}", kmeans_report(&fit, &data));
        }
    }

    Ok(())
}
