use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pokedex::config::AppConfig;
use pokedex::logging::{self, LogTarget};
use pokedex::{assemble, category_labels, Catalog, LoadOptions, Pokemon, ViewController};

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "Browse the pokedex catalog, its evolution chains and search")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "pokedex.toml", env = "POKEDEX_CONFIG")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive terminal browser (default)
    Browse,
    /// Print the full catalog
    List,
    /// Print the evolution chains
    Chains,
    /// Filter by name and category
    Search {
        /// Case-insensitive name fragment
        #[arg(default_value = "")]
        query: String,
        /// Category label, e.g. "Вода"
        #[arg(short = 't', long = "type")]
        category: Option<String>,
    },
    /// Print the category labels
    Types,
    /// Validate the catalog and report unresolved evolution links
    Check {
        /// Treat dangling links and unmapped colors as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;
    let command = cli.command.unwrap_or(Command::Browse);

    let target = match &command {
        Command::Browse => LogTarget::Terminal,
        _ => LogTarget::Stderr,
    };
    logging::init(&config.log, target)?;

    if let Command::Check { strict } = command {
        return run_check(&config, strict);
    }

    let catalog = Catalog::load(config.load_options()).context("Catalog validation failed")?;

    match command {
        Command::Browse => run_ui_mode(&config, &catalog),
        Command::List => {
            run_list(&catalog);
            Ok(())
        }
        Command::Chains => {
            run_chains(&catalog);
            Ok(())
        }
        Command::Search { query, category } => {
            run_search(&catalog, &query, category.as_deref());
            Ok(())
        }
        Command::Types => {
            for label in category_labels(&catalog) {
                println!("{}", label);
            }
            Ok(())
        }
        Command::Check { .. } => Ok(()),
    }
}

fn format_card(pokemon: &Pokemon) -> String {
    format!(
        "{}  {:<12} [{}]",
        pokemon.display_number(),
        pokemon.name,
        pokemon.categories.join(", ")
    )
}

fn run_list(catalog: &Catalog) {
    println!("📖 Покедекс: {} покемонов", catalog.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for pokemon in catalog.all() {
        println!("{}", format_card(pokemon));
    }
}

fn run_chains(catalog: &Catalog) {
    println!("🧬 Цепочки эволюции");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for chain in assemble(catalog) {
        let mut line = String::new();
        for link in &chain.links {
            line.push_str(&format!("{} {}", link.pokemon.display_number(), link.pokemon.name));
            if let Some(level) = link.level {
                line.push_str(&format!(" (Ур. {})", level));
            }
            if link.connector {
                line.push_str("  →  ");
            }
        }
        println!("{}", line);
    }
}

fn run_search(catalog: &Catalog, query: &str, category: Option<&str>) {
    let mut view = ViewController::new(catalog);
    view.set_search(query);
    view.select_category(category);

    if view.is_empty_result() {
        println!("❓ Покемон не найден");
        return;
    }

    for pokemon in view.filtered() {
        println!("{}", format_card(pokemon));
        if let Some(evolution) = pokemon.evolution {
            if let Some(from) = evolution.from {
                println!("      ← Из: {}", from);
            }
            if let Some(to) = evolution.to {
                println!("      → В: {}", to);
            }
        }
    }
}

fn run_check(config: &AppConfig, strict: bool) -> Result<()> {
    let options = if strict {
        LoadOptions {
            strict_links: true,
            strict_colors: true,
        }
    } else {
        config.load_options()
    };

    let catalog = Catalog::load(options).context("Catalog validation failed")?;
    println!("✓ Catalog valid: {} pokemon", catalog.len());

    let report = catalog.link_report();
    if report.is_empty() {
        println!("✓ All evolution links resolve");
    } else {
        println!("⚠️  {} evolution link(s) point outside the catalog:", report.len());
        for link in report {
            println!("   #{:03} {:?} \"{}\"", link.id, link.direction, link.label);
        }
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &AppConfig, catalog: &Catalog) -> Result<()> {
    let mut app = pokedex::ui::App::new(catalog, &config.ui);
    pokedex::ui::run_ui(&mut app)
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &AppConfig, _catalog: &Catalog) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the other commands: pokedex list | chains | search");
    std::process::exit(1);
}
