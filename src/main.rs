mod config;
mod generate;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use strata_blocks::{
    BlockRegistry, Catalogue, Category, ForeignMaterial, MaterialTranslator, legacy_numeric_index,
};
use strata_terrain::{RecipeBook, block_colour};

use crate::config::GenerateConfig;
use crate::generate::{Plan, generate_area, summarize};

#[derive(Parser, Debug)]
#[command(name = "strata", about = "Block registry, material translation and terrain tools")]
struct Cli {
    /// Alternate block catalogue (TOML)
    #[arg(long, global = true)]
    catalogue: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalogued blocks, or the blocks of one category
    Catalogue {
        #[arg(long)]
        category: Option<String>,
    },
    /// Translate a foreign material to a native block
    Translate {
        name: Option<String>,
        #[arg(long, default_value_t = -1)]
        block_type: i32,
        /// Material property as key=value; repeatable
        #[arg(long = "prop", value_parser = parse_prop)]
        props: Vec<(String, String)>,
    },
    /// Evaluate a terrain recipe at one position
    #[command(allow_negative_numbers = true)]
    Sample {
        #[arg(long, default_value_t = 0)]
        seed: i64,
        #[arg(long)]
        recipe: String,
        #[arg(long)]
        recipes: Option<PathBuf>,
        x: i32,
        y: i32,
        depth: i32,
    },
    /// Fill chunks from a generation config and print a summary
    Generate {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        recipes: Option<PathBuf>,
        #[arg(long, allow_hyphen_values = true)]
        cx: i32,
        #[arg(long, allow_hyphen_values = true)]
        cz: i32,
        #[arg(long, default_value_t = 0)]
        radius: i32,
    },
}

fn parse_prop(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_string(), v.to_string())),
        _ => Err(format!("expected key=value, got '{s}'")),
    }
}

fn load_recipes(path: Option<&PathBuf>) -> Result<RecipeBook, Box<dyn Error>> {
    let mut book = RecipeBook::builtin();
    if let Some(p) = path {
        book.extend(RecipeBook::from_path(p)?);
    }
    Ok(book)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let catalogue = match &cli.catalogue {
        Some(p) => Catalogue::from_path(p)?,
        None => Catalogue::builtin()?,
    };
    let registry = BlockRegistry::new(catalogue);

    match cli.cmd {
        Command::Catalogue { category } => {
            let categories = match category {
                Some(key) => {
                    vec![Category::from_key(&key).ok_or_else(|| format!("unknown category '{key}'"))?]
                }
                None => registry.categories(),
            };
            for cat in categories {
                let ids = registry.ids_in_category(cat);
                println!("[{}] {} ({} blocks)", cat.key(), cat.legacy_name(), ids.len());
                for id in ids {
                    println!(
                        "  {:>4}  {:<40} {}",
                        registry.index_of(id),
                        id,
                        registry.display_name(id)
                    );
                }
            }
        }
        Command::Translate {
            name,
            block_type,
            props,
        } => {
            let mut material = ForeignMaterial {
                name,
                block_type,
                ..Default::default()
            };
            material.properties.extend(props);
            let translator = MaterialTranslator::new();
            let block = translator.to_block_identity_with_rotation(&material);
            println!("block      {block}");
            println!("legacy     {}", legacy_numeric_index(block.id()));
            println!("known      {}", translator.is_known_block(&registry, block.id()));
            if let Some(fluid) = translator.fluid_of(&material) {
                println!("fluid      {} level {}", fluid.name, fluid.level);
            }
        }
        Command::Sample {
            seed,
            recipe,
            recipes,
            x,
            y,
            depth,
        } => {
            let book = load_recipes(recipes.as_ref())?;
            let r = book
                .get(&recipe)
                .ok_or_else(|| format!("unknown recipe '{recipe}'"))?;
            let block = r.evaluate(seed, x, y, depth);
            println!("{block} #{:06x}", block_colour(block.id()));
        }
        Command::Generate {
            config,
            recipes,
            cx,
            cz,
            radius,
        } => {
            let cfg = match config {
                Some(p) => GenerateConfig::from_path(&p)?,
                None => GenerateConfig::default(),
            };
            let book = load_recipes(recipes.as_ref())?;
            let plan = Plan::new(&cfg, &book)?;
            for chunk in generate_area(&plan, cx, cz, radius) {
                let s = summarize(&chunk, &registry);
                let highest = s.highest.map_or("-".to_string(), |h| h.to_string());
                println!(
                    "chunk ({}, {}) highest {} fluid voxels {}",
                    s.cx, s.cz, highest, s.fluid_voxels
                );
                for (index, (id, n)) in &s.blocks {
                    println!("  {index:>4} {id:<32} {n}");
                }
            }
        }
    }
    Ok(())
}
