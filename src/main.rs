use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::{Parser, ValueEnum};
use log::{Level, LevelFilter, Metadata, Record};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use isle_terrain::ascii::{self, AsciiMode};
use isle_terrain::buildings::{StaticCatalog, GRASS};
use isle_terrain::export;
use isle_terrain::generator::{self, GeneratorParams, MapCell};
use isle_terrain::record::ClimateZone;
use isle_terrain::{LayerType, Rotation, World};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Climate {
    North,
    South,
}

impl From<Climate> for ClimateZone {
    fn from(climate: Climate) -> Self {
        match climate {
            Climate::North => ClimateZone::North,
            Climate::South => ClimateZone::South,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "isle_terrain")]
#[command(about = "Generate procedural islands for an isometric world")]
struct Args {
    /// Island width in tiles
    #[arg(short = 'W', long, default_value = "33")]
    width: usize,

    /// Island height in tiles
    #[arg(short = 'H', long, default_value = "33")]
    height: usize,

    /// Noise seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Noise frequency
    #[arg(short, long, default_value = "0.05")]
    frequency: f64,

    /// Elevation below which a cell is water (0.0-1.0)
    #[arg(short = 'l', long, default_value = "0.5")]
    water_level: f64,

    /// Climate zone, picks the tree set
    #[arg(short, long, value_enum, default_value = "north")]
    climate: Climate,

    /// Seed for tree and embankment variants (defaults to the noise seed)
    #[arg(long)]
    decoration_seed: Option<u64>,

    /// ASCII view printed to stdout
    #[arg(long, value_enum)]
    print: Option<PrintMode>,

    /// Write the island record as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write all ASCII views and statistics to a text file
    #[arg(long)]
    export_ascii: Option<PathBuf>,

    /// Write the cell classification as PNG
    #[arg(long)]
    export_cells: Option<PathBuf>,

    /// Write the elevation field as PNG
    #[arg(long)]
    export_elevation: Option<PathBuf>,

    /// Pixels per tile in PNG exports
    #[arg(long, default_value = "8")]
    png_scale: u32,

    /// Validate a world file and print a summary instead of generating
    #[arg(long)]
    check_world: Option<PathBuf>,

    /// Print debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PrintMode {
    Cells,
    Edges,
    Elevation,
}

impl From<PrintMode> for AsciiMode {
    fn from(mode: PrintMode) -> Self {
        match mode {
            PrintMode::Cells => AsciiMode::Cells,
            PrintMode::Edges => AsciiMode::Edges,
            PrintMode::Elevation => AsciiMode::Elevation,
        }
    }
}

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{} {} - {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Some(path) = &args.check_world {
        return check_world(path);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let params = GeneratorParams {
        width: args.width,
        height: args.height,
        seed,
        frequency: args.frequency,
        water_level: args.water_level,
        climate: args.climate.into(),
    };

    println!("Generating island with seed: {}", seed);
    println!("Island size: {}x{}", params.width, params.height);

    let island = generator::generate_island(&params)?;

    let land = island.count(MapCell::Terrain);
    println!(
        "Land: {} cells ({:.1}%)",
        land,
        100.0 * land as f64 / (params.width * params.height) as f64
    );
    for (ring, carved) in &island.ring_stats {
        println!("  {}: {} cells", ring.cell().name(), carved);
    }
    println!("  Open water: {} cells", island.count(MapCell::Water));

    if let Some(mode) = args.print {
        println!();
        print!("{}", ascii::render_ascii(&island, mode.into()));
    }

    let decoration_seed = args.decoration_seed.unwrap_or(seed as u64);
    let mut rng = ChaCha8Rng::seed_from_u64(decoration_seed);

    if let Some(path) = &args.output {
        island.save_json(path, &mut rng)?;
        println!("Saved island record to {}", path.display());
    }

    if let Some(path) = &args.export_ascii {
        ascii::export_ascii(&island, path)?;
        println!("Saved ASCII views to {}", path.display());
    }

    if let Some(path) = &args.export_cells {
        export::export_cells(&island, args.png_scale, path)?;
        println!("Saved cell map to {}", path.display());
    }

    if let Some(path) = &args.export_elevation {
        export::export_elevation(&island.elevation, params.water_level, args.png_scale, path)?;
        println!("Saved elevation map to {}", path.display());
    }

    Ok(())
}

/// Load a world, report its islands and how much of each is buildable.
fn check_world(path: &Path) -> Result<(), Box<dyn Error>> {
    let world = World::load(path)?;
    let catalog = StaticCatalog::with_generator_defaults();

    println!("World: {}x{}, {} islands", world.width, world.height, world.islands.len());
    println!(
        "  Deep water: {} cells",
        world.deep_water().tiles().iter().filter(|t| t.has_building()).count()
    );
    for (i, island) in world.islands.iter().enumerate() {
        let buildable = (0..island.height)
            .flat_map(|y| (0..island.width).map(move |x| (x, y)))
            .filter(|&(x, y)| {
                let world_x = island.x + x as i32;
                let world_y = island.y + y as i32;
                island
                    .validate_footprint(&catalog, GRASS, Rotation::Deg0, world_x, world_y)
                    .is_some()
            })
            .count();
        let buildings = island
            .layer(LayerType::Buildings)
            .tiles()
            .iter()
            .filter(|t| t.has_building())
            .count();

        println!(
            "  #{} {} {}x{} at ({}, {}): {} buildable cells, {} building tiles",
            i,
            island.climate.name(),
            island.width,
            island.height,
            island.x,
            island.y,
            buildable,
            buildings
        );
    }

    if log::log_enabled!(Level::Debug) {
        for island in &world.islands {
            log::debug!(
                "Island at ({}, {}) draws {} MIXED tiles",
                island.x,
                island.y,
                island.layer(LayerType::Mixed).tiles().iter().filter(|t| t.has_building()).count()
            );
        }
    }

    Ok(())
}
