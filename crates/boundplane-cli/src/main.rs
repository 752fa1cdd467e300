//! boundplane CLI - build and inspect bounding plane OBJ files.

use anyhow::{bail, Context, Result};
use boundplane::{Aabb3, Edge, HullPlane, Plane, PlaneSettings, Point3, Vec3};
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "boundplane")]
#[command(about = "Build finite bounding planes and save them as OBJ", long_about = None)]
struct Cli {
    /// TOML file with plane settings (padding, tolerances)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log construction details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plane through an edge, spanned along a normal
    Edge {
        /// Edge start point as X,Y,Z
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        start: [f64; 3],
        /// Edge end point as X,Y,Z
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        end: [f64; 3],
        /// Direction the plane extends in, as X,Y,Z
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        normal: [f64; 3],
        /// Bounding box as MINX,MINY,MINZ,MAXX,MAXY,MAXZ
        #[arg(long, value_parser = parse_bbox, allow_hyphen_values = true)]
        bbox: [f64; 6],
        /// Output OBJ file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Plane on a convex hull face `normal . x + offset = 0`
    Hull {
        /// Face normal as X,Y,Z
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true, requires = "offset")]
        normal: Option<[f64; 3]>,
        /// Signed offset of the face equation
        #[arg(long, allow_hyphen_values = true, requires = "normal")]
        offset: Option<f64>,
        /// Three face points as X,Y,Z, counter-clockwise seen from outside
        #[arg(
            long,
            value_parser = parse_point,
            num_args = 3,
            allow_hyphen_values = true,
            conflicts_with = "normal",
            required_unless_present = "normal"
        )]
        through: Vec<[f64; 3]>,
        /// Bounding box as MINX,MINY,MINZ,MAXX,MAXY,MAXZ
        #[arg(long, value_parser = parse_bbox, allow_hyphen_values = true)]
        bbox: [f64; 6],
        /// Output OBJ file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Load and validate a plane file, then print its corners
    Info {
        /// Plane OBJ file
        file: PathBuf,
    },
}

fn parse_floats<const N: usize>(s: &str) -> Result<[f64; N], String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("{v:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    values
        .try_into()
        .map_err(|v: Vec<f64>| format!("expected {N} comma-separated numbers, got {}", v.len()))
}

fn parse_point(s: &str) -> Result<[f64; 3], String> {
    parse_floats::<3>(s)
}

fn parse_bbox(s: &str) -> Result<[f64; 6], String> {
    parse_floats::<6>(s)
}

fn load_settings(path: Option<&Path>) -> Result<PlaneSettings> {
    let Some(path) = path else {
        return Ok(PlaneSettings::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let settings: PlaneSettings =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    settings.validate()?;
    Ok(settings)
}

fn hull_plane(
    normal: Option<[f64; 3]>,
    offset: Option<f64>,
    through: &[[f64; 3]],
) -> Result<HullPlane> {
    match (normal, offset, through) {
        (Some(normal), Some(offset), []) => Ok(HullPlane::new(Vec3::from(normal), offset)),
        (None, None, [a, b, c]) => HullPlane::from_points(
            &Point3::from(*a),
            &Point3::from(*b),
            &Point3::from(*c),
        )
        .context("hull face points are collinear"),
        _ => bail!("give either --normal with --offset, or three --through points"),
    }
}

fn save(plane: &Plane, output: &Path) -> Result<()> {
    plane
        .save_to_file(output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!("Saved plane to {}", output.display());
    Ok(())
}

fn show_info(file: &Path, settings: &PlaneSettings) -> Result<()> {
    let plane = Plane::load_from_file(file, settings)
        .with_context(|| format!("loading {}", file.display()))?;

    println!("Plane: {}", file.display());
    for (i, p) in plane.corners().iter().enumerate() {
        println!("  p{i}: ({}, {}, {})", p.x, p.y, p.z);
    }
    match plane.normal() {
        Some(n) => println!("  normal: ({:.6}, {:.6}, {:.6})", n.x, n.y, n.z),
        None => println!("  normal: degenerate (zero area)"),
    }
    let c = plane.centroid();
    println!("  centroid: ({:.6}, {:.6}, {:.6})", c.x, c.y, c.z);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Edge {
            start,
            end,
            normal,
            bbox,
            output,
        } => {
            let edge = Edge::new(Point3::from(start), Point3::from(end));
            let plane = Plane::from_edge(
                &edge,
                &Vec3::from(normal),
                &Aabb3::from_array(bbox),
                &settings,
            )?;
            save(&plane, &output)?;
        }
        Commands::Hull {
            normal,
            offset,
            through,
            bbox,
            output,
        } => {
            let hull = hull_plane(normal, offset, &through)?;
            let plane = Plane::from_hull_plane(&hull, &Aabb3::from_array(bbox), &settings)?;
            save(&plane, &output)?;
        }
        Commands::Info { file } => {
            show_info(&file, &settings)?;
        }
    }

    Ok(())
}
