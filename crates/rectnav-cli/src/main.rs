//! rectnav CLI - plan and follow routes around rectangular obstacles.
//!
//! - `rectnav plan` - search a route and print it
//! - `rectnav simulate` - drive a simulated agent along a planned route
//! - `rectnav init` - write a default project config

mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use rectnav::{
    simplify, NavController, NavState, NavStatus, PathSearch, RectObstacle, Route, SimAgent,
    ValidityOracle, Vec2,
};

use crate::config::{CliConfig, CONFIG_PATH};

#[derive(Parser)]
#[command(name = "rectnav")]
#[command(about = "Route planning around rectangular obstacles", version)]
struct Cli {
    /// Project root directory
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a route and print its waypoints
    Plan {
        #[command(flatten)]
        scene: SceneArgs,

        /// Print the raw search route only
        #[arg(long)]
        no_simplify: bool,
    },

    /// Follow a planned route tick by tick with a simulated agent
    Simulate {
        #[command(flatten)]
        scene: SceneArgs,

        /// Distance covered per tick (defaults to the config's agent speed)
        #[arg(long)]
        speed: Option<f32>,

        /// Give up after this many ticks
        #[arg(long, default_value_t = 10_000)]
        max_ticks: u32,
    },

    /// Initialize a new project
    Init,
}

#[derive(Args)]
struct SceneArgs {
    /// Start position as x,y
    #[arg(long, value_parser = parse_point)]
    from: Vec2,

    /// Goal position as x,y
    #[arg(long, value_parser = parse_point)]
    to: Vec2,

    /// Obstacle as x,y,width,height (can be specified multiple times)
    #[arg(long = "wall", value_parser = parse_wall)]
    walls: Vec<RectObstacle>,

    /// Agent body radius (defaults to the config's agent radius)
    #[arg(long)]
    radius: Option<f32>,
}

fn parse_numbers<const N: usize>(s: &str) -> Result<[f32; N], String> {
    let mut out = [0.0; N];
    let mut parts = s.split(',');
    for slot in out.iter_mut() {
        let part = parts
            .next()
            .ok_or_else(|| format!("Expected {} comma-separated numbers: {}", N, s))?;
        *slot = part
            .trim()
            .parse()
            .map_err(|_| format!("Invalid number '{}' in: {}", part.trim(), s))?;
    }
    if parts.next().is_some() {
        return Err(format!("Expected {} comma-separated numbers: {}", N, s));
    }
    Ok(out)
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let [x, y] = parse_numbers::<2>(s)?;
    Ok(Vec2::new(x, y))
}

fn parse_wall(s: &str) -> Result<RectObstacle, String> {
    let [x, y, w, h] = parse_numbers::<4>(s)?;
    if w < 0.0 || h < 0.0 {
        return Err(format!("Wall size must be non-negative: {}", s));
    }
    Ok(RectObstacle::new(x, y, w, h))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let project_root = match cli.project {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Some(Commands::Plan { scene, no_simplify }) => plan(&project_root, scene, no_simplify),
        Some(Commands::Simulate {
            scene,
            speed,
            max_ticks,
        }) => {
            let summary = simulate(&project_root, scene, speed, max_ticks)?;
            tracing::info!(
                ticks = summary.ticks,
                x = summary.position.x,
                y = summary.position.y,
                "Simulation finished"
            );
            Ok(())
        }
        Some(Commands::Init) => init_project(&project_root),
        None => {
            println!("rectnav - route planning around rectangular obstacles");
            println!();
            println!("Usage: rectnav <COMMAND>");
            println!();
            println!("Commands:");
            println!("  plan      Plan a route and print its waypoints");
            println!("  simulate  Follow a planned route with a simulated agent");
            println!("  init      Initialize a new project");
            println!();
            println!("Run 'rectnav --help' for more information.");
            Ok(())
        }
    }
}

fn print_route(label: &str, route: &Route) {
    println!("{} ({} waypoints):", label, route.len());
    for p in &route.points {
        println!("  {:.1}, {:.1}", p.x, p.y);
    }
}

fn plan(project_root: &Path, scene: SceneArgs, no_simplify: bool) -> Result<()> {
    let config = CliConfig::load_from_project(project_root)?;
    let from = scene.from;
    let (raw, simplified) = plan_routes(&config, scene, config.nav.simplify && !no_simplify)?;

    print_route("Raw route", &raw);
    if let Some(simplified) = simplified {
        println!();
        print_route("Simplified route", &simplified);
        println!();
        println!(
            "Length: {:.1} raw, {:.1} simplified",
            raw.length_from(from),
            simplified.length_from(from)
        );
    }

    Ok(())
}

/// Raw search route, plus the simplified one when `simplify_route` is set.
fn plan_routes(
    config: &CliConfig,
    scene: SceneArgs,
    simplify_route: bool,
) -> Result<(Route, Option<Route>)> {
    let radius = scene.radius.unwrap_or(config.agent.body_radius);
    let oracle: ValidityOracle =
        ValidityOracle::with_buffer(config.world, scene.walls, config.nav.buffer_distance);

    tracing::info!(
        from = ?scene.from,
        to = ?scene.to,
        walls = oracle.obstacles().len(),
        radius,
        "Planning"
    );

    let raw = PathSearch::new(&oracle, radius)
        .with_config(config.nav.search())
        .find_path(scene.from, scene.to)
        .with_context(|| {
            format!(
                "No route from ({}, {}) to ({}, {})",
                scene.from.x, scene.from.y, scene.to.x, scene.to.y
            )
        })?;

    let simplified = simplify_route.then(|| simplify(&oracle, radius, &raw));
    Ok((raw, simplified))
}

#[derive(Debug)]
struct SimSummary {
    ticks: u32,
    position: Vec2,
}

fn simulate(
    project_root: &Path,
    scene: SceneArgs,
    speed: Option<f32>,
    max_ticks: u32,
) -> Result<SimSummary> {
    let config = CliConfig::load_from_project(project_root)?;
    let walls: Arc<[RectObstacle]> = scene.walls.into();

    let mut agent = SimAgent::new(scene.from, config.world, Arc::clone(&walls))
        .with_body_radius(scene.radius.unwrap_or(config.agent.body_radius))
        .with_linear_speed(speed.unwrap_or(config.agent.linear_speed));
    let mut controller: NavController = NavController::new(config.world, walls, config.nav);

    controller
        .set_goal(&agent, scene.to)
        .context("Failed to plan initial route")?;
    tracing::info!(waypoints = controller.route().len(), "Route planned");

    let mut last = None;
    let mut ticks = 0;
    while controller.is_running() && ticks < max_ticks {
        ticks += 1;
        let status = controller.tick(&mut agent);
        match status {
            NavStatus::Advanced(index) => {
                tracing::info!(tick = ticks, index, "Waypoint reached");
            }
            NavStatus::Moving | NavStatus::Blocked if last != Some(status) => {
                tracing::debug!(tick = ticks, status = ?status, "Status changed");
            }
            _ => {}
        }
        last = Some(status);
    }

    let position = agent.position;
    println!("Ticks: {}", ticks);
    println!("Final position: {:.2}, {:.2}", position.x, position.y);
    println!("Distance to goal: {:.2}", position.distance(scene.to));

    match controller.state() {
        NavState::Completed => {
            tracing::info!(ticks, "Route completed");
            Ok(SimSummary { ticks, position })
        }
        NavState::Following => bail!("Route not completed within {} ticks", max_ticks),
        NavState::Idle => match controller.last_error() {
            Some(err) => Err(err).context("Navigation abandoned"),
            None => bail!("Navigation stopped"),
        },
    }
}

fn init_project(project_root: &Path) -> Result<()> {
    let config_path = project_root.join(CONFIG_PATH);
    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    let body = CliConfig {
        version: Some("1".to_string()),
        ..CliConfig::default()
    }
    .to_yaml()?;
    std::fs::write(&config_path, format!("# rectnav configuration\n\n{}", body))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Initialized rectnav project at {}", project_root.display());
    println!();
    println!("Created:");
    println!("  {} - world bounds, planner and agent settings", CONFIG_PATH);
    println!();
    println!("Next steps:");
    println!("  rectnav plan --from 60,60 --to 740,540 --wall 300,0,40,400");

    Ok(())
}
