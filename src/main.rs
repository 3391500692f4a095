use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use gridmdp::env::scan::ParameterScan;
use gridmdp::env::streamer::Streamer;
use gridmdp::solver::observer::{GridPrinter, NoopObserver};
use gridmdp::{Cell, GridConfig, GridSolver, NoiseModel};
use serde_json::json;
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridmdp")]
#[command(about = "Value iteration on a stochastic grid world", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one grid and print every sweep followed by the greedy policy
    Solve {
        #[command(flatten)]
        grid: GridArgs,

        #[arg(long, default_value_t = 0.9)]
        gamma: f64,

        #[arg(long, default_value_t = 0.2)]
        noise: f64,

        /// Print a JSON report instead of the text grids
        #[arg(long)]
        json: bool,

        /// Only print the final values and policy
        #[arg(long)]
        quiet: bool,
    },
    /// Solve the grid for every gamma/noise pair and stream JSON lines
    Scan {
        #[command(flatten)]
        grid: GridArgs,

        #[arg(long, value_delimiter = ',', default_values_t = [0.5, 0.7, 0.9, 0.99])]
        gammas: Vec<f64>,

        #[arg(long, value_delimiter = ',', default_values_t = [0.0, 0.1, 0.2, 0.3])]
        noises: Vec<f64>,

        #[arg(long)]
        progress: bool,
    },
}

#[derive(Args)]
struct GridArgs {
    #[arg(long, default_value_t = 3)]
    rows: usize,

    #[arg(long, default_value_t = 4)]
    cols: usize,

    /// Terminal cell as `row,col,reward`; repeatable. Defaults to the classic +1/-1 pair
    #[arg(long = "reward", value_parser = parse_reward)]
    rewards: Vec<(Cell, f64)>,

    /// Wall cell as `row,col`; repeatable. Defaults to (1, 1)
    #[arg(long = "wall", value_parser = parse_cell)]
    walls: Vec<Cell>,

    /// Grid without walls
    #[arg(long, conflicts_with = "walls")]
    no_walls: bool,

    /// Split noise evenly over the other actions and keep blocked moves in place
    #[arg(long)]
    uniform_noise: bool,

    #[arg(long, default_value_t = 100)]
    max_iterations: usize,
}

impl GridArgs {
    fn to_config(&self) -> GridConfig {
        let mut config = GridConfig::new(self.rows, self.cols);
        if self.rewards.is_empty() {
            config.add_reward(Cell::new(0, 3), 1.0);
            config.add_reward(Cell::new(1, 3), -1.0);
        }
        for &(cell, reward) in &self.rewards {
            config.add_reward(cell, reward);
        }
        if self.walls.is_empty() && !self.no_walls {
            config.add_wall(Cell::new(1, 1));
        }
        for &cell in &self.walls {
            config.add_wall(cell);
        }
        if self.uniform_noise {
            config.set_noise_model(NoiseModel::Uniform);
        }
        config
    }
}

impl Default for GridArgs {
    fn default() -> Self {
        GridArgs {
            rows: 3,
            cols: 4,
            rewards: Vec::new(),
            walls: Vec::new(),
            no_walls: false,
            uniform_noise: false,
            max_iterations: 100,
        }
    }
}

fn parse_cell(text: &str) -> Result<Cell> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let [row, col] = parts.as_slice() else {
        bail!("expected `row,col`, got `{text}`");
    };
    Ok(Cell::new(
        row.parse().context("invalid row")?,
        col.parse().context("invalid column")?,
    ))
}

fn parse_reward(text: &str) -> Result<(Cell, f64)> {
    let Some((cell, reward)) = text.rsplit_once(',') else {
        bail!("expected `row,col,reward`, got `{text}`");
    };
    let reward: f64 = reward.trim().parse().context("invalid reward")?;
    Ok((parse_cell(cell)?, reward))
}

fn solve(grid: &GridArgs, gamma: f64, noise: f64, json_output: bool, quiet: bool) -> Result<()> {
    let mut config = grid.to_config();
    config.set_gamma(gamma);
    config.set_noise(noise);
    let mut solver = GridSolver::new(&config)?;

    if json_output {
        let report = solver.run_value_iteration(grid.max_iterations);
        let result = json!({
            "config": solver.config(),
            "layout": solver.layout().description(),
            "report": report,
            "policy": solver.policy(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let stdout = std::io::stdout();
    if quiet {
        solver.run_value_iteration_with(grid.max_iterations, &mut NoopObserver);
    } else {
        let mut printer = GridPrinter::new(stdout.lock());
        solver.run_value_iteration_with(grid.max_iterations, &mut printer);
        printer.finish()?;
    }

    let mut out = stdout.lock();
    if quiet {
        write!(
            out,
            "{}",
            gridmdp::solver::render::render_values(solver.layout(), solver.values())
        )?;
    }
    writeln!(out, "The extracted policy:")?;
    write!(out, "{}", solver.policy())?;
    Ok(())
}

fn scan(grid: &GridArgs, gammas: Vec<f64>, noises: Vec<f64>, progress: bool) -> Result<()> {
    let mut scan = ParameterScan::new(grid.to_config(), gammas, noises);
    scan.set_max_iterations(grid.max_iterations);
    scan.set_show_progress(progress);
    let streamer = Streamer::stdout();
    let outcome = scan.stream(&streamer);
    streamer.join()?;
    let count = outcome?;
    tracing::info!(count, "scan finished");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Solve {
            grid,
            gamma,
            noise,
            json,
            quiet,
        }) => solve(&grid, gamma, noise, json, quiet),
        Some(Commands::Scan {
            grid,
            gammas,
            noises,
            progress,
        }) => scan(&grid, gammas, noises, progress),
        None => solve(&GridArgs::default(), 0.9, 0.2, false, false),
    }
}
