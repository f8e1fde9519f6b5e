use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use onion::source::{random_points, read_points, read_points_or_empty, write_points, RandomCfg};
use onion::{EngineCfg, GeomCfg, HullAlgorithm, LayerEngine, Point};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod report;
mod script;

use provenance::{write_sidecar, RunRecord};
use report::{steps_report, LayersReport};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Convex layers (onion peeling) of planar point sets")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Peel a point set and print (or write) its layers
    Layers {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Dump the replay trace of one peeling run
    Steps {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write a random point cloud in the two-column text format
    Generate {
        #[arg(long, default_value_t = 20)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value = "0:100", value_parser = parse_range)]
        x_range: (f64, f64),
        #[arg(long, default_value = "0:100", value_parser = parse_range)]
        y_range: (f64, f64),
        #[arg(long)]
        out: PathBuf,
    },
    /// Apply a command script (add/remove/peel/readd/algo/show) to an engine
    Script {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        script: PathBuf,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Two-column point file
    #[arg(long, conflicts_with = "random")]
    input: Option<PathBuf>,
    /// Treat an unreadable point file as empty instead of failing
    #[arg(long, requires = "input")]
    lenient: bool,
    /// Draw this many random points instead of reading a file
    #[arg(long)]
    random: Option<usize>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value = "0:100", value_parser = parse_range)]
    x_range: (f64, f64),
    #[arg(long, default_value = "0:100", value_parser = parse_range)]
    y_range: (f64, f64),
    /// graham | jarvis | divide
    #[arg(long, default_value = "graham")]
    algo: String,
    /// Collinearity band for the orientation test
    #[arg(long, default_value_t = 0.0)]
    eps: f64,
}

impl InputArgs {
    fn points(&self) -> Result<Vec<Point>> {
        if let Some(path) = &self.input {
            if self.lenient {
                return Ok(read_points_or_empty(path));
            }
            return read_points(path).with_context(|| format!("loading {}", path.display()));
        }
        let cfg = RandomCfg {
            count: self.random.unwrap_or(RandomCfg::default().count),
            x_range: self.x_range,
            y_range: self.y_range,
        };
        Ok(random_points(cfg, self.seed))
    }

    fn engine(&self) -> Result<LayerEngine> {
        let algorithm: HullAlgorithm = self.algo.parse()?;
        if !(self.eps >= 0.0) {
            bail!("--eps must be a non-negative number, got {}", self.eps);
        }
        let mut engine = LayerEngine::new(EngineCfg {
            algorithm,
            geom: GeomCfg {
                eps_orient: self.eps,
            },
        });
        engine.initialize(self.points()?)?;
        Ok(engine)
    }

    fn params(&self) -> serde_json::Value {
        serde_json::json!({
            "input": self.input.as_ref().map(|p| p.display().to_string()),
            "random": self.random,
            "seed": self.seed,
            "x_range": self.x_range,
            "y_range": self.y_range,
            "algo": self.algo,
            "eps": self.eps,
        })
    }
}

fn parse_range(s: &str) -> Result<(f64, f64), String> {
    let (lo, hi) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LO:HI, got `{s}`"))?;
    let lo: f64 = lo.trim().parse().map_err(|_| format!("bad bound `{lo}`"))?;
    let hi: f64 = hi.trim().parse().map_err(|_| format!("bad bound `{hi}`"))?;
    Ok((lo, hi))
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Layers { input, out } => layers(&input, out.as_deref()),
        Action::Steps { input, out } => steps(&input, out.as_deref()),
        Action::Generate {
            count,
            seed,
            x_range,
            y_range,
            out,
        } => generate(
            RandomCfg {
                count,
                x_range,
                y_range,
            },
            seed,
            &out,
        ),
        Action::Script { input, script } => run_script(&input, &script),
    }
}

fn emit<T: Serialize>(value: &T, out: Option<&Path>, record: RunRecord) -> Result<()> {
    let Some(out) = out else {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))?;
    write_sidecar(out, record)?;
    Ok(())
}

fn telemetry(engine: &LayerEngine) -> serde_json::Value {
    let perf = engine.performance_info();
    serde_json::json!({
        "duration_us": perf.duration.as_micros() as u64,
        "layer_count": perf.layer_count,
    })
}

fn layers(input: &InputArgs, out: Option<&Path>) -> Result<()> {
    let engine = input.engine()?;
    let perf = engine.performance_info();
    tracing::info!(
        algo = %engine.algorithm(),
        points = engine.all_points().len(),
        layers = perf.layer_count,
        duration_us = perf.duration.as_micros() as u64,
        "layers"
    );
    let record = RunRecord {
        command: "layers",
        params: input.params(),
        telemetry: telemetry(&engine),
    };
    emit(&LayersReport::from_engine(&engine), out, record)
}

fn steps(input: &InputArgs, out: Option<&Path>) -> Result<()> {
    let engine = input.engine()?;
    let trace = engine.computation_steps().clone();
    tracing::info!(steps = trace.len(), "steps");
    let record = RunRecord {
        command: "steps",
        params: input.params(),
        telemetry: telemetry(&engine),
    };
    emit(&steps_report(&trace), out, record)
}

fn generate(cfg: RandomCfg, seed: u64, out: &Path) -> Result<()> {
    tracing::info!(count = cfg.count, seed, out = %out.display(), "generate");
    let points = random_points(cfg, seed);
    write_points(out, &points)?;
    write_sidecar(
        out,
        RunRecord {
            command: "generate",
            params: serde_json::json!({
                "count": cfg.count,
                "seed": seed,
                "x_range": cfg.x_range,
                "y_range": cfg.y_range,
            }),
            telemetry: serde_json::Value::Null,
        },
    )?;
    Ok(())
}

fn run_script(input: &InputArgs, path: &Path) -> Result<()> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut engine = if input.input.is_some() || input.random.is_some() {
        input.engine()?
    } else {
        LayerEngine::new(EngineCfg {
            algorithm: input.algo.parse()?,
            geom: GeomCfg {
                eps_orient: input.eps,
            },
        })
    };
    tracing::info!(script = %path.display(), "script");
    for snapshot in script::run(&mut engine, &text)? {
        println!("{}", serde_json::to_string(&snapshot)?);
    }
    Ok(())
}
