//! Line-oriented command scripts driving a `LayerEngine`.
//!
//! Grammar (one command per line, `#` starts a comment):
//! `add X Y`, `remove X Y`, `peel`, `readd`, `algo NAME`, `recompute`, `show`.

use anyhow::{anyhow, bail, Context, Result};
use onion::{LayerEngine, Point};

use crate::report::LayersReport;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Add(Point),
    Remove(Point),
    Peel,
    ReAdd,
    Algo(String),
    Recompute,
    Show,
}

pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }
    let mut tokens = line.split_whitespace();
    let verb = tokens.next().unwrap_or_default();
    let rest: Vec<&str> = tokens.collect();
    let point = |args: &[&str]| -> Result<Point> {
        let [x, y] = args else {
            bail!("`{verb}` expects two coordinates");
        };
        let x: f64 = x.parse().with_context(|| format!("bad x coordinate `{x}`"))?;
        let y: f64 = y.parse().with_context(|| format!("bad y coordinate `{y}`"))?;
        if !(x.is_finite() && y.is_finite()) {
            bail!("coordinates must be finite, got ({x}, {y})");
        }
        Ok(Point::new(x, y))
    };
    let cmd = match (verb, rest.as_slice()) {
        ("add", args) => Command::Add(point(args)?),
        ("remove", args) => Command::Remove(point(args)?),
        ("peel", []) => Command::Peel,
        ("readd", []) => Command::ReAdd,
        ("algo", [name]) => Command::Algo(name.to_string()),
        ("recompute", []) => Command::Recompute,
        ("show", []) => Command::Show,
        _ => return Err(anyhow!("unrecognised command `{line}`")),
    };
    Ok(Some(cmd))
}

/// Apply every command in `text`; `show` snapshots are returned in order.
pub fn run(engine: &mut LayerEngine, text: &str) -> Result<Vec<LayersReport>> {
    let mut shown = Vec::new();
    for (k, line) in text.lines().enumerate() {
        let Some(cmd) = parse_line(line).with_context(|| format!("script line {}", k + 1))? else {
            continue;
        };
        tracing::info!(line = k + 1, ?cmd, "script");
        match cmd {
            Command::Add(p) => engine.add_point(p)?,
            Command::Remove(p) => {
                engine.remove_point(p)?;
            }
            Command::Peel => {
                engine.peel_one_layer()?;
            }
            Command::ReAdd => {
                engine.re_add_layer()?;
            }
            Command::Algo(name) => engine.set_algorithm_by_name(&name)?,
            Command::Recompute => engine.recompute()?,
            Command::Show => shown.push(LayersReport::from_engine(engine)),
        }
    }
    Ok(shown)
}
