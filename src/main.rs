use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use graphcalc::{
  Bindings, EngineConfig, MathEngine, Point2D, format_number, seed_rng,
};
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Seed for random() and randomInt(), for reproducible output
  #[arg(long, global = true)]
  seed: Option<u64>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate an expression the way the calculator display does
  Eval {
    /// The expression to evaluate
    expression: String,
  },
  /// List the free variables of an expression
  Vars { expression: String },
  /// Evaluate an expression with variable values
  Calc {
    expression: String,
    /// A binding such as `x=3`; may be repeated
    #[arg(long = "var", value_parser = parse_binding)]
    vars: Vec<(String, f64)>,
    /// Significant digits in the printed result
    #[arg(long, default_value_t = 6)]
    precision: usize,
  },
  /// Sample an expression over a range of x
  Plot {
    expression: String,
    #[arg(long, default_value_t = -10.0, allow_hyphen_values = true)]
    x_min: f64,
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    x_max: f64,
    /// Distance between samples [default: 0.1]
    #[arg(long)]
    step: Option<f64>,
    /// Refuse domains with more samples than this
    #[arg(long)]
    max_samples: Option<usize>,
    /// Print a JSON document instead of tab-separated lines
    #[arg(long)]
    json: bool,
    /// Group points into runs separated by gaps
    #[arg(long)]
    segments: bool,
  },
}

fn parse_binding(raw: &str) -> Result<(String, f64), String> {
  let (name, value) = raw
    .split_once('=')
    .ok_or_else(|| format!("expected name=value, got {raw:?}"))?;
  let value = value
    .trim()
    .parse::<f64>()
    .map_err(|e| format!("invalid value for {name}: {e}"))?;
  Ok((name.trim().to_string(), value))
}

fn points_json(points: &[Point2D]) -> serde_json::Value {
  points
    .iter()
    .map(|p| json!({ "x": p.x, "y": p.y }))
    .collect()
}

fn main() -> Result<()> {
  env_logger::init();
  let cli = Cli::parse();

  if let Some(seed) = cli.seed {
    seed_rng(seed);
  }

  match cli.command {
    Commands::Eval { expression } => {
      let result = MathEngine::default().evaluate_simple(expression.as_str());
      println!("{result}");
    }
    Commands::Vars { expression } => {
      let compiled = MathEngine::default().parse(expression.as_str())?;
      println!("{}", compiled.variables().join(" "));
    }
    Commands::Calc {
      expression,
      vars,
      precision,
    } => {
      let engine = MathEngine::default();
      let compiled = engine.parse(expression.as_str())?;
      let bindings: Bindings = vars.into_iter().collect();
      let result = engine
        .evaluate(&compiled, &bindings)
        .with_context(|| format!("evaluating {:?}", compiled.source()))?;
      println!("{}", format_number(result, precision));
    }
    Commands::Plot {
      expression,
      x_min,
      x_max,
      step,
      max_samples,
      json,
      segments,
    } => {
      let engine = MathEngine::new(EngineConfig {
        max_samples,
        ..EngineConfig::default()
      });
      let runs = if segments {
        engine.sample_segments(&expression, x_min, x_max, step)?
      } else {
        vec![engine.sample_points(&expression, x_min, x_max, step)?]
      };

      if json {
        let body = if segments {
          let segments: Vec<_> =
            runs.iter().map(|r| points_json(r.as_slice())).collect();
          json!({ "expression": expression, "segments": segments })
        } else {
          let points = runs.first().map(|r| points_json(r.as_slice()));
          json!({ "expression": expression, "points": points })
        };
        let text = serde_json::to_string_pretty(&body)
          .map_err(|e| anyhow!("cannot render points: {e}"))?;
        println!("{text}");
      } else {
        for (i, run) in runs.iter().enumerate() {
          if i > 0 {
            println!();
          }
          for point in run {
            println!("{}\t{}", point.x, point.y);
          }
        }
      }
    }
  }

  Ok(())
}
