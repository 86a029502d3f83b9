use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use honeycomb::api::{
    fundamental_simplex, ColorPolicy, Config, CoxeterDiagram, GenerationContext,
    NO_RELATION_GRAM, TOKEN_TOLERANCE,
};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod export;
mod provenance;

use export::{ClassifyDoc, HoneycombDoc};
use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "honeycomb-cli")]
#[command(about = "Generate vertex/edge skeletons of Coxeter honeycombs")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    Orbit,
    Depth,
}

impl From<ColorArg> for ColorPolicy {
    fn from(c: ColorArg) -> Self {
        match c {
            ColorArg::Orbit => ColorPolicy::Orbit,
            ColorArg::Depth => ColorPolicy::Depth,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Expand a diagram and write the honeycomb JSON plus a provenance sidecar
    Generate {
        /// Schläfli symbol ("4,3,5") or full relation matrix ("1 3 2; 3 1 4; 2 4 1")
        #[arg(long)]
        diagram: CoxeterDiagram,
        /// Deepest chamber (reflection word length) to expand
        #[arg(long)]
        depth: Option<usize>,
        /// Largest distance from the origin of an expanded chamber
        #[arg(long)]
        radius: Option<f64>,
        /// Stop enqueuing chambers once this many vertices exist
        #[arg(long)]
        max_vertices: Option<usize>,
        #[arg(long, default_value_t = TOKEN_TOLERANCE)]
        tolerance: f64,
        /// Gram entry for "inf" relations (<= -1)
        #[arg(long, default_value_t = NO_RELATION_GRAM, allow_hyphen_values = true)]
        no_relation: f64,
        #[arg(long, value_enum, default_value = "orbit")]
        color: ColorArg,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the geometry, Gram matrix and vertex kinds of a diagram
    Classify {
        #[arg(long)]
        diagram: CoxeterDiagram,
        #[arg(long, default_value_t = NO_RELATION_GRAM, allow_hyphen_values = true)]
        no_relation: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate {
            diagram,
            depth,
            radius,
            max_vertices,
            tolerance,
            no_relation,
            color,
            out,
        } => {
            let mut cfg = Config::for_diagram(&diagram).with_tolerance(tolerance);
            cfg.no_relation_gram = no_relation;
            cfg.bound.max_depth = depth;
            cfg.bound.max_radius = radius;
            cfg.bound.max_vertices = max_vertices;
            cfg.color = color.into();
            generate(&diagram, &cfg, out)
        }
        Action::Classify {
            diagram,
            no_relation,
        } => classify(&diagram, no_relation),
        Action::Report => report(),
    }
}

fn generate(diagram: &CoxeterDiagram, cfg: &Config, out: PathBuf) -> Result<()> {
    tracing::info!(diagram = %diagram, out = %out.display(), "generate");
    let mut ctx = GenerationContext::new();
    let stats = ctx
        .generate(cfg)
        .with_context(|| format!("expanding diagram {diagram}"))?;
    tracing::info!(
        geometry = %stats.kind,
        vertices = stats.vertices,
        edges = stats.edges,
        bound_hit = stats.bound_hit,
        "expanded"
    );

    let doc = HoneycombDoc::new(diagram.to_string(), &stats, &ctx.honeycomb());
    export::write_json(&out, &doc)?;
    let params = serde_json::json!({
        "diagram": diagram.to_string(),
        "max_depth": cfg.bound.max_depth,
        "max_radius": cfg.bound.max_radius,
        "max_vertices": cfg.bound.max_vertices,
        "tolerance": cfg.tolerance,
        "no_relation_gram": cfg.no_relation_gram,
        "color": format!("{:?}", cfg.color),
    });
    let prov = write_sidecar(&out, &Payload::new("generate", params))?;
    tracing::info!(provenance = %prov.display(), "wrote");
    Ok(())
}

fn classify(diagram: &CoxeterDiagram, no_relation: f64) -> Result<()> {
    let simplex = fundamental_simplex(diagram, no_relation)
        .with_context(|| format!("classifying diagram {diagram}"))?;
    let doc = ClassifyDoc::new(diagram, no_relation, &simplex);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "honeycomb_version": honeycomb::VERSION,
        "defaults": {
            "tolerance": TOKEN_TOLERANCE,
            "no_relation_gram": NO_RELATION_GRAM,
        },
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
