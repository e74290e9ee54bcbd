use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use holefit::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod naming;

#[derive(Parser)]
#[command(name = "holefit")]
#[command(about = "Evaluate, relax and edit poses for hole-fitting problems")]
#[command(version = holefit::VERSION)]
struct Cmd {
    /// Problem record (JSON)
    #[arg(long)]
    problem: PathBuf,

    /// Prior solution; the figure's source positions are used when absent or unusable
    #[arg(long)]
    solution: Option<PathBuf>,

    /// Held bonus as KIND=ID (e.g. GLOBALIST=42); repeatable, overrides the solution's list
    #[arg(long = "held")]
    held: Vec<HeldBonus>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the verdict, per-edge status counts and dislikes
    Eval,
    /// Run relaxation ticks and save the result
    Relax {
        #[arg(long, default_value_t = 1000)]
        ticks: usize,
        #[command(flatten)]
        passes: Passes,
        #[command(flatten)]
        out: Output,
    },
    /// Run the length-signature matchers and save the result
    Match {
        /// Only center uniquely matching edges on hole edges
        #[arg(long, conflicts_with = "corners")]
        edges: bool,
        /// Only snap uniquely matching vertices onto hole corners
        #[arg(long)]
        corners: bool,
        #[command(flatten)]
        out: Output,
    },
    /// Apply rigid edits and save the result
    Edit {
        #[command(flatten)]
        edits: Edits,
        #[command(flatten)]
        out: Output,
    },
}

#[derive(Args)]
struct Passes {
    /// Pull edges toward their source length
    #[arg(long)]
    unstretch: bool,
    /// Pull outside vertices onto the hole boundary
    #[arg(long)]
    stuff: bool,
    /// Pull the nearest vertex onto each hole vertex
    #[arg(long)]
    fill: bool,
    /// Pull the nearest vertex onto each bonus
    #[arg(long)]
    bonus_fill: bool,
    /// Unstretch valid edges as well
    #[arg(long)]
    unstretch_all: bool,
    /// Snap unstretched endpoints to integers
    #[arg(long)]
    integer: bool,
    /// Let vertices on hole vertices move while unstretching
    #[arg(long)]
    loose_hole: bool,
    /// Let vertices on bonuses move while unstretching
    #[arg(long)]
    loose_bonus: bool,
    /// Only unstretch edges touching this vertex
    #[arg(long)]
    focus: Option<usize>,
}

impl Passes {
    /// Selected passes, or Unstretch + Stuff + Fill when none is named.
    fn cfg(&self) -> StepCfg {
        let base = StepCfg {
            unstretch: self.unstretch,
            stuff: self.stuff,
            fill: self.fill,
            bonus_fill: self.bonus_fill,
            ..StepCfg::default()
        };
        let base = if base.any_enabled() { base } else { StepCfg::auto() };
        StepCfg {
            unstretch_all: self.unstretch_all,
            integer_unstretch: self.integer,
            sticky_hole: !self.loose_hole,
            sticky_bonus: !self.loose_bonus,
            focus: self.focus,
            ..base
        }
    }
}

#[derive(Args)]
struct Edits {
    /// Put every vertex back on its source position first
    #[arg(long)]
    reset: bool,
    /// Move one vertex: I=X,Y (repeatable)
    #[arg(long = "set", value_parser = parse_assignment)]
    set: Vec<(usize, Point)>,
    /// Shift the pose by DX,DY
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    translate: Option<Point>,
    /// Rotate by DEG degrees counterclockwise about the vertex nearest --pivot
    #[arg(long, requires = "pivot", allow_hyphen_values = true)]
    rotate: Option<f64>,
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pivot: Option<Point>,
    /// Reflect across the hole's vertical center line
    #[arg(long)]
    mirror: bool,
    /// Scale about the figure center by this factor and center on the hole
    #[arg(long)]
    spread: Option<f64>,
    /// Round every coordinate to the nearest integer (applied last)
    #[arg(long)]
    round: bool,
}

#[derive(Args)]
struct Output {
    /// Output path; defaults to a name encoding held bonuses, dislikes and collected bonuses
    #[arg(long)]
    out: Option<PathBuf>,
    /// Print the report without writing a solution
    #[arg(long)]
    dry_run: bool,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got `{s}`"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad coordinate `{v}`: {e}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

fn parse_assignment(s: &str) -> Result<(usize, Point), String> {
    let (index, at) = s
        .split_once('=')
        .ok_or_else(|| format!("expected I=X,Y, got `{s}`"))?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("bad vertex index `{index}`: {e}"))?;
    Ok((index, parse_point(at)?))
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let mut session = open(&cmd)?;
    match cmd.action {
        Action::Eval => {
            print_report(&session, serde_json::json!({}))?;
            Ok(())
        }
        Action::Relax {
            ticks,
            passes,
            out,
        } => relax(&mut session, ticks, &passes, &out, cmd.solution.as_deref()),
        Action::Match {
            edges,
            corners,
            out,
        } => run_match(&mut session, edges, corners, &out, cmd.solution.as_deref()),
        Action::Edit { edits, out } => edit(&mut session, &edits, &out, cmd.solution.as_deref()),
    }
}

fn open(cmd: &Cmd) -> Result<Session> {
    let mut session = Session::open(&cmd.problem, cmd.solution.as_deref())
        .with_context(|| format!("opening problem {}", cmd.problem.display()))?;
    if !cmd.held.is_empty() {
        session.set_held(cmd.held.iter().cloned().collect());
    }
    tracing::info!(
        problem = %cmd.problem.display(),
        vertices = session.pose().len(),
        held = session.held().iter().count(),
        "session"
    );
    Ok(session)
}

fn relax(
    session: &mut Session,
    ticks: usize,
    passes: &Passes,
    out: &Output,
    solution: Option<&Path>,
) -> Result<()> {
    let cfg = passes.cfg();
    let (ran, eval) = session.relax(&cfg, ticks);
    tracing::info!(ticks = ran, verdict = eval.verdict, dislikes = eval.dislikes, "relax");
    finish(session, out, solution, serde_json::json!({ "ticks": ran }))
}

fn run_match(
    session: &mut Session,
    edges: bool,
    corners: bool,
    out: &Output,
    solution: Option<&Path>,
) -> Result<()> {
    let both = !edges && !corners;
    let mut placed = 0;
    let mut ambiguous = 0;
    if edges || both {
        let report = session.match_edges();
        placed += report.placements.len();
        ambiguous += report.ambiguous;
    }
    if corners || both {
        let report = session.match_corners();
        placed += report.placements.len();
        ambiguous += report.ambiguous;
    }
    tracing::info!(placed, ambiguous, "match");
    finish(
        session,
        out,
        solution,
        serde_json::json!({ "placed": placed, "ambiguous": ambiguous }),
    )
}

fn edit(session: &mut Session, edits: &Edits, out: &Output, solution: Option<&Path>) -> Result<()> {
    if edits.reset {
        session.reset();
    }
    for &(index, at) in &edits.set {
        if !session.set_vertex(index, at) {
            bail!("vertex {index} out of range (pose has {})", session.pose().len());
        }
    }
    if let Some(delta) = edits.translate {
        session.translate(delta);
    }
    if let (Some(deg), Some(pivot)) = (edits.rotate, edits.pivot) {
        let vertex = session.rotate_about_nearest(pivot, deg.to_radians());
        tracing::info!(deg, pivot = ?vertex, "rotate");
    }
    if edits.mirror {
        session.mirror();
    }
    if let Some(factor) = edits.spread {
        session.spread(factor);
    }
    if edits.round {
        session.snap_to_integer();
    }
    finish(session, out, solution, serde_json::json!({}))
}

/// Save (unless `--dry-run`) and print the report.
fn finish(
    session: &Session,
    out: &Output,
    solution: Option<&Path>,
    mut extra: serde_json::Value,
) -> Result<()> {
    if !out.dry_run {
        let eval = session.evaluate();
        let path = out.out.clone().unwrap_or_else(|| {
            naming::suggested_path(solution, &eval, session.held(), session.problem())
        });
        session
            .save(&path)
            .with_context(|| format!("saving solution to {}", path.display()))?;
        extra["saved"] = serde_json::json!(path.to_string_lossy());
    }
    print_report(session, extra)
}

/// JSON summary printed after every action.
#[derive(Serialize)]
struct Report<'a> {
    verdict: bool,
    dislikes: f64,
    signed_dislikes: f64,
    edges: usize,
    overstretched: usize,
    out_of_hole: usize,
    global_deviation: Option<f64>,
    wallhack_vertex: Option<usize>,
    collected: Vec<Tagged<'a>>,
    held: Vec<Tagged<'a>>,
    run: serde_json::Value,
}

#[derive(Serialize)]
struct Tagged<'a> {
    bonus: BonusKind,
    problem: &'a ProblemId,
}

fn print_report(session: &Session, run: serde_json::Value) -> Result<()> {
    let eval = session.evaluate();
    let bonuses = session.problem().bonuses();
    let report = Report {
        verdict: eval.verdict,
        dislikes: eval.dislikes,
        signed_dislikes: eval.signed_dislikes(),
        edges: eval.edges.len(),
        overstretched: eval.overstretched,
        out_of_hole: eval.out_of_hole,
        global_deviation: eval.global_deviation,
        wallhack_vertex: eval.wallhack_vertex,
        collected: eval
            .collected
            .iter()
            .map(|&i| Tagged {
                bonus: bonuses[i].kind,
                problem: &bonuses[i].problem,
            })
            .collect(),
        held: session
            .held()
            .iter()
            .map(|h| Tagged {
                bonus: h.kind,
                problem: &h.problem,
            })
            .collect(),
        run,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
