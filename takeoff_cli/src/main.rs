//! # Groundwork CLI
//!
//! Terminal front end for the fence takeoff engine.
//!
//! ```text
//! takeoff fence garden.toml            # text bill of quantities
//! takeoff fence garden.json --format json
//! takeoff template --format toml > garden.toml
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (e.g. `RUST_LOG=takeoff_core=debug`).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use takeoff_core::calculations::fence::{BillOfQuantities, FenceInput, LayoutDetail};
use takeoff_core::{compute_fence_bom, load_input};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "takeoff",
    version,
    about = "Fence material takeoff: posts, panels, boards, rails and fixings."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute a bill of quantities from a .json or .toml input file.
    Fence(FenceArgs),
    /// Print an example input file to start from.
    Template(TemplateArgs),
}

#[derive(Debug, Parser)]
struct FenceArgs {
    /// Input file (.json or .toml).
    input: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct TemplateArgs {
    /// Template format.
    #[arg(long, value_enum, default_value_t = TemplateFormat::Json)]
    format: TemplateFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TemplateFormat {
    Json,
    Toml,
}

/// Exit status when the input describes no fence.
const EXIT_NO_RESULT: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.cmd {
        Command::Fence(args) => cmd_fence(args),
        Command::Template(args) => cmd_template(args).map(|()| ExitCode::SUCCESS),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn cmd_fence(args: FenceArgs) -> anyhow::Result<ExitCode> {
    let input =
        load_input(&args.input).with_context(|| format!("load {}", args.input.display()))?;

    let Some(bom) = compute_fence_bom(&input) else {
        info!("No enabled side with a usable length and specification");
        println!("Nothing to take off: enable at least one side with a positive length.");
        return Ok(ExitCode::from(EXIT_NO_RESULT));
    };

    match args.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&bom).context("serialize bill of quantities")?;
            println!("{}", json);
        }
        OutputFormat::Text => print_bom(&bom),
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_template(args: TemplateArgs) -> anyhow::Result<()> {
    let example = FenceInput::example();
    let text = match args.format {
        TemplateFormat::Json => {
            serde_json::to_string_pretty(&example).context("serialize template")?
        }
        TemplateFormat::Toml => toml::to_string_pretty(&example).context("serialize template")?,
    };
    println!("{}", text);
    Ok(())
}

fn print_bom(bom: &BillOfQuantities) {
    let spec = &bom.specification;

    println!("═══════════════════════════════════════");
    println!("  FENCE BILL OF QUANTITIES");
    println!("═══════════════════════════════════════");
    println!();
    println!("Fence:");
    println!("  Type:    {}", bom.fence_type.display_name());
    println!("  Height:  {:.0} mm", spec.fence_height_mm);
    println!("  Length:  {:.2} m over {} side(s)", bom.total_length_m, bom.sides.len());
    println!(
        "  Posts:   {} x {:.0} mm ({:.0} mm in ground)",
        spec.post_type.section_label(),
        bom.post_height_mm,
        spec.post_depth_mm
    );
    println!();

    println!("Sides:");
    for side in &bom.sides {
        let layout = &side.layout;
        match &layout.detail {
            LayoutDetail::Panels {
                full_panel_count,
                cut_panel_width_mm,
                ..
            } => {
                let cut = if *cut_panel_width_mm > 0.0 {
                    format!(" + cut panel {:.0} mm", cut_panel_width_mm)
                } else {
                    String::new()
                };
                println!(
                    "  {}: {:.0} mm  {} posts, {} full panels{}",
                    side.side_number, side.length_mm, layout.posts, full_panel_count, cut
                );
            }
            LayoutDetail::Boards {
                board_count,
                rail_count,
            } => {
                println!(
                    "  {}: {:.0} mm  {} posts at {:.0} mm, {} boards, {} rails",
                    side.side_number,
                    side.length_mm,
                    layout.posts,
                    layout.actual_spacing_mm,
                    board_count,
                    rail_count
                );
            }
        }
    }
    println!();

    println!("Totals:");
    println!(
        "  Posts:   {} ({} raw, {} shared corners)",
        bom.net_posts, bom.total_posts_raw, bom.shared_corners
    );
    if bom.fence_type.is_board_fence() {
        println!(
            "  Boards:  {} ({} + {:.0}% waste)",
            bom.total_boards, bom.boards_before_waste, spec.waste_percent
        );
        println!("  Rails:   {}", bom.total_rails);
    } else {
        println!(
            "  Panels:  {} ({} full, {} cut)",
            bom.total_panels, bom.full_panels, bom.cut_panels
        );
    }
    println!("  Concrete: {:.2} bags", bom.hardware.concrete_bags);
    println!();

    println!("═══════════════════════════════════════");
    println!("  SHOPPING LIST");
    println!("═══════════════════════════════════════");
    for line in bom.line_items() {
        println!(
            "  {:>8} {:<4} {}",
            format_quantity(line.quantity),
            line.unit.label(),
            line.description
        );
    }
}

fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{:.0}", quantity)
    } else {
        format!("{:.2}", quantity)
    }
}
