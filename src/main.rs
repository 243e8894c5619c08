use citadel::args::{validate_args, Args};
use citadel::deterministic_rng::run_rng;
use citadel::error::GenerationError;
use citadel::layout::{self, GenerationReport};
use citadel::overview;
use citadel::world_editor::http::GdmcClient;
use citadel::world_editor::{WorldEditor, WorldInterface};
use clap::Parser;
use colored::*;
use env_logger::Env;

fn print_banner() {
    let version: &str = env!("CARGO_PKG_VERSION");
    println!(
        r#"
     ▄████▄   ██▓▄▄▄█████▓ ▄▄▄      ▓█████▄ ▓█████  ██▓
    ▒██▀ ▀█  ▓██▒▓  ██▒ ▓▒▒████▄    ▒██▀ ██▌▓█   ▀ ▓██▒
    ▒▓█    ▄ ▒██▒▒ ▓██░ ▒░▒██  ▀█▄  ░██   █▌▒███   ▒██░
    ▒▓▓▄ ▄██▒░██░░ ▓██▓ ░ ░██▄▄▄▄██ ░▓█▄   ▌▒▓█  ▄ ▒██░
    ▒ ▓███▀ ░░██░  ▒██▒ ░  ▓█   ▓██▒░▒████▓ ░▒████▒░██████▒

                          version {}
        "#,
        version
    );
}

fn run(args: &Args) -> Result<GenerationReport, GenerationError> {
    let mut client = GdmcClient::new(&args.host)?;

    println!("{} Connecting to {}...", "[1/5]".bold(), client.host());
    client.check_connection()?;

    println!("{} Fetching build area...", "[2/5]".bold());
    let area = client.build_area()?;

    println!("{} Reading heightmap...", "[3/5]".bold());
    let heightmap = client.heightmap(&area)?;

    println!("{} Generating towers and castle...", "[4/5]".bold());
    let mut editor = WorldEditor::new(client, run_rng(args.seed));
    let report = layout::generate(&mut editor, &area, &heightmap, args)?;

    println!("{} Rendering overview...", "[5/5]".bold());
    let heightmap = editor.world_mut().heightmap(&area)?;
    overview::render(&heightmap, &args.overview)?;

    Ok(report)
}

fn print_summary(report: &GenerationReport, args: &Args) {
    println!("{}", "Done!".green().bold());
    println!("Center:  {}", report.center);
    println!("Castle:  {}", report.castle);
    for (district, kind) in &report.interiors {
        let origin = report
            .towers
            .iter()
            .find(|(d, _)| d == district)
            .map(|(_, origin)| origin.to_string())
            .unwrap_or_default();
        println!("Tower {district}: {kind} at {origin}");
    }
    println!(
        "Placed {} blocks in {} batches, overview at {}",
        report.blocks,
        report.batches,
        args.overview.display()
    );
}

fn main() {
    print_banner();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args: Args = Args::parse();
    if let Err(e) = validate_args(&args) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }

    match run(&args) {
        Ok(report) => print_summary(&report, &args),
        Err(e) => {
            eprintln!("{}", e.to_string().red().bold());
            if let Some(hint) = e.remediation() {
                eprintln!("{hint}");
            }
            std::process::exit(1);
        }
    }
}
