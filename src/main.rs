use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, warn};

use ntc_underwriter::config::{Config, ThemeSetting};
use ntc_underwriter::output;
use ntc_underwriter::scoring::{ApplicantInput, CollegeTier, Major, ScoreEngine};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INVALID_PROFILE: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Score card plus waterfall chart
    Text,
    /// Full report as JSON
    Json,
    /// Tab-separated label/delta rows
    Tsv,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive what-if calculator (default if no subcommand)
    Tui {
        /// Override the configured colour theme
        #[arg(long, value_enum)]
        theme: Option<ThemeSetting>,
    },
    /// Score one applicant profile
    Score {
        /// College tier
        #[arg(long, value_enum)]
        tier: CollegeTier,

        /// Major; mapped onto its stream weight class
        #[arg(long, value_enum)]
        major: Major,

        /// CGPA on a 10-point scale (5.0 to 10.0)
        #[arg(long)]
        gpa: f64,

        /// Completed internships (0 to 5)
        #[arg(long, default_value_t = 0)]
        internships: u32,

        /// Applicant has an active backlog
        #[arg(long)]
        backlog: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show the decision band for a total score
    Classify {
        #[arg(allow_negative_numbers = true)]
        total: i32,
    },
    /// Print the underwriting hypothesis and weightage notes
    Explain,
    /// Write the default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "ntc-underwriter")]
#[command(about = "Future-potential credit scoring for new-to-credit students", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/ntc-underwriter/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui { theme: None });
    let config_path = cli.config.map(PathBuf::from);

    // Init runs before loading, so a broken config file can be replaced
    if let Commands::Init { force } = command {
        init_logging(cli.verbose, None);
        match ntc_underwriter::config::write_default_config(config_path, force) {
            Ok(path) => println!("Wrote default config to {}", path.display()),
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match ntc_underwriter::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    init_logging(cli.verbose, config.log_level.as_deref());

    // Validate scoring config at startup
    if let Err(errors) = ntc_underwriter::scoring::validate_scoring(&config.scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let Config {
        theme,
        scoring,
        applicant,
        ..
    } = config;
    let engine = ScoreEngine::new(scoring);
    let use_colors = output::should_use_colors();

    match command {
        Commands::Tui { theme: override_theme } => {
            if let Err(e) = applicant.to_profile() {
                warn!(error = %e, "configured starting profile is invalid");
            }

            // Resolve before the TUI owns the terminal; detection queries it
            let colors = ntc_underwriter::tui::resolve_theme(override_theme.unwrap_or(theme));
            let app = ntc_underwriter::tui::App::new(engine, applicant, colors);

            if let Err(e) = ntc_underwriter::tui::run_tui(app).await {
                eprintln!("TUI error: {:#}", e);
                std::process::exit(EXIT_IO);
            }
        }
        Commands::Score {
            tier,
            major,
            gpa,
            internships,
            backlog,
            format,
        } => {
            let input = ApplicantInput {
                college_tier: tier,
                major,
                gpa,
                internships,
                active_backlog: backlog,
            };
            let code = run_score(&engine, &input, format, use_colors);
            std::process::exit(code);
        }
        Commands::Classify { total } => {
            let decision = engine.classify(total);
            debug!(total, ?decision, "classified");
            println!(
                "{}",
                output::format_classification(total, decision, use_colors)
            );
        }
        Commands::Explain => {
            println!("{}", output::format_logic(use_colors));
        }
        // Handled before the config is loaded
        Commands::Init { .. } => {}
    }

    std::process::exit(EXIT_SUCCESS);
}

fn init_logging(verbose: bool, configured: Option<&str>) {
    let level = ntc_underwriter::telemetry::resolve_level(verbose, configured);
    if let Err(e) = ntc_underwriter::telemetry::init(&level) {
        eprintln!("Config error: {}", e);
        std::process::exit(EXIT_CONFIG);
    }
}

fn run_score(
    engine: &ScoreEngine,
    input: &ApplicantInput,
    format: OutputFormat,
    use_colors: bool,
) -> i32 {
    let evaluation = input
        .to_profile()
        .and_then(|profile| engine.evaluate(&profile).map(|result| (profile, result)));

    let (profile, result) = match evaluation {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid profile: {}", e);
            return EXIT_INVALID_PROFILE;
        }
    };
    let decision = engine.classify(result.total);

    match format {
        OutputFormat::Text => {
            println!("{}", output::format_applicant(input, use_colors));
            println!();
            println!(
                "{}",
                output::format_score_card(&result, decision, use_colors)
            );
            println!();
            println!("{}", output::format_breakdown(&result, use_colors));
        }
        OutputFormat::Json => {
            let report = output::ScoreReport::new(&profile, &result, decision);
            match output::format_json(&report) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Output error: {:#}", e);
                    return EXIT_IO;
                }
            }
        }
        OutputFormat::Tsv => println!("{}", output::format_tsv(&result)),
    }

    EXIT_SUCCESS
}
