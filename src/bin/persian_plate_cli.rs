//! Persian Plate CLI - JSON bridge
//!
//! Commands: validate, decode, encode, from-code, latin, render
//! Outputs JSON to stdout, logs to stderr
//! Returns 2 on plate validation failure

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use persian_plate_core::{
    convert::date_stamp_for, attach_date, to_component_array, to_display_string,
    to_numeric_code, PlatePipeline, PlateRenderer, PlateTables, TemplateSet, ENGINE_VERSION,
};

#[derive(Parser)]
#[command(name = "persian-plate-cli")]
#[command(about = "Persian Plate CLI - decode, convert and render vehicle plates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Lookup tables JSON (defaults to the bundled tables)
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Directory holding font.ttf and plate-*.png templates
    #[arg(long, default_value = "resources")]
    assets: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a plate against the grammar
    Validate {
        #[arg(short, long)]
        plate: String,
    },

    /// Decode a plate into its full record
    Decode {
        #[arg(short, long)]
        plate: String,

        /// Date stamp, yy-mm-dd
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Numeric code for a plate
    Encode {
        #[arg(short, long)]
        plate: String,
    },

    /// Decode a 9-digit numeric code
    FromCode {
        #[arg(short, long)]
        code: String,
    },

    /// Latin transliteration
    Latin {
        #[arg(short, long)]
        plate: String,

        /// Prefix the country code
        #[arg(long)]
        prefix: bool,
    },

    /// Render a plate image
    Render {
        #[arg(short, long)]
        plate: String,

        /// Date stamp, yy-mm-dd
        #[arg(short, long, conflicts_with = "today")]
        date: Option<String>,

        /// Stamp with today's date
        #[arg(long)]
        today: bool,

        /// Write the PNG here as well
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn fail(code: u8, error: impl std::fmt::Display) -> ExitCode {
    let output = serde_json::json!({ "success": false, "error": error.to_string() });
    println!("{}", output);
    ExitCode::from(code)
}

fn emit(value: serde_json::Value) -> ExitCode {
    match serde_json::to_string_pretty(&value) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => fail(1, e),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let tables = match &cli.tables {
        Some(path) => PlateTables::load_from_file(path),
        None => PlateTables::bundled(),
    };
    let tables = match tables {
        Ok(t) => t,
        Err(e) => return fail(1, format!("Failed to load tables: {}", e)),
    };

    let pipeline = match PlatePipeline::new(tables) {
        Ok(p) => p,
        Err(e) => return fail(1, e),
    };

    match cli.command {
        Commands::Validate { plate } => {
            let valid = pipeline.validate(&plate);
            println!("{}", serde_json::json!({ "valid": valid }));
            if valid { ExitCode::SUCCESS } else { ExitCode::from(2) }
        }

        Commands::Decode { plate, date } => {
            let decoded = pipeline.decode(&plate)
                .and_then(|p| match &date {
                    Some(d) => attach_date(&p, d),
                    None => Ok(p),
                });
            match decoded {
                Ok(p) => emit(serde_json::json!({
                    "success": true,
                    "plate": p,
                    "numericCode": to_numeric_code(&p),
                    "display": to_display_string(&p),
                    "components": to_component_array(&p),
                    "latin": pipeline.latin_text(&p, true),
                    "isTaxi": p.is_taxi(),
                })),
                Err(e) => fail(2, e),
            }
        }

        Commands::Encode { plate } => match pipeline.decode(&plate) {
            Ok(p) => emit(serde_json::json!({ "success": true, "numericCode": to_numeric_code(&p) })),
            Err(e) => fail(2, e),
        },

        Commands::FromCode { code } => match pipeline.decode_code(&code) {
            Ok(p) => emit(serde_json::json!({
                "success": true,
                "display": to_display_string(&p),
                "plate": p,
            })),
            Err(e) => fail(2, e),
        },

        Commands::Latin { plate, prefix } => match pipeline.decode(&plate) {
            Ok(p) => emit(serde_json::json!({ "success": true, "latin": pipeline.latin_text(&p, prefix) })),
            Err(e) => fail(2, e),
        },

        Commands::Render { plate, date, today, out } => {
            let renderer = match TemplateSet::load_from_dir(&cli.assets).and_then(PlateRenderer::new) {
                Ok(r) => r,
                Err(e) => return fail(1, format!("Failed to load templates: {}", e)),
            };
            let pipeline = pipeline.with_renderer(renderer);

            let date = if today {
                Some(date_stamp_for(chrono::Local::now().date_naive()))
            } else {
                date
            };

            let rendered = match pipeline.render_input(&plate, date.as_deref()) {
                Ok(r) => r,
                Err(e) => return fail(2, e),
            };

            if let Some(path) = &out {
                if let Err(e) = fs::write(path, &rendered.png) {
                    return fail(1, format!("Failed to write {}: {}", path.display(), e));
                }
            }

            emit(serde_json::json!({
                "success": true,
                "engineVersion": ENGINE_VERSION,
                "rendered": rendered,
            }))
        }
    }
}
