//! Compliance Archive Audit CLI (idfa) - Main binary entry point

use idfa::cli::args::{Command, ReportArgs, parse_args};
use idfa::cli::output::{format_json, format_text};
use idfa::{AuditOptions, AuditReport, AuditResponse, Taxonomy};
use std::path::PathBuf;
use std::process;

fn main() {
    // Initialize logger (controlled by RUST_LOG environment variable)
    // Example: RUST_LOG=debug idfa audit /archive/10.\ Outubro
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "--help" | "-h" => {
            print_help();
            return;
        }
        "--version" | "-v" => {
            print_version();
            return;
        }
        _ => {}
    }

    let cli_args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Use --help for usage information");
            process::exit(2);
        }
    };

    let exit_code = match &cli_args.command {
        Command::Audit(audit_args) => {
            run_audit(&audit_args.report, |opts| {
                idfa::audit_archive(&audit_args.path, opts)
            })
        }
        Command::Period(period_args) => {
            let Some(base) = period_args
                .base
                .as_ref()
                .map(PathBuf::from)
                .or_else(idfa::period::base_from_env)
            else {
                eprintln!(
                    "Error: --base is required when {} is not set",
                    idfa::period::BASE_PATH_ENV
                );
                process::exit(2);
            };
            run_audit(&period_args.report, |opts| {
                idfa::audit_period(&base, &period_args.selector, opts)
            })
        }
        Command::View(view_args) => handle_view(view_args),
    };

    process::exit(exit_code);
}

fn exit_code_for(err: &idfa::Error) -> i32 {
    match err {
        idfa::Error::InvalidInput(_) | idfa::Error::Taxonomy(_) => 2,
        idfa::Error::RootNotFound(_) => 3,
        idfa::Error::Io(_) => 4,
    }
}

fn load_options(args: &ReportArgs) -> idfa::Result<AuditOptions> {
    match &args.taxonomy {
        Some(path) => Ok(AuditOptions {
            taxonomy: Taxonomy::from_file(path)?,
        }),
        None => Ok(AuditOptions::default()),
    }
}

fn run_audit<F>(args: &ReportArgs, audit: F) -> i32
where
    F: FnOnce(&AuditOptions) -> idfa::Result<AuditReport>,
{
    let opts = match load_options(args) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {e}");
            return exit_code_for(&e);
        }
    };

    let report = match audit(&opts) {
        Ok(r) => r,
        Err(idfa::Error::RootNotFound(path)) if args.json => {
            println!("{}", format_json(&AuditResponse::root_not_found(&path)));
            return 3;
        }
        Err(e) => {
            eprintln!("Error: {e}");
            return exit_code_for(&e);
        }
    };

    if let Some(export_path) = &args.export {
        if let Err(e) = idfa::io::export::write_report(export_path, &report) {
            eprintln!("Error: Failed to export report: {e}");
            return 4;
        }
        if !args.quiet {
            eprintln!("Report exported: {export_path}");
        }
    }

    print_report(report, args.json, args.pending);
    0
}

fn handle_view(args: &idfa::cli::args::ViewArgs) -> i32 {
    let report = match idfa::io::export::read_report(&args.from_export) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error reading export: {e}");
            return 4;
        }
    };

    print_report(report, args.json, args.pending);
    0
}

fn print_report(report: AuditReport, json: bool, pending: bool) {
    if json {
        println!("{}", format_json(&AuditResponse::from(report)));
    } else {
        print!("{}", format_text(&report, pending));
    }
}

fn print_help() {
    println!("Compliance Archive Audit (idfa) - Reconcile a document archive against its taxonomy");
    println!();
    println!("USAGE:");
    println!("    idfa audit <ROOT> [OPTIONS]");
    println!("    idfa period <MONTH> [--base <DIR>] [OPTIONS]");
    println!("    idfa view <EXPORT> [--json] [--pending]");
    println!();
    println!("COMMANDS:");
    println!("    audit     Audit the archive rooted at ROOT");
    println!("    period    Audit the monthly archive MONTH under the base directory");
    println!("    view      Render a previously exported report");
    println!();
    println!("GLOBAL OPTIONS:");
    println!("    -h, --help                 Show this help message");
    println!("    -v, --version              Show version information");
    println!();
    println!("AUDIT OPTIONS:");
    println!("    --taxonomy <FILE>         Use a JSON taxonomy instead of the built-in one");
    println!("    --export <FILE>           Also write the report as a Parquet table");
    println!("    --json                    Emit the JSON response envelope");
    println!("    --pending                 List folders without evidence");
    println!("    --quiet                   Suppress non-error output");
    println!();
    println!("PERIOD OPTIONS:");
    println!("    --base <DIR>              Directory holding monthly folders");
    println!("                              (default: ${})", idfa::period::BASE_PATH_ENV);
    println!();
    println!("EXAMPLES:");
    println!("    idfa audit \"/data/IDF/10. Outubro\" --pending");
    println!("    idfa period Outubro --base /data/IDF --json");
    println!("    idfa period 11 --export nov.parquet && idfa view nov.parquet");
}

fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("IDFA_GIT_HASH");
    const GIT_DATE: &str = env!("IDFA_GIT_DATE");
    const BUILD_TARGET: &str = env!("IDFA_BUILD_TARGET");

    println!("idfa {VERSION}");
    println!("Commit: {GIT_HASH} ({GIT_DATE})");
    println!("Target: {BUILD_TARGET}");
}
