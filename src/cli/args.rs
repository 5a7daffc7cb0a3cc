//! CLI argument parsing

#[derive(Debug, Clone)]
pub struct CliArgs {
    pub command: Command,
}

#[derive(Debug, Clone)]
pub enum Command {
    Audit(AuditArgs),
    Period(PeriodArgs),
    View(ViewArgs),
}

/// Options shared by every command that runs an audit
#[derive(Debug, Clone, Default)]
pub struct ReportArgs {
    pub taxonomy: Option<String>,
    pub export: Option<String>,
    pub json: bool,
    pub pending: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone)]
pub struct AuditArgs {
    pub path: String,
    pub report: ReportArgs,
}

#[derive(Debug, Clone)]
pub struct PeriodArgs {
    pub selector: String,
    pub base: Option<String>,
    pub report: ReportArgs,
}

#[derive(Debug, Clone)]
pub struct ViewArgs {
    pub from_export: String,
    pub json: bool,
    pub pending: bool,
}

/// Parse command line arguments
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    if args.len() < 2 {
        return Err("No command specified".to_string());
    }

    let command = match args[1].as_str() {
        "audit" => Command::Audit(parse_audit_args(&args[2..])?),
        "period" => Command::Period(parse_period_args(&args[2..])?),
        "view" => Command::View(parse_view_args(&args[2..])?),
        _ => return Err(format!("Unknown command: {}", args[1])),
    };

    Ok(CliArgs { command })
}

fn take_value<'a>(args: &'a [String], i: &mut usize, what: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} requires {what}", args[*i - 1]))
}

/// Consume a shared report option at `args[*i]`; `Ok(false)` if it is not one.
fn parse_report_flag(
    args: &[String],
    i: &mut usize,
    report: &mut ReportArgs,
) -> Result<bool, String> {
    match args[*i].as_str() {
        "--taxonomy" => report.taxonomy = Some(take_value(args, i, "a file path")?.to_string()),
        "--export" => report.export = Some(take_value(args, i, "a file path")?.to_string()),
        "--json" => report.json = true,
        "--pending" => report.pending = true,
        "--quiet" => report.quiet = true,
        _ => return Ok(false),
    }
    Ok(true)
}

fn parse_audit_args(args: &[String]) -> Result<AuditArgs, String> {
    let mut path = String::new();
    let mut report = ReportArgs::default();
    let mut i = 0;

    while i < args.len() {
        if !parse_report_flag(args, &mut i, &mut report)? {
            match args[i].as_str() {
                arg if !arg.starts_with("--") => {
                    if path.is_empty() {
                        path = arg.to_string();
                    } else {
                        return Err(format!("Unexpected argument: {arg}"));
                    }
                }
                _ => return Err(format!("Unknown option: {}", args[i])),
            }
        }
        i += 1;
    }

    if path.is_empty() {
        return Err("Missing required argument: ROOT".to_string());
    }

    Ok(AuditArgs { path, report })
}

fn parse_period_args(args: &[String]) -> Result<PeriodArgs, String> {
    let mut selector = String::new();
    let mut base = None;
    let mut report = ReportArgs::default();
    let mut i = 0;

    while i < args.len() {
        if !parse_report_flag(args, &mut i, &mut report)? {
            match args[i].as_str() {
                "--base" => base = Some(take_value(args, &mut i, "a directory")?.to_string()),
                arg if !arg.starts_with("--") => {
                    if selector.is_empty() {
                        selector = arg.to_string();
                    } else {
                        return Err(format!("Unexpected argument: {arg}"));
                    }
                }
                _ => return Err(format!("Unknown option: {}", args[i])),
            }
        }
        i += 1;
    }

    if selector.is_empty() {
        return Err("Missing required argument: MONTH".to_string());
    }

    Ok(PeriodArgs {
        selector,
        base,
        report,
    })
}

fn parse_view_args(args: &[String]) -> Result<ViewArgs, String> {
    let mut from_export = String::new();
    let mut json = false;
    let mut pending = false;

    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            "--pending" => pending = true,
            other if !other.starts_with("--") => {
                if from_export.is_empty() {
                    from_export = other.to_string();
                } else {
                    return Err(format!("Unexpected argument: {other}"));
                }
            }
            other => return Err(format!("Unknown option: {other}")),
        }
    }

    if from_export.is_empty() {
        return Err("Missing required argument: EXPORT_FILE".to_string());
    }

    Ok(ViewArgs {
        from_export,
        json,
        pending,
    })
}
