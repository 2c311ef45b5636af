//! Command execution for the nomen CLI.

use std::path::Path;

use anyhow::Context;
use owo_colors::OwoColorize;
use tracing::debug;

use nomen_rs::core::config::NomenConfig;
use nomen_rs::oracle::TypeRegistry;
use nomen_rs::{NamingEngine, NamingReport, NamingSubjects, RuleViolation, TypeDescriptor};

use super::args::{CandidatesArgs, CheckArgs, LintArgs, ModelArgs, OutputFormat, ValidateConfigArgs};

/// Print the candidate base names for a type expression
pub async fn candidates_command(args: CandidatesArgs) -> anyhow::Result<()> {
    let engine = build_engine(&args.model).await?;
    let descriptor = TypeDescriptor::parse(&args.type_expression)?;

    let candidates = engine.candidates(&descriptor);
    if candidates.is_empty() {
        println!(
            "{} {}",
            "No naming constraint for".dimmed(),
            descriptor.to_string().cyan()
        );
        return Ok(());
    }

    println!("{} {}", "Candidate base names for".bright_blue().bold(), descriptor.to_string().cyan());
    for candidate in &candidates {
        println!("  {}", candidate.green());
    }

    let interface_base_names = engine.interface_base_names(&descriptor);
    if !interface_base_names.is_empty() {
        println!();
        println!("{}", "Interface base names (bare use discouraged)".bright_blue().bold());
        for (base_name, interface) in &interface_base_names {
            println!("  {} {}", base_name.yellow(), format!("({interface})").dimmed());
        }
    }

    Ok(())
}

/// Check one identifier with the type suffix rule; exits with status 1 on violations
pub async fn check_command(args: CheckArgs) -> anyhow::Result<()> {
    let engine = build_engine(&args.model).await?;
    let descriptor = TypeDescriptor::parse(&args.type_expression)?;
    let name = args.name.trim_start_matches('$');

    let violations = engine.type_suffix_rule().check(name, &descriptor, None);
    if violations.is_empty() {
        println!("{} ${} matches {}", "✅".green(), name, descriptor.to_string().cyan());
        return Ok(());
    }

    for violation in &violations {
        print_violation(violation);
    }
    std::process::exit(1);
}

/// Check every subject in a subjects file; exits with status 1 on violations
pub async fn lint_command(args: LintArgs) -> anyhow::Result<()> {
    let engine = build_engine(&args.model).await?;
    let subjects = NamingSubjects::from_file(&args.subjects)
        .with_context(|| format!("Failed to load subjects from {}", args.subjects.display()))?;
    debug!("Loaded {} subjects", subjects.subjects.len());

    let report = engine.check_all(&subjects.subjects);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report),
    }

    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}

/// Print default configuration in YAML format
pub async fn print_default_config() -> anyhow::Result<()> {
    println!("{}", "# Default nomen configuration".dimmed());
    println!("{}", "# Save this to a file and customize as needed".dimmed());
    println!("{}", "# Usage: nomen lint subjects.yml --config your-config.yml".dimmed());
    println!();

    let config = NomenConfig::default();
    let yaml_output = serde_yaml::to_string(&config)?;
    println!("{}", yaml_output);

    Ok(())
}

/// Validate a configuration file; exits with status 1 when invalid
pub async fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    println!(
        "{} {}",
        "🔍 Validating configuration:".bright_blue().bold(),
        args.config.display().to_string().cyan()
    );
    println!();

    let config = match load_configuration(Some(&args.config)).await {
        Ok(config) => {
            println!("{}", "✅ Configuration file is valid!".bright_green().bold());
            println!();
            config
        }
        Err(e) => {
            eprintln!("{} {:#}", "❌ Configuration validation failed:".red(), e);
            println!();
            println!("{}", "🔧 Common issues:".bright_blue().bold());
            println!("   • Check YAML syntax (indentation, colons, quotes)");
            println!("   • Deny-list entries must be non-empty and contain no whitespace");
            println!();
            println!("{}", "💡 Tip: Use 'nomen print-default-config' to see valid format".dimmed());
            std::process::exit(1);
        }
    };

    let naming = &config.naming;
    println!("{}", "📊 Configuration Summary".bright_blue().bold());
    println!("   Denied type names:       {}", naming.deny_type_names.len());
    println!("   Denied candidate names:  {}", naming.deny_candidate_names.len());
    println!("   Interface bare-name check: {}", on_off(naming.enable_interface_bare_name_check));

    if args.detailed {
        println!();
        println!("{}", "🔧 Detailed Settings".bright_blue().bold());
        println!("   Type suffix rule:     {}", on_off(naming.rules.type_suffix_mismatch));
        println!("   Iterable plural rule: {}", on_off(naming.rules.iterable_plural));
        println!("   Foreach value rule:   {}", on_off(naming.rules.foreach_value));
        for type_name in &naming.deny_type_names {
            println!("   deny type:      {}", type_name.cyan());
        }
        for candidate_name in &naming.deny_candidate_names {
            println!("   deny candidate: {}", candidate_name.cyan());
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults
pub async fn load_configuration(config_path: Option<&Path>) -> anyhow::Result<NomenConfig> {
    let config: NomenConfig = match config_path {
        Some(path) => {
            let content = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            NomenConfig::parse_for_path(&content, path)?
        }
        None => NomenConfig::default(),
    };

    config.validate()?;
    Ok(config)
}

/// Load the type model, falling back to PHP builtins only
pub async fn load_type_registry(types_path: Option<&Path>) -> anyhow::Result<TypeRegistry> {
    match types_path {
        Some(path) => {
            let registry = TypeRegistry::from_file(path)
                .with_context(|| format!("Failed to load type model from {}", path.display()))?;
            debug!("Loaded {} type declarations", registry.len());
            Ok(registry)
        }
        None => Ok(TypeRegistry::with_php_builtins()),
    }
}

async fn build_engine(model: &ModelArgs) -> anyhow::Result<NamingEngine<TypeRegistry>> {
    let config = load_configuration(model.config.as_deref()).await?;
    let registry = load_type_registry(model.types.as_deref()).await?;
    Ok(NamingEngine::new(config.naming, registry)?)
}

fn print_report(report: &NamingReport) {
    for finding in &report.findings {
        print!("{} ", format!("[{}]", finding.subject_index).dimmed());
        print_violation(&finding.violation);
    }

    if report.is_clean() {
        println!(
            "{} {} subjects checked, no naming violations",
            "✅".green(),
            report.subjects_checked
        );
        return;
    }

    println!();
    println!(
        "{} {} violations in {} of {} subjects",
        "❌".red(),
        report.violation_count(),
        report.subjects_with_violations(),
        report.subjects_checked
    );
    for (identifier, count) in report.counts_by_identifier() {
        println!("   {:<32} {}", identifier.as_str(), count);
    }
}

fn print_violation(violation: &RuleViolation) {
    let location = violation
        .line
        .map(|line| format!("line {line}: "))
        .unwrap_or_default();
    println!(
        "{}{} {}",
        location.dimmed(),
        violation.message,
        format!("[{}]", violation.identifier).yellow()
    );
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}
