//! fos-audit - accessibility audit of an HTML file
//!
//! Exit status is 0 when no violations were found, 1 when some were, and
//! 2 on any error.

use anyhow::{Context, bail};
use clap::Parser;
use fos_a11y::{AuditConfig, NullReporter, RuleSet, ScanReport, Scanner, Violation};
use fos_dom::{DomTree, NodeId};
use fos_html::HtmlParser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Audit an HTML file for accessibility problems
#[derive(Parser, Debug)]
#[command(name = "fos-audit")]
#[command(version, about, long_about = None)]
struct Cli {
    /// HTML file to audit
    #[arg(required_unless_present = "list_rules")]
    file: Option<PathBuf>,

    /// Run only these rules, in this order
    #[arg(long, value_delimiter = ',', value_name = "ID,ID")]
    rules: Vec<String>,

    /// Leave these built-in rules out
    #[arg(long, value_delimiter = ',', value_name = "ID,ID")]
    disable: Vec<String>,

    /// Scan the subtree of the element with this id instead of the whole document
    #[arg(long, value_name = "ID")]
    root: Option<String>,

    /// Smallest acceptable touch target (CSS px)
    #[arg(long, value_name = "PX")]
    min_target_size: Option<f64>,

    /// Use WCAG AAA contrast thresholds
    #[arg(long)]
    aaa: bool,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// List the available rules and exit
    #[arg(long)]
    list_rules: bool,
}

impl Cli {
    fn config(&self) -> AuditConfig {
        let mut config = if self.aaa {
            AuditConfig::wcag_aaa()
        } else {
            AuditConfig::default()
        };
        if let Some(px) = self.min_target_size {
            config = config.with_min_target_size(px);
        }
        for id in &self.disable {
            config = config.with_disabled_rule(id.trim());
        }
        config
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether the document is clean
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let scanner = Scanner::with_config(&cli.config());

    if cli.list_rules {
        for id in scanner.registry().ids() {
            println!("{id}");
        }
        return Ok(true);
    }

    let Some(path) = cli.file.as_ref() else {
        bail!("no input file given");
    };
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let url = format!("file://{}", path.display());
    let document = HtmlParser::new()
        .parse_with_url(&html, &url)
        .with_context(|| format!("parsing {}", path.display()))?;
    let tree = document.tree();

    let root = match &cli.root {
        Some(id) => document
            .get_element_by_id(id)
            .with_context(|| format!("no element with id `{id}`"))?,
        None => document.document_element(),
    };

    let rules: RuleSet = if cli.rules.is_empty() {
        scanner.registry().rules().clone()
    } else {
        let ids: Vec<&str> = cli.rules.iter().map(|id| id.trim()).collect();
        scanner.registry().select(&ids)?
    };
    tracing::debug!("Running rules {:?} on {}", rules.ids(), url);

    let violations = if cli.json {
        let mut reporter = NullReporter;
        let scan = scanner.scan_with(tree, root, &rules, &mut reporter);
        let violations = smol::block_on(scan)?;
        let ids = rules.ids().into_iter().map(String::from).collect();
        let report = ScanReport::new(url, ids, violations);
        println!("{}", report.to_json()?);
        report.violations
    } else {
        let mut print = |violation: &Violation| {
            let element = describe(tree, violation.element);
            println!("{}: {}\n    {}", element, violation.text, violation.url);
        };
        let violations = smol::block_on(scanner.scan_with(tree, root, &rules, &mut print))?;
        println!("{} violation(s) in {}", violations.len(), path.display());
        violations
    };

    Ok(violations.is_empty())
}

/// Short tag-and-id description of an element
fn describe(tree: &DomTree, node: NodeId) -> String {
    match tree.element(node) {
        Some(element) => match element.id.as_deref() {
            Some(id) => format!("<{}#{}>", element.local_name, id),
            None => format!("<{}> {}", element.local_name, node),
        },
        None => node.to_string(),
    }
}
