mod config;

use anyhow::Context;
use attrkit_domain::wizard::{
    self, ManuallyAddedValues, PackageListItem, WizardButtons, WizardPackageLists, WizardSelection,
};
use attrkit_domain::{MergeButtonDisplayState, MergeState, Transition, WizardNavigator, project};
use attrkit_purl::{PackageDescriptor, purl_for_package_info};
use attrkit_types::{AttributionData, ButtonConfig, PackageInfo};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::{ConfigMerger, MergedConfig, OutputFormat};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "attrkit",
    version,
    about = "Package URL codec and attribution-editor state derivation."
)]
struct Cli {
    /// Config file (default: ./attrkit.toml when present).
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    /// Output format; overrides [output].format.
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse, normalize or generate package URLs.
    #[command(subcommand)]
    Purl(PurlCommand),
    /// Show which merge buttons the attribution column would display.
    MergeButtons(MergeButtonsArgs),
    /// Replay navigation actions through the attribution wizard.
    Wizard(WizardArgs),
}

#[derive(Debug, Subcommand)]
enum PurlCommand {
    /// Split a package URL into its components.
    Parse(PurlArg),
    /// Print the canonical form of a package URL.
    Normalize(PurlArg),
    /// Build a package URL from components.
    Generate(GenerateArgs),
}

#[derive(Debug, Parser)]
struct PurlArg {
    /// Package URL, e.g. pkg:npm/react@16.5.0
    purl: String,
}

#[derive(Debug, Parser)]
struct GenerateArgs {
    /// Package type (default: [purl].default_type).
    #[arg(long = "type")]
    package_type: Option<String>,

    #[arg(long)]
    namespace: Option<String>,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    version: Option<String>,

    /// Qualifier as key=value (repeatable).
    #[arg(long = "qualifier")]
    qualifiers: Vec<String>,

    #[arg(long)]
    subpath: Option<String>,
}

#[derive(Debug, Parser)]
struct MergeButtonsArgs {
    /// Attribution marked for replacement (empty: none).
    #[arg(long, default_value = "")]
    marked: String,

    /// Attribution shown in the column.
    #[arg(long)]
    target: String,

    /// Attribution selected in the list (empty: none).
    #[arg(long, default_value = "")]
    selected: String,

    /// The selected attribution has unsaved edits.
    #[arg(long, default_value_t = false)]
    modified: bool,

    /// The target is a pre-selected attribution.
    #[arg(long, default_value_t = false)]
    pre_selected: bool,

    /// The target is an external (signal) attribution.
    #[arg(long, default_value_t = false)]
    external: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum WizardAction {
    Next,
    Back,
    Jump(String),
}

fn parse_action(s: &str) -> Result<WizardAction, String> {
    match s {
        "next" => Ok(WizardAction::Next),
        "back" => Ok(WizardAction::Back),
        _ => match s.strip_prefix("jump=") {
            Some(id) if !id.is_empty() => Ok(WizardAction::Jump(id.to_string())),
            _ => Err(format!(
                "invalid action '{}': expected next, back or jump=<step id>",
                s
            )),
        },
    }
}

#[derive(Debug, Parser)]
struct WizardArgs {
    /// Navigation action: next, back or jump=<step id> (repeatable, applied in order).
    #[arg(long = "action", value_parser = parse_action)]
    actions: Vec<WizardAction>,

    /// JSON store slices: resourceId, popupAttributionId, manualData, externalData and
    /// resolvedExternalAttributions.
    #[arg(long)]
    input: Option<Utf8PathBuf>,

    /// Package type of the attribution the wizard was opened for.
    #[arg(long = "type")]
    package_type: Option<String>,

    #[arg(long)]
    namespace: Option<String>,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    version: Option<String>,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let file_config = config::load_or_default(Utf8Path::new("."), cli.config.as_deref())
        .context("load attrkit.toml config")?;
    let merged = ConfigMerger::new(file_config).merge(cli.format);
    debug!(
        default_type = %merged.default_type,
        steps = merged.steps.len(),
        "configuration resolved"
    );

    match cli.cmd {
        Command::Purl(PurlCommand::Parse(args)) => cmd_purl_parse(args, &merged),
        Command::Purl(PurlCommand::Normalize(args)) => cmd_purl_normalize(args, &merged),
        Command::Purl(PurlCommand::Generate(args)) => cmd_purl_generate(args, &merged),
        Command::MergeButtons(args) => cmd_merge_buttons(args, &merged),
        Command::Wizard(args) => cmd_wizard(args, &merged),
    }
}

#[derive(Debug, Serialize)]
struct ParseReport {
    #[serde(flatten)]
    descriptor: PackageDescriptor,
    complete: bool,
    canonical: String,
}

fn cmd_purl_parse(args: PurlArg, cfg: &MergedConfig) -> anyhow::Result<()> {
    let descriptor =
        attrkit_purl::parse(&args.purl).with_context(|| format!("parse '{}'", args.purl))?;
    let report = ParseReport {
        complete: descriptor.is_complete(),
        canonical: attrkit_purl::generate(&descriptor),
        descriptor,
    };

    match cfg.format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            let d = &report.descriptor;
            println!("type:       {}", d.package_type);
            println!("namespace:  {}", d.namespace.as_deref().unwrap_or("-"));
            println!("name:       {}", d.name.as_deref().unwrap_or("-"));
            println!("version:    {}", d.version.as_deref().unwrap_or("-"));
            for (key, value) in &d.qualifiers {
                println!("qualifier:  {}={}", key, value);
            }
            println!("subpath:    {}", d.subpath.as_deref().unwrap_or("-"));
            println!("complete:   {}", yes_no(report.complete));
            println!("canonical:  {}", report.canonical);
            Ok(())
        }
    }
}

fn cmd_purl_normalize(args: PurlArg, cfg: &MergedConfig) -> anyhow::Result<()> {
    let canonical =
        attrkit_purl::normalize(&args.purl).with_context(|| format!("parse '{}'", args.purl))?;
    match cfg.format {
        OutputFormat::Json => print_json(&serde_json::json!({ "purl": canonical })),
        OutputFormat::Text => {
            println!("{}", canonical);
            Ok(())
        }
    }
}

fn cmd_purl_generate(args: GenerateArgs, cfg: &MergedConfig) -> anyhow::Result<()> {
    let qualifiers = config::parse_cli_qualifiers(&args.qualifiers)?;
    let descriptor = PackageDescriptor {
        package_type: args
            .package_type
            .unwrap_or_else(|| cfg.default_type.clone()),
        namespace: args.namespace,
        name: args.name,
        version: args.version,
        qualifiers,
        subpath: args.subpath,
    };
    descriptor
        .validate()
        .context("components do not form a valid package url")?;
    let purl = attrkit_purl::generate(&descriptor);

    match cfg.format {
        OutputFormat::Json => print_json(&serde_json::json!({ "purl": purl })),
        OutputFormat::Text => {
            println!("{}", purl);
            Ok(())
        }
    }
}

fn cmd_merge_buttons(args: MergeButtonsArgs, cfg: &MergedConfig) -> anyhow::Result<()> {
    let state = MergeState {
        marked_for_replacement_id: args.marked,
        target_id: args.target,
        selected_id: args.selected,
        was_modified: args.modified,
        target_is_pre_selected: args.pre_selected,
        target_is_external: args.external,
    };
    let display = project(&state);

    match cfg.format {
        OutputFormat::Json => print_json(&display),
        OutputFormat::Text => {
            print_merge_buttons(&display);
            Ok(())
        }
    }
}

fn print_merge_buttons(display: &MergeButtonDisplayState) {
    println!(
        "mark_for_replacement:   {}",
        shown_hidden(display.show_mark_for_replacement)
    );
    println!(
        "unmark_for_replacement: {}",
        shown_hidden(display.show_unmark_for_replacement)
    );
    let replace = if display.show_replace_marked_by && display.disable_replace_marked_by {
        "shown (disabled)"
    } else {
        shown_hidden(display.show_replace_marked_by)
    };
    println!("replace_marked_by:      {}", replace);
}

/// Store slices the wizard reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct WizardInput {
    /// Resource (or folder, ending in `/`) the wizard was opened on.
    resource_id: String,
    /// Manual attribution the wizard was opened for.
    popup_attribution_id: Option<String>,
    manual_data: AttributionData,
    external_data: AttributionData,
    resolved_external_attributions: BTreeSet<String>,
}

impl Default for WizardInput {
    fn default() -> Self {
        Self {
            resource_id: "/".to_string(),
            popup_attribution_id: None,
            manual_data: AttributionData::default(),
            external_data: AttributionData::default(),
            resolved_external_attributions: BTreeSet::new(),
        }
    }
}

impl WizardInput {
    fn popup_attribution(&self) -> anyhow::Result<PackageInfo> {
        match &self.popup_attribution_id {
            None => Ok(PackageInfo::default()),
            Some(id) => self
                .manual_data
                .attributions
                .get(id)
                .cloned()
                .with_context(|| format!("popup attribution '{}' is not a manual attribution", id)),
        }
    }
}

fn load_wizard_input(path: &Utf8Path) -> anyhow::Result<WizardInput> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read wizard input {}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("parse wizard input {}", path))
}

#[derive(Debug, Serialize)]
struct WizardReport {
    step: String,
    transitions: Vec<Transition>,
    breadcrumbs: Vec<wizard::Breadcrumb>,
    selection: WizardSelection,
    lists: WizardPackageLists,
    buttons: WizardButtons,
    purl: String,
}

fn cmd_wizard(args: WizardArgs, cfg: &MergedConfig) -> anyhow::Result<()> {
    let mut navigator =
        WizardNavigator::new(cfg.steps.clone()).context("invalid [wizard] steps")?;
    let input = match &args.input {
        Some(path) => load_wizard_input(path)?,
        None => WizardInput::default(),
    };
    let mut popup_attribution = input.popup_attribution()?;
    if let Some(package_type) = args.package_type {
        popup_attribution.package_type = Some(package_type);
    }

    // Values given as flags count as added in the wizard and selected.
    let mut selection = WizardSelection::from_popup_attribution(&popup_attribution);
    let mut manually_added = ManuallyAddedValues::default();
    if let Some(namespace) = args.namespace {
        manually_added.namespaces.push(namespace.clone());
        selection.namespace = Some(namespace);
    }
    if let Some(name) = args.name {
        manually_added.names.push(name.clone());
        selection.name = Some(name);
    }
    if let Some(version) = args.version {
        manually_added.versions.push(version.clone());
        selection.version = Some(version);
    }

    let counts = wizard::attribution_counts_for_resource_and_children(
        &input.resource_id,
        &input.external_data.resources_to_attributions,
        &input.manual_data.resources_to_attributions,
        &input.resolved_external_attributions,
    );
    let mut attributions = input.external_data.attributions;
    attributions.extend(input.manual_data.attributions);
    let lists = wizard::package_list_items(&counts, &attributions, &manually_added, &selection);
    let selection = selection.reconcile(&lists);

    let mut transitions = Vec::with_capacity(args.actions.len());
    for action in &args.actions {
        let transition = match action {
            WizardAction::Next => navigator.next(selection.is_namespace_and_name_selected()),
            WizardAction::Back => navigator.back(),
            WizardAction::Jump(id) => navigator
                .jump_to(id)
                .with_context(|| format!("jump to step '{}'", id))?,
        };
        transitions.push(transition);
    }

    let purl = if navigator.offers_apply() {
        purl_for_package_info(&wizard::apply_selection(
            &popup_attribution,
            &selection,
            &cfg.default_type,
        ))
    } else {
        wizard::package_step_purl(
            &selection,
            popup_attribution.package_type(),
            &cfg.default_type,
        )
    };

    let report = WizardReport {
        step: navigator.current_id().to_string(),
        transitions,
        breadcrumbs: wizard::breadcrumbs(&navigator),
        buttons: wizard::wizard_buttons(&navigator, &selection),
        selection,
        lists,
        purl,
    };

    match cfg.format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print_wizard(&report, navigator.current().label.as_str());
            Ok(())
        }
    }
}

fn print_wizard(report: &WizardReport, label: &str) {
    println!("step:        {} ({})", report.step, label);

    let crumbs: Vec<String> = report
        .breadcrumbs
        .iter()
        .map(|b| {
            if b.selected {
                format!("[{}]", b.label)
            } else {
                b.label.clone()
            }
        })
        .collect();
    println!("breadcrumbs: {}", crumbs.join(" > "));

    if !report.transitions.is_empty() {
        let names: Vec<&str> = report
            .transitions
            .iter()
            .copied()
            .map(transition_name)
            .collect();
        println!("transitions: {}", names.join(", "));
    }

    println!("namespaces:  {}", format_items(&report.lists.namespaces));
    println!("names:       {}", format_items(&report.lists.names));
    println!("versions:    {}", format_items(&report.lists.versions));

    let mut buttons: Vec<String> = Vec::new();
    if let Some(back) = &report.buttons.back {
        buttons.push(format_button(back));
    }
    buttons.push(format_button(&report.buttons.primary));
    buttons.push(format_button(&report.buttons.cancel));
    println!("buttons:     {}", buttons.join(" | "));

    println!(
        "purl:        {}",
        if report.purl.is_empty() {
            "-"
        } else {
            report.purl.as_str()
        }
    );
}

fn format_items(items: &[PackageListItem]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items
        .iter()
        .map(|item| {
            if item.manually_added {
                format!("{} (added)", item.text)
            } else {
                format!("{} ({})", item.text, item.count)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_button(button: &ButtonConfig) -> String {
    let label = button.button_text.label();
    match (&button.tooltip_text, button.disabled) {
        (Some(tip), true) => format!("{} (disabled: {})", label, tip),
        (None, true) => format!("{} (disabled)", label),
        _ => label.to_string(),
    }
}

fn transition_name(transition: Transition) -> &'static str {
    match transition {
        Transition::Moved => "moved",
        Transition::NoOp => "no_op",
        Transition::Blocked => "blocked",
    }
}

fn shown_hidden(shown: bool) -> &'static str {
    if shown { "shown" } else { "hidden" }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{}", out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_action_accepts_known_actions() {
        assert_eq!(parse_action("next"), Ok(WizardAction::Next));
        assert_eq!(parse_action("back"), Ok(WizardAction::Back));
        assert_eq!(
            parse_action("jump=packageVersion"),
            Ok(WizardAction::Jump("packageVersion".to_string()))
        );
    }

    #[test]
    fn parse_action_rejects_unknown_and_empty_jump() {
        assert!(parse_action("forward").is_err());
        assert!(parse_action("jump=").is_err());
    }

    #[test]
    fn disabled_button_shows_tooltip() {
        let button = ButtonConfig {
            disabled: true,
            tooltip_text: Some("pick one".to_string()),
            ..ButtonConfig::plain(attrkit_types::ButtonText::Next)
        };
        assert_eq!(format_button(&button), "Next (disabled: pick one)");
    }
}
