use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use covenant::model::{AgreementDetails, ExportFormat};
use std::path::PathBuf;

/// "0.3.2" for releases, "0.3.2@abc1234 2024-01-15" for dev builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("COVENANT_GIT_HASH");
    const COMMIT_DATE: &str = env!("COVENANT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("COVENANT_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "covenant",
    bin_name = "covenant",
    version = get_version(),
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Fill agreement templates and export them as TXT, DOCX or PDF", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long = "dir", global = true, value_name = "PATH", help_heading = "Options")]
    pub dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Documents,
    Templates,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Documents => "Document Commands:",
            CommandGroup::Templates => "Template Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "preview" | "generate" | "history" => Some(CommandGroup::Documents),
            "templates" | "show" => Some(CommandGroup::Templates),
            "config" | "init" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Documents,
            CommandGroup::Templates,
            CommandGroup::Misc,
        ]
    }
}

pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("covenant {version}\n"));
    output.push_str("Fill agreement templates and export them as TXT, DOCX or PDF\n");
    output.push('\n');
    output.push_str("Usage: covenant [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();
    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", sc.get_name(), about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("  -C, --dir <PATH>  Project directory (defaults to the current directory)\n");
    output.push_str("  -v, --verbose     Verbose output\n");
    output.push_str("  -h, --help        Print help\n");
    output.push_str("  -V, --version     Print version\n");
    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

pub fn subcommand_name(command: &Commands) -> &'static str {
    match command {
        Commands::Documents(c) => match c {
            DocumentCommands::Preview { .. } => "preview",
            DocumentCommands::Generate { .. } => "generate",
            DocumentCommands::History { .. } => "history",
        },
        Commands::Templates(c) => match c {
            TemplateCommands::Templates => "templates",
            TemplateCommands::Show { .. } => "show",
        },
        Commands::Misc(c) => match c {
            MiscCommands::Config { .. } => "config",
            MiscCommands::Init => "init",
            MiscCommands::Help { .. } => "help",
        },
    }
}

/// Prints help for a command by name, falling back to the grouped help.
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();
    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name || subcmd.get_all_aliases().any(|a| a == name) {
            print!("{}", subcmd.render_help());
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Documents(DocumentCommands),

    #[command(flatten)]
    Templates(TemplateCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum DocumentCommands {
    /// Print the filled-in agreement
    #[command(alias = "p", display_order = 1)]
    Preview {
        /// Template name (Service, Partnership, NDA)
        template: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Fill a template and export it
    #[command(alias = "g", display_order = 2)]
    Generate {
        /// Template name (Service, Partnership, NDA)
        template: String,

        #[command(flatten)]
        fields: FieldArgs,

        #[command(flatten)]
        formats: FormatArgs,
    },

    /// Show recently generated files
    #[command(display_order = 3)]
    History {
        /// Number of entries to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Forget all entries
        #[arg(long, conflicts_with = "limit")]
        clear: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// List available templates
    #[command(alias = "ls", display_order = 10)]
    Templates,

    /// Print a template's raw text
    #[command(display_order = 11)]
    Show {
        /// Template name (Service, Partnership, NDA)
        template: String,

        /// List the placeholders instead of the text
        #[arg(long)]
        fields: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 20)]
    Config {
        /// templates-dir, output-dir, formats or history-limit
        key: Option<String>,
        /// New value
        value: Option<String>,
    },

    /// Create .covenant/ and copy the built-in templates into the project
    #[command(display_order = 21)]
    Init,

    /// Print help for a command
    #[command(display_order = 22)]
    Help {
        command: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    /// First party
    #[arg(long, help_heading = "Fields")]
    pub party1: Option<String>,

    /// Second party
    #[arg(long, help_heading = "Fields")]
    pub party2: Option<String>,

    /// Start date
    #[arg(long, value_name = "YYYY-MM-DD", help_heading = "Fields")]
    pub start_date: Option<NaiveDate>,

    /// End date
    #[arg(long, value_name = "YYYY-MM-DD", help_heading = "Fields")]
    pub end_date: Option<NaiveDate>,

    /// Governing law (e.g. California)
    #[arg(long, help_heading = "Fields")]
    pub governing_law: Option<String>,

    /// Scope of services
    #[arg(long, help_heading = "Fields")]
    pub scope: Option<String>,

    /// Compensation or consideration
    #[arg(long, help_heading = "Fields")]
    pub compensation: Option<String>,

    /// Additional clauses
    #[arg(long, help_heading = "Fields")]
    pub special_terms: Option<String>,

    /// Any other placeholder, as key=value (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val, help_heading = "Fields")]
    pub extra: Vec<(String, String)>,
}

impl FieldArgs {
    pub fn into_details(self) -> AgreementDetails {
        AgreementDetails {
            party1: self.party1.unwrap_or_default(),
            party2: self.party2.unwrap_or_default(),
            start_date: self.start_date,
            end_date: self.end_date,
            governing_law: self.governing_law.unwrap_or_default(),
            scope: self.scope.unwrap_or_default(),
            compensation: self.compensation.unwrap_or_default(),
            special_terms: self.special_terms.unwrap_or_default(),
            extra: self.extra.into_iter().collect(),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct FormatArgs {
    /// Export plain text
    #[arg(long, help_heading = "Formats")]
    pub txt: bool,

    /// Export a Word document
    #[arg(long, help_heading = "Formats")]
    pub docx: bool,

    /// Export a PDF
    #[arg(long, help_heading = "Formats")]
    pub pdf: bool,
}

impl FormatArgs {
    /// Requested formats in export order; empty means "use the configured defaults".
    pub fn selected(&self) -> Vec<ExportFormat> {
        [
            (self.txt, ExportFormat::Txt),
            (self.docx, ExportFormat::Docx),
            (self.pdf, ExportFormat::Pdf),
        ]
        .into_iter()
        .filter(|(on, _)| *on)
        .map(|(_, f)| f)
        .collect()
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in `{}`", s));
    }
    Ok((key.to_string(), value.to_string()))
}
