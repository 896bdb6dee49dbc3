use super::print::{
    print_artifacts, print_config, print_history, print_messages, print_placeholders,
    print_template, print_templates,
};
use super::setup::{
    print_grouped_help, print_help_for_command, subcommand_name, Cli, Commands,
    DocumentCommands, FieldArgs, FormatArgs, MiscCommands, TemplateCommands,
};
use clap::Parser;
use covenant::api::{CmdMessage, ConfigAction};
use covenant::error::Result;
use covenant::init::{initialize, CovenantContext};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // `covenant generate -h` fails parsing on the missing template; still show help.
            let args: Vec<String> = std::env::args().skip(1).collect();
            if args.iter().any(|a| a == "-h" || a == "--help") {
                match args.iter().find(|a| !a.starts_with('-')) {
                    Some(name) => print_help_for_command(name),
                    None => print_grouped_help(),
                }
                return Ok(());
            }
            e.exit()
        }
    };
    init_logging(cli.verbose);

    if cli.help {
        match &cli.command {
            Some(cmd) => print_help_for_command(subcommand_name(cmd)),
            None => print_grouped_help(),
        }
        return Ok(());
    }

    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        return handle_help(command.as_deref());
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Documents(cmd)) => match cmd {
            DocumentCommands::Preview { template, fields } => {
                handle_preview(&ctx, &template, fields)
            }
            DocumentCommands::Generate {
                template,
                fields,
                formats,
            } => handle_generate(&mut ctx, &template, fields, formats),
            DocumentCommands::History { limit, clear } => {
                if clear {
                    handle_clear_history(&mut ctx)
                } else {
                    handle_history(&ctx, limit)
                }
            }
        },
        Some(Commands::Templates(cmd)) => match cmd {
            TemplateCommands::Templates => handle_templates(&ctx),
            TemplateCommands::Show { template, fields } => handle_show(&ctx, &template, fields),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Config { key, value } => handle_config(&ctx, key, value),
            MiscCommands::Init => handle_init(&ctx),
            MiscCommands::Help { command } => handle_help(command.as_deref()),
        },
        None => handle_templates(&ctx),
    }
}

/// `RUST_LOG` wins unless `--verbose` is given.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("covenant=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("covenant=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn init_context(cli: &Cli) -> Result<CovenantContext> {
    let project = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    initialize(&project)
}

fn handle_templates(ctx: &CovenantContext) -> Result<()> {
    let result = ctx.api.templates()?;
    print_templates(&result.templates);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &CovenantContext, name: &str, fields_only: bool) -> Result<()> {
    let result = ctx.api.show_template(name)?;
    if fields_only {
        print_placeholders(&result.placeholders);
    } else if let Some(template) = &result.template {
        print_template(template);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_preview(ctx: &CovenantContext, name: &str, fields: FieldArgs) -> Result<()> {
    let result = ctx.api.preview(name, &fields.into_details())?;
    if let Some(rendered) = &result.rendered {
        print!("{}", rendered);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_generate(
    ctx: &mut CovenantContext,
    name: &str,
    fields: FieldArgs,
    formats: FormatArgs,
) -> Result<()> {
    let details = fields.into_details();
    let result = ctx
        .api
        .generate(name, &details, &formats.selected(), &mut ctx.history)?;

    print_messages(&result.messages);
    print_artifacts(&result.artifacts, &ctx.api.paths().project);

    if !result.artifacts.is_empty() {
        if let Err(e) = ctx.save_history() {
            tracing::warn!(error = %e, "history not saved");
            print_messages(&[CmdMessage::warning(format!(
                "Could not save history: {}",
                e
            ))]);
        }
    }

    if result.artifacts.is_empty() && result.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn handle_history(ctx: &CovenantContext, limit: Option<usize>) -> Result<()> {
    let result = ctx.api.history(&ctx.history, limit)?;
    print_history(&result.history, &ctx.api.paths().project);
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear_history(ctx: &mut CovenantContext) -> Result<()> {
    let result = ctx.api.clear_history(&mut ctx.history)?;
    ctx.save_history()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &CovenantContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(&config.list_all());
        }
    }
    print_messages(&result.messages);

    if result.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn handle_init(ctx: &CovenantContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_help(command: Option<&str>) -> Result<()> {
    match command {
        Some(cmd) => print_help_for_command(cmd),
        None => print_grouped_help(),
    }
    Ok(())
}
