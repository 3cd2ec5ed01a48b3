//! `fleetctl` - CLI for fleetroster
//!
//! This binary hosts the roster pages on the terminal: one-shot commands for
//! each admin action and an interactive shell.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;

use fleetroster::cli::shell::Shell;
use fleetroster::cli::{
    AddCommand, Cli, Command, ConfigCommand, DeleteCommand, FilterArgs, ListCommand,
    OutputFormat, RenderCommand, UpdateDriverCommand,
};
use fleetroster::render::{page, text};
use fleetroster::{
    init_logging, AdminController, Category, Config, FleetRepository, Interaction, Outcome,
    PageLoad, ScriptedInteraction, Session, Skip, Storage, TerminalInteraction, VehicleForm,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Login => handle_login(&config),
        Command::Logout => handle_logout(&config),
        Command::Status(status_cmd) => handle_status(&config, status_cmd.json),
        Command::Add(add_cmd) => handle_add(&config, add_cmd),
        Command::List(list_cmd) => handle_list(&config, &list_cmd),
        Command::UpdateDriver(update_cmd) => handle_update_driver(&config, &update_cmd),
        Command::Toggle(toggle_cmd) => handle_toggle(&config, &toggle_cmd.id),
        Command::Delete(delete_cmd) => handle_delete(&config, &delete_cmd),
        Command::Render(render_cmd) => handle_render(&config, &render_cmd),
        Command::Shell => handle_shell(&config),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open_session(config: &Config) -> Result<Session<Storage>> {
    let store = Storage::open(config.session_database_path())
        .context("failed to open session storage")?;
    Ok(Session::with_key(store, config.session.key.clone()))
}

fn open_fleet(config: &Config) -> Result<FleetRepository<Storage>> {
    let store = Storage::open(config.database_path()).context("failed to open fleet storage")?;
    Ok(FleetRepository::with_key(store, config.storage.fleet_key.clone()))
}

/// Load the admin page. Prints the redirect and returns `None` when the
/// session is not logged in.
fn load_admin<I: Interaction>(
    config: &Config,
    interaction: I,
) -> Result<Option<AdminController<Storage, I>>> {
    let session = open_session(config)?;
    match AdminController::load(&session, open_fleet(config)?, interaction) {
        PageLoad::Ready(controller) => Ok(Some(controller)),
        PageLoad::Redirect(page) => {
            println!("Not logged in: redirecting to {page}");
            Ok(None)
        }
    }
}

fn apply_filters<I: Interaction>(
    controller: &mut AdminController<Storage, I>,
    args: &FilterArgs,
) {
    let filters = args.filters();
    controller.set_category_filter(filters.category.value());
    controller.set_availability_filter(filters.availability.value());
}

fn report(outcome: Option<Outcome>, done: &str) {
    match outcome {
        Some(Outcome::Applied { id, .. }) => println!("{done} {id}"),
        Some(Outcome::Skipped(Skip::Cancelled | Skip::Declined)) => println!("Cancelled."),
        Some(Outcome::Skipped(Skip::Invalid | Skip::NotFound)) | None => {}
    }
}

fn print_notifications(interaction: &ScriptedInteraction) {
    for message in interaction.notifications() {
        println!("{message}");
    }
}

fn handle_login(config: &Config) -> Result<()> {
    open_session(config)?.login()?;
    println!("Logged in. Admin commands are now available.");
    Ok(())
}

fn handle_logout(config: &Config) -> Result<()> {
    open_session(config)?.logout()?;
    println!("Logged out.");
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> Result<()> {
    let logged_in = open_session(config)?.is_logged_in();
    let vehicles = open_fleet(config)?.read_all();
    let available = vehicles.iter().filter(|v| v.is_available).count();

    if json {
        let status = serde_json::json!({
            "logged_in": logged_in,
            "vehicles": vehicles.len(),
            "available": available,
            "database_path": config.database_path(),
            "session_database_path": config.session_database_path(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("fleetctl status");
        println!("---------------");
        println!("Logged in:     {}", if logged_in { "yes" } else { "no" });
        println!("Vehicles:      {} ({available} available)", vehicles.len());
        println!("Database:      {}", config.database_path().display());
        println!("Session:       {}", config.session_database_path().display());
    }
    Ok(())
}

fn handle_add(config: &Config, cmd: AddCommand) -> Result<()> {
    let Some(mut controller) = load_admin(config, TerminalInteraction::stdio())? else {
        return Ok(());
    };

    let mut form = VehicleForm::new(
        cmd.reg_no,
        Category::from(cmd.category).as_str(),
        cmd.driver,
        cmd.available,
    );
    report(Some(controller.add(&mut form)?), "Added");
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> Result<()> {
    let Some(mut controller) = load_admin(config, ScriptedInteraction::new())? else {
        return Ok(());
    };
    apply_filters(&mut controller, &cmd.filters);

    match cmd.format {
        OutputFormat::Plain => print!("{}", text::card_grid(&controller.visible_records())),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&controller.visible_records())?
            );
        }
        OutputFormat::Html => println!("{}", controller.render_all().to_html()),
    }
    Ok(())
}

fn handle_update_driver(config: &Config, cmd: &UpdateDriverCommand) -> Result<()> {
    let outcome = if let Some(name) = &cmd.name {
        let mut answers = ScriptedInteraction::new().with_text(Some(name.as_str()));
        let outcome = update_driver(config, &cmd.id, &mut answers)?;
        print_notifications(&answers);
        outcome
    } else {
        update_driver(config, &cmd.id, TerminalInteraction::stdio())?
    };
    report(outcome, "Updated driver of");
    Ok(())
}

fn update_driver<I: Interaction>(
    config: &Config,
    id: &str,
    interaction: I,
) -> Result<Option<Outcome>> {
    let Some(mut controller) = load_admin(config, interaction)? else {
        return Ok(None);
    };
    Ok(Some(controller.update_driver(id)?))
}

fn handle_toggle(config: &Config, id: &str) -> Result<()> {
    let Some(mut controller) = load_admin(config, ScriptedInteraction::new())? else {
        return Ok(());
    };
    let outcome = controller.toggle_availability(id)?;
    if outcome.is_applied() {
        if let Some(record) = controller.records().iter().find(|r| r.id == id) {
            println!("{} is now {}", record.reg_no, record.availability_label());
        }
    }
    Ok(())
}

fn handle_delete(config: &Config, cmd: &DeleteCommand) -> Result<()> {
    let outcome = if cmd.yes {
        let mut answers = ScriptedInteraction::new().with_confirm(true);
        delete(config, &cmd.id, &mut answers)?
    } else {
        delete(config, &cmd.id, TerminalInteraction::stdio())?
    };
    report(outcome, "Deleted");
    Ok(())
}

fn delete<I: Interaction>(config: &Config, id: &str, interaction: I) -> Result<Option<Outcome>> {
    let Some(mut controller) = load_admin(config, interaction)? else {
        return Ok(None);
    };
    Ok(Some(controller.delete(id)?))
}

fn handle_render(config: &Config, cmd: &RenderCommand) -> Result<()> {
    let Some(mut controller) = load_admin(config, ScriptedInteraction::new())? else {
        return Ok(());
    };
    apply_filters(&mut controller, &cmd.filters);

    let grid = controller.render_all();
    match &cmd.output {
        Some(path) => {
            page::write_admin_document(path, grid, controller.filters())
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", page::admin_document(grid, controller.filters())),
    }
    Ok(())
}

fn handle_shell(config: &Config) -> Result<()> {
    let store = Storage::open(config.database_path()).context("failed to open fleet storage")?;
    let mut shell = Shell::with_session_key(
        store,
        config.storage.fleet_key.clone(),
        config.session.key.clone(),
        TerminalInteraction::stdio(),
    );
    shell.run()?;
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Fleet key:          {}", config.storage.fleet_key);
                println!();
                println!("[Session]");
                println!(
                    "  Database path:      {}",
                    config.session_database_path().display()
                );
                println!("  Key:                {}", config.session.key);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
