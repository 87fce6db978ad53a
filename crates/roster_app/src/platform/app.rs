use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use roster_client::{ReqwestDirectory, UserListController};
use roster_core::{Msg, NotificationChannel};
use roster_logging::{roster_info, roster_warn};
use tokio::runtime::Runtime;

use super::commands::{self, Command, CommandError, HELP};
use super::config::{self, Args};
use super::logging;
use super::ui;

pub fn run_app() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = config::load(&args.config)?;
    config.apply_args(&args);

    logging::initialize(config.log_destination, config.level(), &config.log_file);
    roster_info!(
        "starting roster against {} (strict_form={})",
        config.base_url,
        config.strict_form
    );

    let directory = ReqwestDirectory::new(config.directory_settings()?)
        .context("failed to build directory client")?;
    let notifications = Arc::new(NotificationChannel::new());
    ui::toast::attach(&notifications);

    let mut controller = UserListController::new(
        Arc::new(directory),
        notifications.clone(),
        config.form_validation(),
    );
    let runtime = Runtime::new().context("failed to start tokio runtime")?;

    runtime.block_on(controller.activate());
    print_view(&mut controller);
    println!("Type `help` for commands.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("roster> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read stdin")?;
        match commands::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => execute(&runtime, &mut controller, command),
            Err(CommandError::Empty) => {}
            Err(err) => println!("{err}"),
        }
    }

    roster_info!("roster exiting");
    Ok(())
}

fn execute(runtime: &Runtime, controller: &mut UserListController, command: Command) {
    match command {
        Command::List => {
            println!("{}", ui::render::render(&controller.view()));
            controller.consume_dirty();
            return;
        }
        Command::Name(name) => runtime.block_on(controller.dispatch(Msg::NameChanged(name))),
        Command::Email(email) => runtime.block_on(controller.dispatch(Msg::EmailChanged(email))),
        Command::Submit => runtime.block_on(controller.submit()),
        Command::Edit(id) => match controller.state().find_user(id).cloned() {
            Some(user) => runtime.block_on(controller.edit_user(user)),
            None => {
                roster_warn!("edit of unlisted user {}", id);
                controller
                    .notifications()
                    .error(format!("No user with id {id} in the list"));
            }
        },
        Command::Cancel => runtime.block_on(controller.cancel_edit()),
        Command::Delete(id) => runtime.block_on(controller.delete_user(id)),
        Command::Get(id) => {
            if let Some(user) = runtime.block_on(controller.fetch_user(id)) {
                println!(
                    "#{} {} <{}>",
                    user.id.map(|id| id.to_string()).unwrap_or_default(),
                    user.name,
                    user.email
                );
            }
        }
        Command::Reload => runtime.block_on(controller.activate()),
        Command::Dismiss => runtime.block_on(controller.dismiss_notification()),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    print_view(controller);
}

/// Re-renders only when the last command changed something visible.
fn print_view(controller: &mut UserListController) {
    if controller.consume_dirty() {
        println!("{}", ui::render::render(&controller.view()));
    }
}
