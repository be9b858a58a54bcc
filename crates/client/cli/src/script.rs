//! The scripted session loop.

use anyhow::{Context, Result};
use game_content::{ContentFactory, TemplateCatalog};
use game_core::{Action, EntityId};
use runtime::{BfsPathfinder, RuntimeConfig, Session};
use tracing::{info, warn};

use crate::autopilot::{self, Decision};
use crate::config::CliConfig;
use crate::presentation::{print_messages, status_line};

pub fn run(config: &CliConfig) -> Result<()> {
    let mut runtime_config = config.runtime.clone();
    let catalog = load_catalog(config, &mut runtime_config)?;
    let mut session = Session::with_file_store(runtime_config, catalog)
        .context("failed to open the save store")?;

    if config.resume && session.has_save() {
        session.load_game().context("failed to load the saved game")?;
        session.finish_restore()?;
        println!("Resumed saved game.");
    } else {
        session.new_game()?;
        println!("New game.");
    }

    let step = session.config().base_turn_interval;
    let mut mark = session.messages().posted();
    let mut played = 0;

    while played < config.turns {
        let report = session.tick(step)?;
        mark = flush_messages(&session, mark);

        if !session.state().player_alive() {
            println!("{}", status_line(session.state()));
            println!("The adventure is over.");
            session.delete_save()?;
            return Ok(());
        }
        if !report.player_turn {
            continue;
        }

        match autopilot::decide(session.state(), &BfsPathfinder) {
            Decision::Descend => {
                session.change_floor(1)?;
                println!("Descended to floor {}.", session.state().floor);
            }
            Decision::Act(action) => {
                if let Err(refused) = session.player_action(&action) {
                    if !refused.is_recoverable() {
                        return Err(refused.into());
                    }
                    warn!(code = refused.code(), error = %refused, ?action, "autopilot action refused");
                    session.player_action(&Action::wait(EntityId::PLAYER))?;
                }
            }
        }
        played += 1;
        mark = flush_messages(&session, mark);

        if played % config.save_every == 0 {
            session.save_game()?;
            println!("{}", status_line(session.state()));
        }
    }

    session.save_game()?;
    println!("{}", status_line(session.state()));
    info!(turns = played, floor = session.state().floor, "run finished");
    Ok(())
}

fn load_catalog(
    config: &CliConfig,
    runtime_config: &mut RuntimeConfig,
) -> Result<TemplateCatalog> {
    match &config.data_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            runtime_config.game = factory
                .load_config()?
                .with_base_turn_interval(config.runtime.game.base_turn_interval);
            factory.load_catalog(&runtime_config.game)
        }
        None => ContentFactory::builtin(&runtime_config.game),
    }
}

/// Prints messages posted after `mark` and returns the new mark.
fn flush_messages(session: &Session, mark: u64) -> u64 {
    let log = session.messages();
    print_messages(log.since(mark));
    log.posted()
}
