// src/bin/poker_dev_cli.rs
//
// Dev-CLI: один стол, несколько раздач по простой политике check/call.
//
//   poker_dev_cli [--seed N] [--hands N] [--players N] [--side-pots]

use clap::Parser;
use log::LevelFilter;

use poker_table::api::{build_table_snapshot, execute_command, execute_query, Command,
    CreateTableCommand, JoinTableCommand, PlayerActionCommand, Query, QueryResponse};
use poker_table::domain::chips::Chips;
use poker_table::domain::table::{PotMode, TableOptions, MAX_SEATS};
use poker_table::engine::{HandStatus, RandomSource, TableManager};
use poker_table::infra::{logging, DeterministicRng, SystemRng};

const TABLE_ID: &str = "dev-table";
const MAX_STEPS: u32 = 500;

#[derive(Parser, Debug)]
struct CliArgs {
    /// Seed детерминированной колоды; без него колода случайная.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 3)]
    hands: u32,
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=MAX_SEATS as i64))]
    players: u8,
    /// Делить банк сайд-потами вместо общего.
    #[arg(long)]
    side_pots: bool,
}

fn main() {
    logging::init(LevelFilter::Info);

    let args = CliArgs::parse();

    match args.seed {
        Some(seed) => {
            println!("[CLI] детерминированная колода, seed={seed}");
            run(TableManager::with_rng(move |id| DeterministicRng::for_table(seed, id)), &args);
        }
        None => run(TableManager::<SystemRng>::new(), &args),
    }
}

fn run<R: RandomSource + Send + 'static>(manager: TableManager<R>, args: &CliArgs) {
    let options = TableOptions {
        pot_mode: if args.side_pots {
            PotMode::SidePots
        } else {
            PotMode::Shared
        },
        max_players: usize::from(args.players),
        ..TableOptions::default()
    };

    let setup = std::iter::once(Command::CreateTable(CreateTableCommand {
        table_id: TABLE_ID.to_string(),
        creator: "player-0".to_string(),
        options,
        password: None,
    }))
    .chain((0..args.players).map(|i| {
        Command::JoinTable(JoinTableCommand {
            table_id: TABLE_ID.to_string(),
            player_id: format!("player-{i}"),
            password: None,
            // Разные стеки, чтобы были олл-ины на разные суммы.
            buy_in: Chips(500 + 250 * i as u64),
        })
    }));

    for command in setup {
        if let Err(e) = execute_command(&manager, command) {
            eprintln!("[CLI] ошибка подготовки стола: {e}");
            return;
        }
    }

    for hand in 1..=args.hands {
        println!();
        println!("================ HAND {hand} =================");

        let mut status = match manager.start_hand(TABLE_ID) {
            Ok(update) => update.status,
            Err(e) => {
                println!("[CLI] раздачу не начать: {e}");
                break;
            }
        };
        if status == HandStatus::Waiting {
            println!("[CLI] за столом не хватает игроков, стоп.");
            break;
        }

        let mut steps = 0;
        while status == HandStatus::Ongoing && steps < MAX_STEPS {
            steps += 1;
            let table = match manager.table(TABLE_ID) {
                Ok(t) => t,
                Err(e) => {
                    println!("[CLI] {e}");
                    return;
                }
            };
            let Some(actor) = table.current_player_id().cloned() else {
                break;
            };
            let to_call = table
                .seat(&actor)
                .map(|p| table.highest_bet().saturating_sub(p.current_bet))
                .unwrap_or(Chips::ZERO);

            let command = PlayerActionCommand {
                table_id: TABLE_ID.to_string(),
                player_id: actor.clone(),
                action: if to_call.is_zero() { "check" } else { "call" }.to_string(),
                amount: None,
            };
            let action = match command.parse() {
                Ok(a) => a,
                Err(e) => {
                    println!("[CLI] {e}");
                    return;
                }
            };

            match manager.apply_action(TABLE_ID, action) {
                Ok(update) => status = update.status,
                Err(e) => {
                    println!("[CLI] действие {actor} отклонено: {e}");
                    return;
                }
            }
        }

        if let HandStatus::Finished(summary) = &status {
            print_json("summary", summary);
        }
        if let Ok(table) = manager.table(TABLE_ID) {
            print_json("table", &build_table_snapshot(&table));
        }
    }

    if let Ok(QueryResponse::Tables(tables)) = execute_query(&manager, Query::ListTables) {
        println!("[CLI] столов в реестре: {}", tables.len());
    }
}

fn print_json<T: serde::Serialize>(label: &str, value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{label}: {json}"),
        Err(e) => eprintln!("[CLI] не удалось сериализовать {label}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_parse_and_players_are_range_checked() {
        let args = CliArgs::try_parse_from(["poker_dev_cli"]).unwrap();
        assert_eq!((args.seed, args.hands, args.players, args.side_pots), (None, 3, 3, false));

        let args = CliArgs::try_parse_from([
            "poker_dev_cli", "--seed", "7", "--hands", "10", "--players", "22", "--side-pots",
        ])
        .unwrap();
        assert_eq!((args.seed, args.hands, args.players, args.side_pots), (Some(7), 10, 22, true));

        for bad in ["1", "23", "many"] {
            assert!(CliArgs::try_parse_from(["poker_dev_cli", "--players", bad]).is_err());
        }
    }
}
