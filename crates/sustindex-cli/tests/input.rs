use std::path::PathBuf;

use clap::Parser;

use sustindex_cli::cli::{Cli, Command};
use sustindex_cli::input::{TakeInput, parse_input};
use sustindex_core::ids::{AttemptId, SurveyId};
use sustindex_core::stats::HistoryFilter;

#[test]
fn navigation_keys() {
    assert_eq!(parse_input("n"), Ok(TakeInput::Next));
    assert_eq!(parse_input(" p "), Ok(TakeInput::Previous));
    assert_eq!(parse_input("s"), Ok(TakeInput::Submit));
    assert_eq!(parse_input("q"), Ok(TakeInput::Quit));
    assert_eq!(parse_input("?"), Ok(TakeInput::Help));
}

#[test]
fn numbers_toggle_choices() {
    assert_eq!(parse_input("3"), Ok(TakeInput::Toggle(3)));
    assert!(parse_input("0").is_err());
    assert!(parse_input("-1").is_err());
}

#[test]
fn attach_remove_and_notes() {
    assert_eq!(
        parse_input("a ./docs/energy audit.pdf"),
        Ok(TakeInput::Attach(PathBuf::from("./docs/energy audit.pdf")))
    );
    assert!(parse_input("a").is_err());
    assert_eq!(parse_input("r 2"), Ok(TakeInput::Remove(2)));
    assert!(parse_input("r x").is_err());
    assert_eq!(
        parse_input("note We report  quarterly"),
        Ok(TakeInput::Note("We report  quarterly".into()))
    );
    assert_eq!(parse_input("note"), Ok(TakeInput::Note(String::new())));
}

#[test]
fn garbage_is_rejected() {
    assert!(parse_input("").is_err());
    assert!(parse_input("jump").is_err());
    assert!(parse_input("n now").is_err());
}

#[test]
fn subcommands_parse_typed_ids() {
    let cli = Cli::try_parse_from(["sustindex", "take", "4"]).unwrap();
    assert!(matches!(cli.command, Command::Take { survey_id: SurveyId(4) }));

    let cli =
        Cli::try_parse_from(["sustindex", "results", "12", "--docx", "out.docx"]).unwrap();
    match cli.command {
        Command::Results { attempt_id, docx } => {
            assert_eq!(attempt_id, AttemptId(12));
            assert_eq!(docx, Some(PathBuf::from("out.docx")));
        }
        other => panic!("unexpected command {other:?}"),
    }

    let cli = Cli::try_parse_from(["sustindex", "history", "--filter", "in-progress"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::History { filter: HistoryFilter::InProgress }
    ));

    assert!(Cli::try_parse_from(["sustindex", "take", "abc"]).is_err());
    assert!(Cli::try_parse_from(["sustindex", "whoami"]).is_ok());
}
