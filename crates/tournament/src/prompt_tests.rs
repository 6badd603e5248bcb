use super::*;
use std::io::Cursor;

fn prompter(script: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
    Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
}

#[test]
fn test_full_session_answers() {
    let mut p = prompter("MyocainePowder\nNashBot\n20\n");
    assert_eq!(p.bot_name(FIRST_BOT_PROMPT).unwrap(), "MyocainePowder");
    assert_eq!(p.bot_name(SECOND_BOT_PROMPT).unwrap(), "NashBot");
    assert_eq!(p.tournament_count(50).unwrap(), 20);

    let shown = String::from_utf8(p.into_output()).unwrap();
    assert_eq!(
        shown,
        format!("{}{}{}", FIRST_BOT_PROMPT, SECOND_BOT_PROMPT, TOURNAMENTS_PROMPT)
    );
}

#[test]
fn test_empty_bot_name_asks_again() {
    let mut p = prompter("\n   \nWolfBot\n");
    assert_eq!(p.bot_name(FIRST_BOT_PROMPT).unwrap(), "WolfBot");
    let shown = String::from_utf8(p.into_output()).unwrap();
    assert_eq!(shown.matches(FIRST_BOT_PROMPT).count(), 3);
}

#[test]
fn test_empty_count_uses_default() {
    let mut p = prompter("\n");
    assert_eq!(p.tournament_count(50).unwrap(), 50);
}

#[test]
fn test_non_numeric_count_is_rejected() {
    let mut p = prompter("fifty\n");
    let err = p.tournament_count(50).unwrap_err();
    assert!(matches!(err, TournamentError::InvalidInput(_)));
}

#[test]
fn test_closed_input_is_an_error() {
    let mut p = prompter("");
    assert!(p.bot_name(FIRST_BOT_PROMPT).is_err());
}

#[test]
fn test_bot_name_with_whitespace_asks_again() {
    let mut p = prompter("My Bot\nMyBot\n");
    assert_eq!(p.bot_name(FIRST_BOT_PROMPT).unwrap(), "MyBot");
    let shown = String::from_utf8(p.into_output()).unwrap();
    assert_eq!(shown.matches(FIRST_BOT_PROMPT).count(), 2);
    assert!(shown.contains("must not contain whitespace"));
}
