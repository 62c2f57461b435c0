use super::*;

#[test]
fn plain_line_is_a_keystroke() {
    assert_eq!(parse_line("piz"), Input::Keystroke("piz".to_string()));
}

#[test]
fn empty_line_clears_the_field() {
    assert_eq!(parse_line(""), Input::Keystroke(String::new()));
}

#[test]
fn keystroke_keeps_surrounding_whitespace() {
    assert_eq!(parse_line(" pho "), Input::Keystroke(" pho ".to_string()));
}

#[test]
fn pick_takes_a_one_based_index() {
    assert_eq!(parse_line(":pick 2"), Input::Pick(2));
}

#[test]
fn pick_rejects_zero_and_garbage() {
    assert!(matches!(parse_line(":pick 0"), Input::Invalid(_)));
    assert!(matches!(parse_line(":pick two"), Input::Invalid(_)));
    assert!(matches!(parse_line(":pick"), Input::Invalid(_)));
}

#[test]
fn location_keeps_inner_spaces() {
    assert_eq!(
        parse_line(":location  New York "),
        Input::Location("New York".to_string())
    );
}

#[test]
fn bare_location_clears_it() {
    assert_eq!(parse_line(":location"), Input::Location(String::new()));
}

#[test]
fn submit_and_quit() {
    assert_eq!(parse_line(":submit"), Input::Submit);
    assert_eq!(parse_line(":quit"), Input::Quit);
    assert_eq!(parse_line(":q"), Input::Quit);
}

#[test]
fn unknown_command_is_invalid() {
    assert_eq!(
        parse_line(":frobnicate"),
        Input::Invalid("unknown command `:frobnicate`".to_string())
    );
}

#[test]
fn blank_location_displays_as_none() {
    assert_eq!(display_or_none(""), "(none)");
    assert_eq!(display_or_none("Austin"), "Austin");
}
