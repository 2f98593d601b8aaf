use nom::branch::alt;
use nom::bytes::complete::{is_not, tag_no_case};
use nom::character::complete::{char, multispace1};
use nom::combinator::all_consuming;
use nom::sequence::delimited;
use nom::{IResult, InputTakeAtPosition};

/// One dashboard trigger, parsed from a REPL line. Field values stay raw
/// strings here; the session controller applies the normalizer's rules.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// SHOW
    Show,
    /// ADD date category amount
    Add { date: String, category: String, amount: String },
    /// IMPORT file_path
    Import(String),
    /// EDIT
    Edit,
    /// SALARY amount
    Salary(String),
    Help,
    Quit,
}

pub(crate) fn parse(line: &str) -> Result<Command, String> {
    // all_consuming rejects trailing garbage after a matched command
    let result = all_consuming(alt((add, import, salary, show, edit, help, quit)))(line.trim());
    match result {
        Ok((_, command)) => Ok(command),
        Err(_) => Err(format!("Unrecognized command: '{}'. Try 'help'.", line.trim())),
    }
}

/// Parse `ADD 2025-01-15 Alimentação 500.00`.
/// Category may be quoted to allow spaces: `ADD 2025-01-15 "Cartão de crédito" 120`.
fn add(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_no_case("ADD")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, date) = non_space(input)?;
    let (input, _) = multispace1(input)?;
    let (input, category) = quoted_or_bare(input)?;
    let (input, _) = multispace1(input)?;
    let (input, amount) = non_space(input)?;

    Ok((
        input,
        Command::Add {
            date: date.to_string(),
            category: category.to_string(),
            amount: amount.to_string(),
        },
    ))
}

/// Parse `IMPORT ./path/to/file.csv` pattern.
fn import(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_no_case("IMPORT")(input)?;
    let (file_path, _) = multispace1(input)?;
    let quotation_marks: &[_] = &['\'', '"'];
    Ok(("", Command::Import(file_path.trim().trim_matches(quotation_marks).to_string())))
}

fn salary(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_no_case("SALARY")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, amount) = non_space(input)?;
    Ok((input, Command::Salary(amount.to_string())))
}

fn show(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_no_case("SHOW")(input)?;
    Ok((input, Command::Show))
}

fn edit(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_no_case("EDIT")(input)?;
    Ok((input, Command::Edit))
}

fn help(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_no_case("HELP")(input)?;
    Ok((input, Command::Help))
}

fn quit(input: &str) -> IResult<&str, Command> {
    let (input, _) = alt((tag_no_case("QUIT"), tag_no_case("EXIT")))(input)?;
    Ok((input, Command::Quit))
}

fn non_space(input: &str) -> IResult<&str, &str> {
    input.split_at_position_complete(char::is_whitespace)
}

fn quoted_or_bare(input: &str) -> IResult<&str, &str> {
    alt((delimited(char('"'), is_not("\""), char('"')), non_space))(input)
}
