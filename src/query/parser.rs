//! Command Parser
//!
//! Parses one line of interactive input into a [`Command`].
//!
//! # Supported Syntax
//!
//! ```text
//! QUERY <serverIp> <cpuId> <YYYY-MM-DD> <HH:MM> <YYYY-MM-DD> <HH:MM>
//! EXIT
//! ```
//!
//! Verbs are case-insensitive and arguments are separated by whitespace.
//!
//! # Examples
//!
//! ```text
//! QUERY 192.168.1.10 1 2014-10-31 00:00 2014-10-31 00:05
//! query 192.168.1.10 0 2014-10-31 23:55 2014-11-01 00:10
//! exit
//! ```

use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res},
    sequence::{preceded, separated_pair, tuple},
    IResult,
};

use crate::query::ast::{Command, UsageQuery};
use crate::query::error::{QueryError, QueryResult};
use chrono::{NaiveDate, NaiveTime};

/// Arguments following the QUERY verb
const QUERY_ARGS: usize = 6;

/// Parse a command line
pub fn parse_command(line: &str) -> QueryResult<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let verb = match tokens.first() {
        Some(verb) => *verb,
        None => return Ok(Command::Empty),
    };

    if verb.eq_ignore_ascii_case("QUERY") {
        parse_query_args(&tokens[1..]).map(Command::Query)
    } else if verb.eq_ignore_ascii_case("EXIT") {
        Ok(Command::Exit)
    } else {
        Err(QueryError::InvalidCommand(verb.to_string()))
    }
}

/// Parse the six QUERY arguments
pub fn parse_query_args(args: &[&str]) -> QueryResult<UsageQuery> {
    if args.len() != QUERY_ARGS {
        return Err(QueryError::Usage);
    }

    let server_ip = args[0];
    let cpu_id = args[1]
        .parse::<u16>()
        .map_err(|_| QueryError::InvalidCpuId(args[1].to_string()))?;

    let start_date = parse_date(args[2])?;
    let start_time = parse_time(args[3])?;
    let end_date = parse_date(args[4])?;
    let end_time = parse_time(args[5])?;

    Ok(UsageQuery::new(
        server_ip,
        cpu_id,
        start_date.and_time(start_time),
        end_date.and_time(end_time),
    ))
}

/// Parse a `YYYY-MM-DD` date, rejecting impossible calendar values
pub fn parse_date(token: &str) -> QueryResult<NaiveDate> {
    match all_consuming(date_parts)(token) {
        Ok((_, (year, month, day))) => NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| QueryError::InvalidDate(token.to_string())),
        Err(_) => Err(QueryError::InvalidDate(token.to_string())),
    }
}

/// Parse an `HH:MM` time of day
pub fn parse_time(token: &str) -> QueryResult<NaiveTime> {
    match all_consuming(time_parts)(token) {
        Ok((_, (hour, minute))) => NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| QueryError::InvalidTime(token.to_string())),
        Err(_) => Err(QueryError::InvalidTime(token.to_string())),
    }
}

fn number_i32(input: &str) -> IResult<&str, i32> {
    map_res(digit1, |s: &str| s.parse::<i32>())(input)
}

fn number_u32(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>())(input)
}

/// year-month-day
fn date_parts(input: &str) -> IResult<&str, (i32, u32, u32)> {
    tuple((
        number_i32,
        preceded(char('-'), number_u32),
        preceded(char('-'), number_u32),
    ))(input)
}

/// hour:minute
fn time_parts(input: &str) -> IResult<&str, (u32, u32)> {
    separated_pair(number_u32, char(':'), number_u32)(input)
}
