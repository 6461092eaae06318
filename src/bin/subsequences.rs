use std::env;
use std::process::ExitCode;

use num_traits::ToPrimitive;
use subsequences::dynamic::{
    all_lcs, all_lis, all_unique_lcs, all_unique_lis, length_of_lis, number_of_lcs,
    number_of_lis, NUMBER_OF_LCS_CAP,
};
use subsequences::input::{parse_limit, parse_mask, parse_sequence};
use subsequences::{Error, Result};

const USAGE: &str = "usage: subsequences lcs <A> <B> [limit]
       subsequences lis <A> <mask> [limit]

Lists are written like [1, 2, 3]; masks hold 0s and 1s, one per element of A.";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &[String]) -> Result<String> {
    match args {
        [command, first, second, rest @ ..] if rest.len() <= 1 => {
            let limit = rest.first().map(|text| parse_limit(text)).transpose()?;
            match command.as_str() {
                "lcs" => lcs_report(&parse_sequence(first)?, &parse_sequence(second)?, limit),
                "lis" => lis_report(&parse_sequence(first)?, second, limit),
                other => Err(Error::invalid_argument(format!("unknown command {other:?}"))),
            }
        }
        _ => Err(Error::invalid_argument("expected a command and two lists")),
    }
}

fn lcs_report(a: &[i64], b: &[i64], limit: Option<usize>) -> Result<String> {
    let count = number_of_lcs(a, b);
    let limit = limit.unwrap_or(count);

    Ok(format!(
        "Number of LCS occurrences: {count}\n\
         All LCS sequences (up to {limit}): {:?}\n\
         All unique LCS sequences (up to {limit}): {:?}\n",
        all_lcs(a, b, limit),
        all_unique_lcs(a, b, limit)
    ))
}

fn lis_report(a: &[i64], mask_text: &str, limit: Option<usize>) -> Result<String> {
    let mask = parse_mask(mask_text)?;
    let length = length_of_lis(a, &mask)?;
    let count = number_of_lis(a, &mask)?;
    let limit = limit.unwrap_or_else(|| {
        count
            .to_usize()
            .unwrap_or(usize::MAX)
            .min(NUMBER_OF_LCS_CAP)
    });

    Ok(format!(
        "Length of LIS: {length}\n\
         Number of LIS occurrences: {count}\n\
         All LIS sequences (up to {limit}): {:?}\n\
         All unique LIS sequences (up to {limit}): {:?}\n",
        all_lis(a, &mask, limit)?,
        all_unique_lis(a, &mask, limit)?
    ))
}
