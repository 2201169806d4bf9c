use anyhow::Result;
use housesim::{aggregate, answer, margins_to_dataframe, Answer, UNSUPPORTED_MESSAGE};

use super::{emit, load_table};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::AskArgs) -> Result<()> {
    let question = args.question.join(" ");
    let table = load_table(&args.source)?;
    let races = aggregate(&table).value.races;

    match answer(&races, &question) {
        Answer::SmallestMargins { races, .. } => {
            emit(&races, || margins_to_dataframe(&races), &args.out)
        }
        Answer::Unsupported => {
            println!("{UNSUPPORTED_MESSAGE}");
            Ok(())
        }
    }
}
