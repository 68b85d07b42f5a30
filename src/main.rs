use clap::Parser;

mod cli;

use cli::OutputFormat;

fn main() -> cidrlist::Result<()> {
    let args = cli::Args::parse();
    cli::log::init(&args.verbose);

    let prefix_list = cli::build_loader(&args).load_files(&args.files)?;
    let prefix_list = cli::filter_family(&args, prefix_list);

    match cli::parse_addresses(&args) {
        Some(addresses) => {
            let search_results = prefix_list.search(&addresses)?;
            cli::log::search_results(&addresses, &search_results);

            match args.output {
                OutputFormat::Table => cli::output::lookup_table(&search_results),
                OutputFormat::Cidr => cli::output::search_results_in_cidr_format(&search_results),
                OutputFormat::Json => cli::output::search_results_in_json_format(&search_results)?,
            }

            if let Some(csv_file) = &args.csv_file {
                cli::csv::save_search_results(&search_results, csv_file)?;
            }
        }
        None => {
            match args.output {
                OutputFormat::Table => cli::output::prefix_table(&prefix_list),
                OutputFormat::Cidr => cli::output::prefixes_in_cidr_format(&prefix_list),
                OutputFormat::Json => cli::output::prefixes_in_json_format(&prefix_list)?,
            }

            if let Some(csv_file) = &args.csv_file {
                cli::csv::save(&prefix_list, csv_file)?;
            }
        }
    }

    if args.summary {
        cli::output::summary(&prefix_list);
    }

    Ok(())
}
