use clap::Args;
use renewal_incentives::config::AppConfig;
use renewal_incentives::error::AppError;
use renewal_incentives::incentives::{IncentiveCatalog, LookupOutcome, SelectorField};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Vehicle category, as listed by the selectors command
    #[arg(long)]
    pub(crate) category: String,
    /// Fuel type of the current vehicle
    #[arg(long)]
    pub(crate) current_fuel: String,
    /// Fuel type of the replacement vehicle
    #[arg(long)]
    pub(crate) replacement_fuel: String,
    /// Manufacture year band (Before-2000, 2000-2002, 2003-2006, 2007-2017)
    #[arg(long)]
    pub(crate) year_band: String,
    /// Override the configured incentive table path
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SelectorsArgs {
    /// Override the configured incentive table path
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let QuoteArgs {
        category,
        current_fuel,
        replacement_fuel,
        year_band,
        data,
    } = args;

    let catalog = load_catalog(data)?;
    let outcome = catalog.query(&category, &current_fuel, &replacement_fuel, &year_band);

    match outcome {
        LookupOutcome::Found(matched) => {
            println!("Incentive available: ${:.2}", matched.amount);
            println!(
                "- Current vehicle: {} ({})",
                matched.category, matched.current_fuel
            );
            println!("- Replacement vehicle: {}", matched.replacement_fuel);
            println!("- Manufacture year band: {}", matched.year_band);
        }
        LookupOutcome::NotFound => {
            println!("No incentive found for this combination.");
            println!("Check that:");
            println!("1. the current and replacement fuel combination is valid");
            println!("2. the manufacture year band matches your vehicle");
        }
    }

    Ok(())
}

pub(crate) fn run_selectors(args: SelectorsArgs) -> Result<(), AppError> {
    let catalog = load_catalog(args.data)?;

    print_domain("Categories", &catalog, SelectorField::Category);
    print_domain("Current fuels", &catalog, SelectorField::CurrentFuel);
    print_domain("Replacement fuels", &catalog, SelectorField::ReplacementFuel);
    print_domain("Year bands", &catalog, SelectorField::YearBand);

    Ok(())
}

fn load_catalog(data: Option<PathBuf>) -> Result<IncentiveCatalog, AppError> {
    let path = match data {
        Some(path) => path,
        None => AppConfig::load()?.catalog.data_path,
    };
    IncentiveCatalog::from_path(path).map_err(AppError::from)
}

fn print_domain(heading: &str, catalog: &IncentiveCatalog, field: SelectorField) {
    println!("{heading}");
    for value in catalog.distinct_values(field) {
        println!("- {value}");
    }
}
