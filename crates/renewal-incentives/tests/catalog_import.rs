use renewal_incentives::incentives::{
    CatalogHandle, DataLoadError, IncentiveCatalog, LoadStatus, LookupOutcome, SelectorField,
};

fn sample_catalog() -> IncentiveCatalog {
    let data = include_bytes!("../incentivos_renovacion.csv");
    IncentiveCatalog::from_reader(&data[..]).expect("sample export normalizes")
}

#[test]
fn sample_export_normalizes_into_flat_records() {
    let catalog = sample_catalog();

    assert_eq!(catalog.records().len(), 46);
    assert!(catalog
        .records()
        .iter()
        .all(|record| record.amount.is_finite() && record.amount > 0.0));
    assert!(catalog
        .records()
        .iter()
        .all(|record| record.category != "Categoria"));
}

#[test]
fn selector_domains_cover_the_sample_export() {
    let catalog = sample_catalog();

    assert_eq!(
        catalog.distinct_values(SelectorField::Category),
        ["Automovil", "Camion ligero", "Camioneta", "Taxi"]
    );
    assert_eq!(
        catalog.distinct_values(SelectorField::CurrentFuel),
        ["Diesel", "Gasolina"]
    );
    assert_eq!(
        catalog.distinct_values(SelectorField::ReplacementFuel),
        ["Electrico", "Gas Natural", "Hibrido"]
    );
    assert_eq!(
        catalog.distinct_values(SelectorField::YearBand),
        ["Before-2000", "2000-2002", "2003-2006", "2007-2017"]
    );
}

#[test]
fn merged_groups_resolve_through_forward_fill() {
    let catalog = sample_catalog();

    // Continuation row two groups below its populated category cell.
    let matched = catalog
        .query("Automovil", "Gasolina", "Gas Natural", "2000-2002")
        .found()
        .cloned()
        .expect("incentive found");
    assert_eq!(matched.amount, 2200.0);

    // Row following the repeated header artifact inherits "Taxi".
    let matched = catalog
        .query("Taxi", "Diesel", "Electrico", "2000-2002")
        .found()
        .cloned()
        .expect("incentive found");
    assert_eq!(matched.amount, 6000.0);
}

#[test]
fn blank_cells_stay_unoffered_instead_of_zero() {
    let catalog = sample_catalog();

    assert_eq!(
        catalog.query("Automovil", "Gasolina", "Gas Natural", "2003-2006"),
        LookupOutcome::NotFound
    );
    assert_eq!(
        catalog.query("Automovil", "Diesel", "Hibrido", "2007-2017"),
        LookupOutcome::NotFound
    );
}

#[test]
fn from_path_propagates_io_errors() {
    let error = IncentiveCatalog::from_path("./does-not-exist.csv")
        .expect_err("expected io error");

    match error {
        DataLoadError::Io(_) => {}
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn reload_swaps_in_the_rebuilt_table_as_a_unit() {
    let path = std::env::temp_dir().join(format!(
        "renewal_incentives_reload_{}.csv",
        std::process::id()
    ));

    std::fs::write(
        &path,
        "Categoria,Combustible actual,Combustible de reemplazo,<2000,2000-2002,2003-2006,2007-2017\n\
         SUV,Gasolina,Electrico,100,200,300,400\n",
    )
    .expect("fixture written");

    let handle = CatalogHandle::load(&path);
    assert_eq!(handle.status(), LoadStatus::Ready { records: 4 });

    std::fs::write(
        &path,
        "Categoria,Combustible actual,Combustible de reemplazo,<2000,2000-2002,2003-2006,2007-2017\n\
         SUV,Gasolina,Electrico,100,200,300,400\n\
         ,,Hibrido,150,250,350,450\n",
    )
    .expect("fixture rewritten");

    // The already-built view is immutable until reload is requested.
    assert_eq!(handle.status(), LoadStatus::Ready { records: 4 });
    assert_eq!(handle.reload(), LoadStatus::Ready { records: 8 });

    let matched = handle
        .query("SUV", "Gasolina", "Hibrido", "2007-2017")
        .found()
        .cloned()
        .expect("record from reloaded table");
    assert_eq!(matched.amount, 450.0);

    std::fs::remove_file(&path).expect("fixture removed");
}

#[test]
fn failed_load_recovers_once_the_source_appears() {
    let path = std::env::temp_dir().join(format!(
        "renewal_incentives_recovery_{}.csv",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let handle = CatalogHandle::load(&path);
    assert!(matches!(handle.status(), LoadStatus::Failed { .. }));
    assert!(handle.distinct_values(SelectorField::Category).is_empty());

    std::fs::write(
        &path,
        "Categoria,Combustible actual,Combustible de reemplazo,<2000,2000-2002,2003-2006,2007-2017\n\
         Taxi,Diesel,Electrico,600,650,700,750\n",
    )
    .expect("fixture written");

    assert_eq!(handle.reload(), LoadStatus::Ready { records: 4 });
    assert_eq!(
        handle.distinct_values(SelectorField::Category),
        ["Taxi"]
    );

    std::fs::remove_file(&path).expect("fixture removed");
}
