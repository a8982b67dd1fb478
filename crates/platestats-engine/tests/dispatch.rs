use platestats_engine::{
    Count, Kurtosis, Max, Mean, Min, Percentile, RangeError, StandardDeviation, StatError,
    Statistic, StatisticKind, Sum, Value, Variance, Window,
};
use platestats_model::{
    Plate, PlateType, Well, WellId, WellSet,
    generate::{GeneratorSeed, PlateGenerator},
};

fn id(s: &str) -> WellId {
    s.parse().unwrap()
}

fn well(s: &str, readings: &[f64]) -> Well {
    Well::new(id(s), readings.to_vec())
}

fn plate(label: &str, wells: impl IntoIterator<Item = Well>) -> Plate {
    Plate::new(label, PlateType::Plate96, wells).unwrap()
}

fn set(label: &str, wells: impl IntoIterator<Item = Well>) -> WellSet {
    WellSet::new(label, wells).unwrap()
}

/// The two-well plate used throughout: `A1 = [1, 2, 3]`, `A2 = [4, 5, 6]`.
fn small_plate() -> Plate {
    plate(
        "small",
        [well("A1", &[1.0, 2.0, 3.0]), well("A2", &[4.0, 5.0, 6.0])],
    )
}

fn random_plates(seed: u8, count: usize) -> Vec<Plate> {
    let generator = PlateGenerator::new(PlateType::Plate24, 8, 100.0, 10.0).unwrap();
    generator.generate_many(count, &mut GeneratorSeed::from_bytes([seed; 16]).rng())
}

fn random_window(rng: &mut impl rand::Rng, size: usize) -> Window {
    let length = rng.random_range(1..=size);
    let begin = rng.random_range(0..=size - length);
    Window::new(begin, length).unwrap()
}

fn is_range_error<T>(result: &Result<T, StatError>) -> bool {
    matches!(result, Err(StatError::InvalidRange(_)))
}

#[test]
fn test_end_to_end_scenario() {
    let plate = small_plate();
    let a1 = plate.get(id("A1")).unwrap();

    let counts = Count.plate(&plate).unwrap();
    assert_eq!(
        counts.iter().map(|(k, v)| (k.to_string(), *v)).collect::<Vec<_>>(),
        [("A1".to_owned(), 3), ("A2".to_owned(), 3)]
    );
    assert_eq!(Count.plate_aggregated(&plate), Ok(6));
    assert_eq!(StandardDeviation.well(a1), Ok(1.0));
    assert_eq!(Percentile::new(50).unwrap().well(a1), Ok(2.0));
}

#[test]
fn test_deterministic() {
    let plates = random_plates(1, 3);
    let p90 = Percentile::new(90).unwrap();
    assert_eq!(Mean.plate(&plates[0]), Mean.plate(&plates[0]));
    assert_eq!(p90.plates_aggregated(&plates), p90.plates_aggregated(&plates));
    assert_eq!(
        Variance.set_aggregated(&plates[1].data_set()),
        Variance.set_aggregated(&plates[1].data_set())
    );
}

#[test]
fn test_fan_out_matches_single_well() {
    fn check<S: Statistic>(stat: S, plate: &Plate) {
        let per_plate = stat.plate(plate).unwrap();
        let per_set = stat.set(&plate.data_set()).unwrap();
        assert_eq!(per_plate.len(), plate.len());
        assert_eq!(per_plate, per_set);
        for well in plate.wells() {
            assert_eq!(per_plate.try_get(&well.id()), Ok(&stat.well(well).unwrap()));
        }
    }

    for plate in random_plates(2, 2) {
        check(Count, &plate);
        check(Mean, &plate);
        check(StandardDeviation, &plate);
        check(Kurtosis, &plate);
        check(Percentile::new(37).unwrap(), &plate);
    }
}

#[test]
fn test_aggregation_differs_from_fan_out() {
    let plate = small_plate();

    assert_eq!(
        Count.plate(&plate).unwrap().values().sum::<usize>(),
        Count.plate_aggregated(&plate).unwrap()
    );

    // both wells have a standard deviation of 1, the pooled 1..=6 does not
    let per_well = StandardDeviation.plate(&plate).unwrap();
    assert!(per_well.values().all(|&sd| sd == 1.0));
    let pooled = StandardDeviation.plate_aggregated(&plate).unwrap();
    assert!((pooled - 3.5_f64.sqrt()).abs() < 1e-12);

    assert_eq!(Max.plate_aggregated(&plate), Ok(6.0));
    assert_eq!(Min.plate_aggregated(&plate), Ok(1.0));
    assert_eq!(Percentile::new(50).unwrap().plate_aggregated(&plate), Ok(3.5));
}

#[test]
fn test_window_matches_materialized_well() {
    let mut rng = GeneratorSeed::from_bytes([9; 16]).rng();
    for plate in random_plates(3, 2) {
        for _ in 0..20 {
            let window = random_window(&mut rng, 8);
            let windowed: Vec<Well> = plate
                .wells()
                .map(|w| w.window(window.begin(), window.length()).unwrap())
                .collect();
            let windowed_set = set(plate.label(), windowed.iter().cloned());

            for (original, sliced) in plate.wells().zip(&windowed) {
                assert_eq!(Mean.well_window(original, window), Mean.well(sliced));
                assert_eq!(Count.well_window(original, window), Ok(window.length()));
            }
            assert_eq!(
                Sum.plate_window(&plate, window),
                Sum.set(&windowed_set)
            );
            assert_eq!(
                Mean.plate_aggregated_window(&plate, window),
                Mean.set_aggregated(&windowed_set)
            );
        }
    }
}

#[test]
fn test_windowed_aggregation_slices_before_pooling() {
    let plate = small_plate();
    let window = Window::new(1, 1).unwrap();
    // pooled readings are [2, 5], not the second reading of [1..=6]
    assert_eq!(Count.plate_aggregated_window(&plate, window), Ok(2));
    assert_eq!(Mean.plate_aggregated_window(&plate, window), Ok(3.5));
    assert_eq!(
        Sum.set_aggregated_window(&plate.data_set(), Window::new(0, 2).unwrap()),
        Ok(1.0 + 2.0 + 4.0 + 5.0)
    );
}

#[test]
fn test_count_semantics() {
    let plate = plate(
        "uneven",
        [
            well("A1", &[1.0]),
            well("B1", &[1.0, 2.0, 3.0, 4.0]),
            well("C1", &[]),
        ],
    );
    for w in plate.wells() {
        assert_eq!(Count.well(w), Ok(w.size()));
    }
    assert_eq!(Count.plate_aggregated(&plate), Ok(5));
    assert_eq!(Count.plate(&plate).unwrap()[&id("C1")], 0);
    assert_eq!(
        Count.plate_aggregated_window(&plate, Window::new(0, 1).unwrap()),
        Err(StatError::InvalidRange(RangeError::Overrun {
            well: id("C1"),
            begin: 0,
            length: 1,
            size: 0,
        }))
    );
}

#[test]
fn test_bounds_rejection() {
    let plate = small_plate();
    let a1 = plate.get(id("A1")).unwrap();
    let size = i64::try_from(a1.size()).unwrap();

    assert!(is_range_error(&Window::try_from((-1_i64, 3))));
    assert!(is_range_error(&Window::try_from((0_i64, 0))));

    let overrun = Window::try_from((size - 2, 5)).unwrap();
    assert!(is_range_error(&Mean.well_window(a1, overrun)));
    assert!(is_range_error(&Mean.plate_window(&plate, overrun)));
    assert!(is_range_error(&Mean.set_window(&plate.data_set(), overrun)));
    assert!(is_range_error(&Mean.plate_aggregated_window(&plate, overrun)));
    assert!(is_range_error(&Mean.set_aggregated_window(&plate.data_set(), overrun)));
    assert!(is_range_error(&Mean.plates_aggregated_window([&plate], overrun)));
    assert!(is_range_error(&Mean.sets_aggregated_window([&plate.data_set()], overrun)));
}

#[test]
fn test_one_bad_well_fails_the_whole_call() {
    let plate = plate(
        "short-last",
        [
            well("A1", &[1.0, 2.0, 3.0, 4.0]),
            well("A2", &[1.0, 2.0, 3.0, 4.0]),
            well("H12", &[1.0, 2.0]),
        ],
    );
    let window = Window::new(1, 2).unwrap();
    assert!(Mean.plate_window(&plate, window).is_ok());

    let window = Window::new(1, 3).unwrap();
    let err = Mean.plate_window(&plate, window).unwrap_err();
    assert_eq!(
        err,
        StatError::InvalidRange(RangeError::Overrun {
            well: id("H12"),
            begin: 1,
            length: 3,
            size: 2,
        })
    );

    // the range check runs before any reduction, even one that would fail
    let err = Kurtosis.plate_window(&plate, window).unwrap_err();
    assert!(err.is_invalid_range());

    let good = small_plate();
    let result = Mean.plates_aggregated_window([&good, &plate], Window::new(0, 3).unwrap());
    assert!(is_range_error(&result));
}

#[test]
fn test_collection_forms_are_equivalent() {
    let plates = random_plates(4, 3);
    let p25 = Percentile::new(25).unwrap();

    let from_vec = p25.plates_aggregated(&plates).unwrap();
    let from_slice = p25.plates_aggregated(plates.as_slice()).unwrap();
    let from_array = p25.plates_aggregated([&plates[0], &plates[1], &plates[2]]).unwrap();
    let from_iter = p25.plates_aggregated(plates.iter()).unwrap();
    assert_eq!(from_vec, from_slice);
    assert_eq!(from_vec, from_array);
    assert_eq!(from_vec, from_iter);
    assert_eq!(
        from_vec.keys().map(String::as_str).collect::<Vec<_>>(),
        ["plate-1", "plate-2", "plate-3"]
    );

    let sets: Vec<WellSet> = plates.iter().map(Plate::data_set).collect();
    let set_array: [WellSet; 3] = sets.clone().try_into().unwrap();
    assert_eq!(p25.sets_aggregated(&sets), p25.sets_aggregated(&set_array));
    assert_eq!(p25.sets_aggregated(&sets), Ok(from_vec));
}

#[test]
fn test_collection_values_match_single_container() {
    let plates = random_plates(5, 4);
    let window = Window::new(2, 5).unwrap();
    let results = Variance.plates_aggregated_window(&plates, window).unwrap();
    for plate in &plates {
        assert_eq!(
            results.try_get(plate.label()),
            Ok(&Variance.plate_aggregated_window(plate, window).unwrap())
        );
    }
    assert!(results.try_get("plate-99").unwrap_err().is_unknown_identity());
}

#[test]
fn test_duplicate_labels_keep_last_value() {
    let first = set("dup", [well("A1", &[1.0, 2.0])]);
    let other = set("other", [well("A1", &[7.0])]);
    let second = set("dup", [well("B2", &[10.0, 20.0, 30.0])]);
    let results = Count.sets_aggregated([&first, &other, &second]).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(
        results.iter().map(|(k, v)| (k.as_str(), *v)).collect::<Vec<_>>(),
        [("dup", 3), ("other", 1)]
    );
}

#[test]
fn test_percentile_boundaries() {
    let w = well("B7", &[8.0, 3.0, 5.0, 1.0, 9.0]);
    assert_eq!(Percentile::new(100).unwrap().well(&w), Max.well(&w));
    assert_eq!(Percentile::new(1).unwrap().well(&w), Min.well(&w));
    assert_eq!(Percentile::new(50).unwrap().well(&w), Ok(5.0));

    let hundredths = well("C3", &(1..=99).map(f64::from).collect::<Vec<_>>());
    for rank in [7, 14, 29, 57, 58] {
        let value = Percentile::new(rank).unwrap().well(&hundredths).unwrap();
        assert_eq!(value.to_bits(), f64::from(rank).to_bits(), "rank {rank}");
    }

    let single = well("A1", &[4.2]);
    for rank in [1, 50, 100] {
        assert_eq!(Percentile::new(rank).unwrap().well(&single), Ok(4.2));
    }

    let plates = random_plates(6, 1);
    let mut previous = f64::NEG_INFINITY;
    for rank in 1..=100 {
        let value = Percentile::new(rank).unwrap().plate_aggregated(&plates[0]).unwrap();
        assert!(value >= previous);
        previous = value;
    }
    assert_eq!(Some(previous), Max.plate_aggregated(&plates[0]).ok());
}

#[test]
fn test_std_dev_minimum() {
    let single = well("A1", &[3.0]);
    assert_eq!(
        StandardDeviation.well(&single),
        Err(StatError::InsufficientData {
            statistic: "std-dev",
            required: 2,
            actual: 1,
        })
    );

    // each well alone is too short, but the pooled readings are not
    let plate = plate("pairs", [well("A1", &[3.0]), well("A2", &[5.0])]);
    assert!(StandardDeviation.plate(&plate).unwrap_err().is_insufficient_data());
    let pooled = StandardDeviation.plate_aggregated(&plate).unwrap();
    assert!((pooled - 2.0_f64.sqrt()).abs() < 1e-12);

    let long = well("A1", &[1.0, 2.0, 3.0, 4.0]);
    assert!(StandardDeviation.well_window(&long, Window::new(3, 1).unwrap()).is_err());
    assert!(StandardDeviation.well_window(&long, Window::new(2, 2).unwrap()).is_ok());
}

#[test]
fn test_empty_containers() {
    let empty = Plate::new("empty", PlateType::Plate6, []).unwrap();
    assert!(Mean.plate(&empty).unwrap().is_empty());
    assert_eq!(Count.plate_aggregated(&empty), Ok(0));
    assert!(Mean.plate_aggregated(&empty).unwrap_err().is_insufficient_data());
    assert!(Mean.plates_aggregated(&Vec::<Plate>::new()).unwrap().is_empty());
}

#[test]
fn test_dynamic_statistic_matches_static() {
    let plates = random_plates(7, 2);
    let window = Window::new(0, 4).unwrap();
    let any = StatisticKind::StdDev.build(None).unwrap();
    let dynamic = any.plates_aggregated_window(&plates, window).unwrap();
    let fixed = StandardDeviation.plates_aggregated_window(&plates, window).unwrap();
    for ((dk, dv), (fk, fv)) in dynamic.iter().zip(&fixed) {
        assert_eq!(dk, fk);
        assert_eq!(*dv, Value::Real(*fv));
    }

    let count = StatisticKind::Count.build(None).unwrap();
    assert_eq!(count.plate_aggregated(&plates[0]), Ok(Value::Count(24 * 8)));
}
