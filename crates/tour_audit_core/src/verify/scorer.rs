use crate::{City, Error, Instance, Result, Tour};

/// Edge statistics of a closed tour.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TourMetrics {
    pub total: f64,
    pub longest: f64,
    pub average: f64,
    pub edges: usize,
}

/// Total cyclic Euclidean length of `tour`, including the closing edge back
/// to the first city. One city scores 0 (its only edge is to itself).
pub fn tour_length(tour: &Tour, instance: &Instance) -> Result<f64> {
    Ok(tour_metrics(tour, instance)?.total)
}

/// Walks every edge `tour[i] -> tour[(i + 1) % n]` once.
///
/// Ids are resolved against `instance`; a missing id means the tour was not
/// validated first and is reported as invalid data.
pub fn tour_metrics(tour: &Tour, instance: &Instance) -> Result<TourMetrics> {
    let cities = tour
        .ids()
        .iter()
        .map(|id| {
            instance.get(id).ok_or_else(|| {
                Error::invalid_data(format!("city {id} is not part of the instance"))
            })
        })
        .collect::<Result<Vec<&City>>>()?;

    let n = cities.len();
    if n == 0 {
        return Ok(TourMetrics::default());
    }

    let mut total = 0.0_f64;
    let mut longest = 0.0_f64;
    for i in 0..n {
        let d = cities[i].dist(cities[(i + 1) % n]);
        total += d;
        longest = longest.max(d);
    }
    let average = total / n as f64;

    log::info!("metrics: n={n} total={total:.2} longest={longest:.2} avg={average:.2}");

    Ok(TourMetrics {
        total,
        longest,
        average,
        edges: n,
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{tour_length, tour_metrics};
    use crate::{City, Error, Instance, Tour};

    fn square() -> Instance {
        let mut instance = Instance::new();
        for (id, x, y) in [("1", 0.0, 0.0), ("2", 0.0, 1.0), ("3", 1.0, 1.0), ("4", 1.0, 0.0)] {
            instance.insert(City::new(id, x, y));
        }
        instance
    }

    fn tour(ids: &[&str]) -> Tour {
        ids.iter().copied().collect()
    }

    #[test]
    fn unit_square_has_length_four() {
        let length = tour_length(&tour(&["1", "2", "3", "4"]), &square()).expect("score");
        assert_eq!(length, 4.0);
    }

    #[test]
    fn crossing_tour_includes_diagonals() {
        let length = tour_length(&tour(&["1", "3", "2", "4"]), &square()).expect("score");
        let expected = 2.0 + 2.0 * std::f64::consts::SQRT_2;
        assert!((length - expected).abs() < 1e-12);
    }

    #[test]
    fn single_city_scores_zero() {
        let length = tour_length(&tour(&["2"]), &square()).expect("score");
        assert_eq!(length, 0.0);
    }

    #[test]
    fn empty_tour_scores_zero() {
        let metrics = tour_metrics(&Tour::default(), &square()).expect("score");
        assert_eq!(metrics.total, 0.0);
        assert_eq!(metrics.edges, 0);
    }

    #[test]
    fn metrics_report_longest_and_average_edge() {
        let mut instance = Instance::new();
        instance.insert(City::new("1", 0.0, 0.0));
        instance.insert(City::new("2", 3.0, 0.0));
        instance.insert(City::new("3", 3.0, 4.0));

        let metrics = tour_metrics(&tour(&["1", "2", "3"]), &instance).expect("score");
        assert_eq!(metrics.total, 12.0);
        assert_eq!(metrics.longest, 5.0);
        assert_eq!(metrics.average, 4.0);
        assert_eq!(metrics.edges, 3);
    }

    #[test]
    fn unknown_city_is_invalid_data_not_a_panic() {
        let err = tour_length(&tour(&["1", "9"]), &square()).expect_err("unknown id");
        assert!(matches!(err, Error::InvalidData(_)));
    }

    fn instance_from(points: &[(f64, f64)]) -> (Instance, Vec<String>) {
        let mut instance = Instance::new();
        let ids: Vec<String> = (1..=points.len()).map(|i| i.to_string()).collect();
        for (id, (x, y)) in ids.iter().zip(points) {
            instance.insert(City::new(id.as_str(), *x, *y));
        }
        (instance, ids)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    proptest! {
        #[test]
        fn reversal_preserves_length(
            points in prop::collection::vec((-1e4f64..1e4, -1e4f64..1e4), 1..40)
        ) {
            let (instance, ids) = instance_from(&points);
            let forward = tour_length(&Tour::new(ids.clone()), &instance).expect("score");
            let reversed: Vec<String> = ids.into_iter().rev().collect();
            let backward = tour_length(&Tour::new(reversed), &instance).expect("score");
            prop_assert!(close(forward, backward), "{forward} != {backward}");
        }

        #[test]
        fn rotation_preserves_length(
            points in prop::collection::vec((-1e4f64..1e4, -1e4f64..1e4), 1..40),
            shift in 0usize..40
        ) {
            let (instance, ids) = instance_from(&points);
            let base = tour_length(&Tour::new(ids.clone()), &instance).expect("score");
            let mut rotated = ids;
            let k = shift % rotated.len();
            rotated.rotate_left(k);
            let turned = tour_length(&Tour::new(rotated), &instance).expect("score");
            prop_assert!(close(base, turned), "{base} != {turned}");
        }

        #[test]
        fn length_is_never_negative(
            points in prop::collection::vec((-1e4f64..1e4, -1e4f64..1e4), 1..40)
        ) {
            let (instance, ids) = instance_from(&points);
            prop_assert!(tour_length(&Tour::new(ids), &instance).expect("score") >= 0.0);
        }
    }
}
